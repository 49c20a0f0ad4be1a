//! Shared setup for the command-line binaries.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use descent_replay::config::{self, ReplayConfig};
use descent_replay::core::time::split_mm_ss_ms;
use descent_replay::diagnostics;

/// Load the optional configuration file and install the log subscriber.
pub fn init(config_path: Option<&Path>) -> anyhow::Result<ReplayConfig> {
    let config = config::load_or_default(config_path)
        .with_context(|| match config_path {
            Some(path) => format!("failed to load configuration {}", path.display()),
            None => "failed to build default configuration".to_string(),
        })?;
    diagnostics::init_logging(&config.logging)?;
    Ok(config)
}

/// `mm:ss.mmm`, the clock format shown next to the descent.
pub fn format_clock(duration: Duration) -> String {
    let (minutes, seconds, millis) = split_mm_ss_ms(duration);
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_fields() {
        assert_eq!(format_clock(Duration::from_millis(65_042)), "01:05.042");
        assert_eq!(format_clock(Duration::ZERO), "00:00.000");
    }
}
