//! Configuration models and loaders for descent replays.

use std::fs::File;
use std::path::Path;

use descent_core::constants::{DEFAULT_SCENE_SCALE, MOON_RADIUS_M};
use serde::Deserialize;
use thiserror::Error;

/// Top-level replay configuration, usually read from `configs/replay.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    pub trajectory: TrajectoryConfig,
    pub playback: PlaybackConfig,
    pub logging: LoggingConfig,
}

/// How raw waypoints are turned into a renderable path.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Extra points inserted between each pair of control waypoints.
    pub smooth_factor: usize,
    /// Factor applied to raw waypoint coordinates (metres) before smoothing.
    pub scene_scale: f64,
    /// Radius of the reference body in raw units (metres).
    pub reference_radius_m: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            smooth_factor: 3,
            scene_scale: DEFAULT_SCENE_SCALE,
            reference_radius_m: MOON_RADIUS_M,
        }
    }
}

/// Frame loop and user-control tuning.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Logical update rate; `advance` is called with `1 / frame_rate_hz`.
    pub frame_rate_hz: f64,
    /// Upper bound of fixed steps drained per real frame.
    pub max_catch_up_steps: usize,
    pub initial_speed: f64,
    /// Progress moved per frame while a scrub key is held.
    pub nudge_step: f64,
    /// Start running as soon as the engine is created.
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 30.0,
            max_catch_up_steps: 5,
            initial_speed: 1.0,
            nudge_step: 0.0001,
            autoplay: true,
        }
    }
}

/// Log verbosity accepted in configuration files.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log line layout.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ReplayConfig {
    /// Reject values that would make the trajectory or the frame loop meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a positive number, got {value}"),
                })
            }
        };
        positive("trajectory.scene_scale", self.trajectory.scene_scale)?;
        positive(
            "trajectory.reference_radius_m",
            self.trajectory.reference_radius_m,
        )?;
        positive("playback.frame_rate_hz", self.playback.frame_rate_hz)?;
        positive("playback.initial_speed", self.playback.initial_speed)?;
        if !(self.playback.nudge_step.is_finite() && self.playback.nudge_step >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "playback.nudge_step",
                reason: format!("expected a non-negative number, got {}", self.playback.nudge_step),
            });
        }
        if self.playback.max_catch_up_steps == 0 {
            return Err(ConfigError::Invalid {
                field: "playback.max_catch_up_steps",
                reason: "must allow at least one step per frame".to_string(),
            });
        }
        Ok(())
    }

    /// Fixed logical timestep in seconds.
    pub fn fixed_timestep_s(&self) -> f64 {
        1.0 / self.playback.frame_rate_hz
    }
}

/// Load and validate a replay configuration from a TOML or YAML file.
///
/// Files ending in `.toml` are parsed as TOML; anything else is treated as YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ReplayConfig, ConfigError> {
    let path = path.as_ref();
    let config: ReplayConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    config.validate()?;
    Ok(config)
}

/// Load the configuration at `path` if given, falling back to defaults otherwise.
pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<ReplayConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ReplayConfig::default()),
    }
}
