//! Write the smoothed descent path (or its control points) as CSV, with an
//! optional sampled telemetry table next to it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use descent_replay::diagnostics::TracingSink;
use descent_replay::export::{self, telemetry};
use descent_replay::importer::DEFAULT_DATA_DIR;
use descent_replay::playback::telemetry::sample;

#[derive(Parser, Debug)]
#[command(author, version, about = "Export descent path and telemetry")]
struct Cli {
    /// Directory holding the trajectory and timeline files
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data: PathBuf,

    /// Optional TOML or YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output CSV path for the path points (`-` for stdout)
    #[arg(long)]
    output: PathBuf,

    /// Export the raw control waypoints (metres) instead of the smoothed path
    #[arg(long, default_value_t = false)]
    control: bool,

    /// Also write sampled telemetry here (`.json` for JSON, anything else for CSV)
    #[arg(long)]
    telemetry: Option<PathBuf>,

    /// Number of evenly spaced telemetry samples, rails included
    #[arg(long, default_value_t = 200)]
    samples: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = descent_cli::init(cli.config.as_deref())?;

    let model = descent_replay::load(&cli.data, &config, &TracingSink)
        .with_context(|| format!("could not build trajectory from {}", cli.data.display()))?;

    let points = if cli.control {
        model.control_points()
    } else {
        model.smoothed_path()
    };
    let mut writer = export::writer_for_path(&cli.output)
        .with_context(|| format!("failed to open {}", cli.output.display()))?;
    export::path::write_csv(&mut writer, points)?;
    drop(writer);
    tracing::info!(target: "descent", points = points.len(), output = %output_label(&cli.output), "path exported");

    if let Some(path) = &cli.telemetry {
        let frames = sample(&model, cli.samples);
        let source = cli.data.display().to_string();
        let meta = telemetry::Metadata {
            source: &source,
            smooth_factor: config.trajectory.smooth_factor,
            scene_scale: model.scale(),
            duration_s: model.duration_s(),
            control_points: model.control_points().len(),
            path_points: model.smoothed_path().len(),
        };
        telemetry::write_for_extension(path, &meta, &frames)
            .with_context(|| format!("failed to write telemetry to {}", path.display()))?;
        tracing::info!(target: "descent", samples = frames.len(), output = %output_label(path), "telemetry exported");
    }

    Ok(())
}

fn output_label(path: &Path) -> String {
    if path == Path::new("-") {
        "stdout".to_string()
    } else {
        path.display().to_string()
    }
}
