use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use descent_cli::format_clock;
use descent_replay::diagnostics::{DiagnosticsSink, TracingSink};
use descent_replay::importer::DEFAULT_DATA_DIR;
use descent_replay::playback::{Direction, FixedStepClock, PlaybackEngine};

/// Replay a descent headlessly and print its telemetry as it plays.
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless descent replay")]
struct Cli {
    /// Directory holding the trajectory and timeline files
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data: PathBuf,

    /// Optional TOML or YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Press "speed up" this many times before starting
    #[arg(long, default_value_t = 0)]
    speed_up: u32,

    /// Press "speed down" this many times before starting
    #[arg(long, default_value_t = 0)]
    speed_down: u32,

    /// Reverse direction once progress passes this value
    #[arg(long)]
    reverse_at: Option<f64>,

    /// Simulated wall time per rendered frame in seconds (defaults to one fixed step)
    #[arg(long)]
    frame_dt: Option<f64>,

    /// Stop after this many frames even if playback is still running
    #[arg(long, default_value_t = 100_000)]
    max_frames: usize,

    /// Print a status row every N frames
    #[arg(long, default_value_t = 30)]
    report_every: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = descent_cli::init(cli.config.as_deref())?;

    let sink: Arc<dyn DiagnosticsSink> = Arc::new(TracingSink);
    let mut engine = descent_replay::open(&cli.data, &config, sink)
        .with_context(|| format!("could not build trajectory from {}", cli.data.display()))?;

    for _ in 0..cli.speed_up {
        engine.speed_up();
    }
    for _ in 0..cli.speed_down {
        engine.speed_down();
    }

    let mut clock = FixedStepClock::from_rate_hz(
        config.playback.frame_rate_hz,
        config.playback.max_catch_up_steps,
    );
    let frame_dt = cli.frame_dt.unwrap_or_else(|| clock.step_s());
    let report_every = cli.report_every.max(1);
    let mut reversed = false;

    engine.run();
    println!(
        "replaying {} ({:.1} s of descent, {} path points) at {}x",
        cli.data.display(),
        engine.trajectory().duration_s(),
        engine.trajectory().smoothed_path().len(),
        engine.speed_multiplier()
    );
    println!(
        "{:>7} {:>9} {:>12} {:>12} {:>8} {:>10}",
        "frame", "progress", "altitude_m", "downrange_m", "pitch", "clock"
    );

    let mut frames = 0;
    while frames < cli.max_frames && engine.is_running() {
        engine.drive(&mut clock, frame_dt);
        frames += 1;

        if let Some(at) = cli.reverse_at {
            if !reversed && engine.direction() == Direction::Forward && engine.progress() >= at {
                engine.reverse();
                reversed = true;
            }
        }
        if frames % report_every == 0 {
            print_row(frames, &engine);
        }
    }

    print_row(frames, &engine);
    println!(
        "finished after {} frames at progress {:.5} ({}, {:?}, {}x)",
        frames,
        engine.progress(),
        if engine.is_running() { "running" } else { "paused" },
        engine.direction(),
        engine.speed_multiplier()
    );
    Ok(())
}

fn print_row(frame: usize, engine: &PlaybackEngine) {
    println!(
        "{:>7} {:>9.5} {:>12.1} {:>12.1} {:>8.2} {:>10}",
        frame,
        engine.progress(),
        engine.altitude_m(),
        engine.downrange_distance_m(),
        engine.pitch_degrees(),
        format_clock(engine.elapsed_time())
    );
}
