//! Trajectory interpolation and playback for a powered lunar descent.
//!
//! The member crates carry the actual logic; this crate re-exports them under
//! short names and wires the common "load a directory, get an engine" path so
//! front-ends (the CLI, a renderer) share it.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

pub use descent_config as config;
pub use descent_core as core;
pub use descent_diagnostics as diagnostics;
pub use descent_export as export;
pub use descent_importer as importer;
pub use descent_playback as playback;
pub use descent_trajectory as trajectory;

use config::ReplayConfig;
use diagnostics::DiagnosticsSink;
use playback::PlaybackEngine;
use trajectory::TrajectoryModel;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Import(#[from] importer::ImportError),
}

/// Load the trajectory stored in `dir` with the settings in `config`.
pub fn load(
    dir: &Path,
    config: &ReplayConfig,
    sink: &dyn DiagnosticsSink,
) -> Result<Arc<TrajectoryModel>, ReplayError> {
    let model = importer::load_trajectory(dir, &config.trajectory, sink)?;
    Ok(Arc::new(model))
}

/// Load `dir` and attach a playback engine configured from `config.playback`.
pub fn open(
    dir: &Path,
    config: &ReplayConfig,
    sink: Arc<dyn DiagnosticsSink>,
) -> Result<PlaybackEngine, ReplayError> {
    let model = load(dir, config, sink.as_ref())?;
    Ok(PlaybackEngine::with_config(model, sink, &config.playback))
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
