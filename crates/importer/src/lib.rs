//! Loading of trajectory data directories.
//!
//! A data directory holds plain text files: one vertex table (polar preferred
//! over Cartesian), a timeline, and optional scalar channels. Lines that fail
//! to parse are reported through the diagnostics sink and skipped.

pub mod files;
pub mod parse;

use std::path::{Path, PathBuf};

use descent_config::TrajectoryConfig;
use descent_core::vector::Vector3;
use descent_diagnostics::{DiagnosticsSink, Event};
use descent_trajectory::{ChannelKind, TrajectoryBuilder, TrajectoryError, TrajectoryModel};
use thiserror::Error;

pub use files::{DEFAULT_DATA_DIR, DataFile};
pub use parse::{ParserKind, Parsed, RecordError};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("no trajectory file in {0} (expected trajectory_polar.txt or trajectory_cartesian.txt)")]
    MissingTrajectory(PathBuf),
    #[error("no timeline.txt in {0}")]
    MissingTimeline(PathBuf),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not build trajectory: {0}")]
    Trajectory(#[from] TrajectoryError),
}

/// Parsed contents of a data directory, before smoothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrajectory {
    /// Control waypoints in metres.
    pub waypoints: Vec<Vector3>,
    pub times: Vec<f64>,
    /// Optional channels that were found, in file order.
    pub channels: Vec<(ChannelKind, Vec<f64>)>,
}

impl RawTrajectory {
    pub fn channel(&self, kind: ChannelKind) -> Option<&[f64]> {
        if kind == ChannelKind::ElapsedTime {
            return Some(&self.times);
        }
        self.channels
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, samples)| samples.as_slice())
    }

    /// Builder carrying these inputs and the settings from `config`.
    pub fn into_builder(self, config: &TrajectoryConfig) -> TrajectoryBuilder {
        let mut builder = TrajectoryBuilder::new(self.waypoints, self.times)
            .smooth_factor(config.smooth_factor)
            .scale(config.scene_scale)
            .reference_radius_m(config.reference_radius_m);
        for (kind, samples) in self.channels {
            builder = builder.channel(kind, samples);
        }
        builder
    }
}

/// Read every recognised file in `dir`.
pub fn load_directory(dir: &Path, sink: &dyn DiagnosticsSink) -> Result<RawTrajectory, ImportError> {
    if !dir.is_dir() {
        return Err(ImportError::NotADirectory(dir.to_path_buf()));
    }
    sink.record(&Event::ScanningDirectory {
        path: dir.to_path_buf(),
    });

    let vertex_file = [DataFile::TrajectoryPolar, DataFile::TrajectoryCartesian]
        .into_iter()
        .find(|file| file.path_in(dir).is_file())
        .ok_or_else(|| ImportError::MissingTrajectory(dir.to_path_buf()))?;
    let waypoints = read_vertices(dir, vertex_file, sink)?;

    if !DataFile::Timeline.path_in(dir).is_file() {
        return Err(ImportError::MissingTimeline(dir.to_path_buf()));
    }
    let times = read_scalars(dir, DataFile::Timeline, sink)?;

    let mut channels = Vec::new();
    for file in [
        DataFile::Pitch,
        DataFile::Mass,
        DataFile::VerticalVelocity,
        DataFile::HorizontalVelocity,
    ] {
        let Some(kind) = file.channel() else {
            continue;
        };
        if !file.path_in(dir).is_file() {
            sink.record(&Event::FileMissing {
                file: file.file_name(),
            });
            continue;
        }
        channels.push((kind, read_scalars(dir, file, sink)?));
    }

    Ok(RawTrajectory {
        waypoints,
        times,
        channels,
    })
}

/// Load `dir` and build the smoothed trajectory with `config`.
pub fn load_trajectory(
    dir: &Path,
    config: &TrajectoryConfig,
    sink: &dyn DiagnosticsSink,
) -> Result<TrajectoryModel, ImportError> {
    let raw = load_directory(dir, sink)?;
    Ok(raw.into_builder(config).build(sink)?)
}

/// Read a vertex table (`trajectory_polar.txt` or `trajectory_cartesian.txt`).
pub fn read_vertices(
    dir: &Path,
    file: DataFile,
    sink: &dyn DiagnosticsSink,
) -> Result<Vec<Vector3>, ImportError> {
    let values = read_records(dir, file, sink)?;
    Ok(values
        .into_iter()
        .filter_map(|parsed| match parsed {
            Parsed::Vertex(vertex) => Some(vertex),
            Parsed::Scalar(_) => None,
        })
        .collect())
}

/// Read a one-number-per-line table.
pub fn read_scalars(
    dir: &Path,
    file: DataFile,
    sink: &dyn DiagnosticsSink,
) -> Result<Vec<f64>, ImportError> {
    let values = read_records(dir, file, sink)?;
    Ok(values
        .into_iter()
        .filter_map(|parsed| match parsed {
            Parsed::Scalar(value) => Some(value),
            Parsed::Vertex(_) => None,
        })
        .collect())
}

fn read_records(
    dir: &Path,
    file: DataFile,
    sink: &dyn DiagnosticsSink,
) -> Result<Vec<Parsed>, ImportError> {
    let kind = file.parser_kind();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(kind.delimiter())
        .from_path(file.path_in(dir))?;

    let mut parsed = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(0);
                sink.record(&Event::InvalidRecord {
                    file: file.file_name(),
                    line,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        // Whitespace-only lines.
        if record.iter().all(str::is_empty) {
            continue;
        }
        match kind.parse(record.iter()) {
            Ok(value) => parsed.push(value),
            Err(reason) => sink.record(&Event::InvalidRecord {
                file: file.file_name(),
                line: record.position().map(|pos| pos.line()).unwrap_or(0),
                reason: reason.to_string(),
            }),
        }
    }

    sink.record(&Event::FileLoaded {
        file: file.file_name(),
        records: parsed.len(),
    });
    Ok(parsed)
}
