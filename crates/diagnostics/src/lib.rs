//! Diagnostics plumbing shared by the trajectory, playback, and import crates.
//!
//! Library code never talks to a global logger directly. Constructors take a
//! [`DiagnosticsSink`] and report [`Event`]s through it; binaries decide where
//! events go by passing a [`TracingSink`] (after [`init_logging`]), while tests
//! use a [`RecordingSink`] to assert on what happened.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use descent_config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// How loudly an event should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Which travel direction a playback change refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Forward,
    Backward,
}

/// Everything the core crates report while building or replaying a trajectory.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A trajectory model finished construction.
    TrajectoryBuilt {
        control_points: usize,
        path_points: usize,
        segments: usize,
    },
    /// Construction was refused; the reason is user-presentable.
    TrajectoryRejected { reason: String },
    /// A channel was offered with no samples and was left unset.
    ChannelRejected { channel: &'static str },
    /// Time samples `index` and `index + 1` are not strictly increasing.
    NonIncreasingTime { index: usize, from_s: f64, to_s: f64 },
    /// A data directory is being scanned.
    ScanningDirectory { path: PathBuf },
    /// An optional input file was not present.
    FileMissing { file: &'static str },
    /// A record could not be parsed and was skipped.
    InvalidRecord {
        file: &'static str,
        line: u64,
        reason: String,
    },
    /// A data file was read successfully.
    FileLoaded { file: &'static str, records: usize },
    /// Playback hit either end of the progress range and paused.
    RailReached { progress: f64 },
    /// Playback direction changed.
    DirectionChanged { heading: Heading, resumed: bool },
    /// Speed multiplier moved through the step table.
    SpeedChanged { from: f64, to: f64 },
    /// A seek request was not a number and was ignored.
    SeekIgnored,
}

impl Event {
    /// Severity used when forwarding to a logger.
    pub fn severity(&self) -> Severity {
        match self {
            Event::TrajectoryRejected { .. } => Severity::Error,
            Event::ChannelRejected { .. }
            | Event::NonIncreasingTime { .. }
            | Event::InvalidRecord { .. }
            | Event::SeekIgnored => Severity::Warn,
            Event::TrajectoryBuilt { .. } => Severity::Info,
            Event::ScanningDirectory { .. }
            | Event::FileMissing { .. }
            | Event::FileLoaded { .. }
            | Event::RailReached { .. }
            | Event::DirectionChanged { .. }
            | Event::SpeedChanged { .. } => Severity::Debug,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::TrajectoryBuilt {
                control_points,
                path_points,
                segments,
            } => write!(
                f,
                "trajectory built: {control_points} control points, {path_points} path points, {segments} segments"
            ),
            Event::TrajectoryRejected { reason } => {
                write!(f, "could not build trajectory: {reason}")
            }
            Event::ChannelRejected { channel } => {
                write!(f, "invalid input for {channel} history, channel left empty")
            }
            Event::NonIncreasingTime { index, from_s, to_s } => write!(
                f,
                "time samples {index} and {} are not increasing ({from_s} s -> {to_s} s)",
                index + 1
            ),
            Event::ScanningDirectory { path } => {
                write!(f, "loading trajectory data from {}", path.display())
            }
            Event::FileMissing { file } => write!(f, "{file} not found, skipping"),
            Event::InvalidRecord { file, line, reason } => {
                write!(f, "invalid record in {file}, line {line}: {reason}")
            }
            Event::FileLoaded { file, records } => write!(f, "loaded {records} records from {file}"),
            Event::RailReached { progress } => {
                write!(f, "playback paused at rail (progress {progress})")
            }
            Event::DirectionChanged { heading, resumed } => write!(
                f,
                "playback direction now {heading:?}{}",
                if *resumed { ", resumed from rail" } else { "" }
            ),
            Event::SpeedChanged { from, to } => write!(f, "speed multiplier {from}x -> {to}x"),
            Event::SeekIgnored => write!(f, "ignored seek to a non-numeric position"),
        }
    }
}

/// Receiver for diagnostics events. Implementations must be cheap and non-blocking.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &Event);
}

/// Forwards events to the `tracing` ecosystem at their [`Severity`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: &Event) {
        match event.severity() {
            Severity::Trace => tracing::trace!(target: "descent", "{event}"),
            Severity::Debug => tracing::debug!(target: "descent", "{event}"),
            Severity::Info => tracing::info!(target: "descent", "{event}"),
            Severity::Warn => tracing::warn!(target: "descent", "{event}"),
            Severity::Error => tracing::error!(target: "descent", "{event}"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn record(&self, _event: &Event) {}
}

/// Keeps events in memory so callers (tests, UI status lines) can inspect them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl DiagnosticsSink for RecordingSink {
    fn record(&self, event: &Event) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

impl<T: DiagnosticsSink + ?Sized> DiagnosticsSink for std::sync::Arc<T> {
    fn record(&self, event: &Event) {
        (**self).record(event)
    }
}

#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

/// Install the process-wide `tracing` subscriber used by [`TracingSink`].
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DiagnosticsError> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(config.level.as_directive())?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|_| DiagnosticsError::AlreadyInstalled)
}
