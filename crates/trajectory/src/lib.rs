//! Trajectory interpolation: Bézier smoothing of control waypoints and
//! position-indexed lookups of geometry, segment speed, and scalar channels.
//!
//! Positions are normalized progress values in `[0, 1]`, where 0 is the first
//! control waypoint and 1 the last.

pub mod channel;
pub mod model;
pub mod spline;

use descent_core::constants::{PROGRESS_MAX, PROGRESS_MIN};
use thiserror::Error;

pub use channel::ChannelKind;
pub use model::{TrajectoryBuilder, TrajectoryModel};

/// Normalized progress guaranteed to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    pub const START: Progress = Progress(PROGRESS_MIN);
    pub const END: Progress = Progress(PROGRESS_MAX);

    /// Validate a raw position.
    pub fn new(value: f64) -> Result<Self, PositionError> {
        if (PROGRESS_MIN..=PROGRESS_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PositionError::OutOfRange(value))
        }
    }

    /// Clamp a raw position onto the progress range. NaN maps to the start.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(PROGRESS_MIN, PROGRESS_MAX))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// True at either end of the range.
    pub fn is_rail(self) -> bool {
        self.0 == PROGRESS_MIN || self.0 == PROGRESS_MAX
    }
}

impl From<Progress> for f64 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

/// Query issued outside the `[0, 1]` domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PositionError {
    #[error("position {0} lies outside [0, 1]")]
    OutOfRange(f64),
}

/// Reasons a trajectory model cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrajectoryError {
    #[error("not enough vertices for trajectory: got {0}, need at least 2")]
    NotEnoughWaypoints(usize),
    #[error("not enough discrete times for trajectory: got {0}, need at least 2")]
    NotEnoughTimes(usize),
}
