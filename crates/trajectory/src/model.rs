//! Immutable trajectory aggregate and its builder.

use std::collections::BTreeMap;

use descent_core::constants::{DEFAULT_SCENE_SCALE, MOON_RADIUS_M};
use descent_core::vector::{self, Vector3};
use descent_diagnostics::{DiagnosticsSink, Event};

use crate::channel::{self, ChannelKind};
use crate::spline;
use crate::{PositionError, Progress, TrajectoryError};

/// Collects raw inputs and settings for a [`TrajectoryModel`].
#[derive(Debug, Clone)]
pub struct TrajectoryBuilder {
    waypoints: Vec<Vector3>,
    times: Vec<f64>,
    smooth_factor: usize,
    scale: f64,
    reference_radius_m: f64,
    channels: Vec<(ChannelKind, Vec<f64>)>,
}

impl TrajectoryBuilder {
    /// Start from control waypoints (raw units) and the time, in seconds, at which each is reached.
    pub fn new(waypoints: Vec<Vector3>, times: Vec<f64>) -> Self {
        Self {
            waypoints,
            times,
            smooth_factor: 0,
            scale: DEFAULT_SCENE_SCALE,
            reference_radius_m: MOON_RADIUS_M,
            channels: Vec::new(),
        }
    }

    pub fn smooth_factor(mut self, smooth_factor: usize) -> Self {
        self.smooth_factor = smooth_factor;
        self
    }

    /// Factor applied to waypoints before smoothing (raw units to scene units).
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Radius of the reference body in raw units, used by altitude and downrange.
    pub fn reference_radius_m(mut self, radius: f64) -> Self {
        self.reference_radius_m = radius;
        self
    }

    /// Attach a scalar channel. `ElapsedTime` is ignored here; it always comes from the time table.
    pub fn channel(mut self, kind: ChannelKind, samples: Vec<f64>) -> Self {
        self.channels.push((kind, samples));
        self
    }

    /// Validate inputs and build the model.
    ///
    /// Only the waypoint and time counts are checked. Empty channels are
    /// reported and dropped rather than failing the whole build.
    pub fn build(self, sink: &dyn DiagnosticsSink) -> Result<TrajectoryModel, TrajectoryError> {
        if self.waypoints.len() < 2 {
            let err = TrajectoryError::NotEnoughWaypoints(self.waypoints.len());
            sink.record(&Event::TrajectoryRejected {
                reason: err.to_string(),
            });
            return Err(err);
        }
        if self.times.len() < 2 {
            let err = TrajectoryError::NotEnoughTimes(self.times.len());
            sink.record(&Event::TrajectoryRejected {
                reason: err.to_string(),
            });
            return Err(err);
        }

        for (index, pair) in self.times.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                sink.record(&Event::NonIncreasingTime {
                    index,
                    from_s: pair[0],
                    to_s: pair[1],
                });
            }
        }

        let scaled: Vec<Vector3> = self
            .waypoints
            .iter()
            .map(|p| vector::scale(p, self.scale))
            .collect();
        let smoothed = spline::build(&scaled, self.smooth_factor);
        let speeds = segment_speeds(&self.times);

        let mut channels = BTreeMap::new();
        for (kind, samples) in self.channels {
            if kind == ChannelKind::ElapsedTime {
                continue;
            }
            if samples.is_empty() {
                sink.record(&Event::ChannelRejected {
                    channel: kind.name(),
                });
                continue;
            }
            channels.insert(kind, samples);
        }

        sink.record(&Event::TrajectoryBuilt {
            control_points: self.waypoints.len(),
            path_points: smoothed.len(),
            segments: speeds.len(),
        });

        Ok(TrajectoryModel {
            smoothed,
            control: self.waypoints,
            times: self.times,
            speeds,
            channels,
            scale: self.scale,
            reference_radius_m: self.reference_radius_m,
        })
    }
}

/// Progress-per-second for each time segment, assuming segments split `[0, 1]` evenly.
fn segment_speeds(times: &[f64]) -> Vec<f64> {
    let segments = times.len().saturating_sub(1);
    times
        .windows(2)
        .map(|pair| 1.0 / (segments as f64 * (pair[1] - pair[0])))
        .collect()
}

/// Smoothed path, control waypoints, segment speeds, and scalar channels of one descent.
///
/// Read-only once built; share it across consumers with `Arc`.
#[derive(Debug, Clone)]
pub struct TrajectoryModel {
    /// Scene units.
    smoothed: Vec<Vector3>,
    /// Raw units, as supplied.
    control: Vec<Vector3>,
    times: Vec<f64>,
    speeds: Vec<f64>,
    channels: BTreeMap<ChannelKind, Vec<f64>>,
    scale: f64,
    reference_radius_m: f64,
}

impl TrajectoryModel {
    /// Point on the smoothed path (scene units) at `position`.
    pub fn vertex_at(&self, position: f64) -> Result<Vector3, PositionError> {
        Ok(self.vertex(Progress::new(position)?))
    }

    pub fn vertex(&self, progress: Progress) -> Vector3 {
        let last = self.smoothed.len() - 1;
        let travelled = progress.get() * last as f64;
        let start = (travelled.floor() as usize).min(last);
        let end = (start + 1).min(last);
        let fraction = travelled - start as f64;
        vector::lerp(&self.smoothed[start], &self.smoothed[end], fraction)
    }

    /// Progress-per-second of the segment containing `position`.
    ///
    /// `position == 1` reports the last segment so motion can resume backwards from the end.
    pub fn speed_at(&self, position: f64) -> Result<f64, PositionError> {
        Ok(self.speed(Progress::new(position)?))
    }

    pub fn speed(&self, progress: Progress) -> f64 {
        let last = self.speeds.len() - 1;
        let index = (progress.get() * self.speeds.len() as f64).floor() as usize;
        self.speeds[index.min(last)]
    }

    /// Value of a scalar channel at `position`; 0 for channels that were never attached.
    pub fn channel_at(&self, kind: ChannelKind, position: f64) -> Result<f64, PositionError> {
        Ok(self.channel_value(kind, Progress::new(position)?))
    }

    pub fn channel_value(&self, kind: ChannelKind, progress: Progress) -> f64 {
        channel::value_at(self.channel(kind).unwrap_or(&[]), progress.get())
    }

    /// Distance along the reference surface (raw units) between `position` and the final waypoint.
    ///
    /// Planar approximation: bearings about the origin in the x/y plane, scaled by the
    /// reference radius.
    pub fn downrange_distance_at(&self, position: f64) -> Result<f64, PositionError> {
        Ok(self.downrange_distance(Progress::new(position)?))
    }

    pub fn downrange_distance(&self, progress: Progress) -> f64 {
        let target = self.control[self.control.len() - 1];
        let current = self.vertex(progress);
        self.reference_radius_m * (vector::bearing(&target) - vector::bearing(&current)).abs()
    }

    /// Height above the reference radius (raw units) at `position`, from the x/y distance to the origin.
    pub fn altitude_at(&self, position: f64) -> Result<f64, PositionError> {
        Ok(self.altitude(Progress::new(position)?))
    }

    pub fn altitude(&self, progress: Progress) -> f64 {
        let current = self.vertex(progress);
        (vector::planar_norm(&current) - self.reference_radius_m * self.scale) / self.scale
    }

    pub fn smoothed_path(&self) -> &[Vector3] {
        &self.smoothed
    }

    pub fn control_points(&self) -> &[Vector3] {
        &self.control
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    /// Raw samples for a channel, if present. Elapsed time is always present.
    pub fn channel(&self, kind: ChannelKind) -> Option<&[f64]> {
        match kind {
            ChannelKind::ElapsedTime => Some(&self.times),
            other => self.channels.get(&other).map(Vec::as_slice),
        }
    }

    pub fn has_channel(&self, kind: ChannelKind) -> bool {
        self.channel(kind).is_some()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn reference_radius_m(&self) -> f64 {
        self.reference_radius_m
    }

    /// Time between the first and last time samples.
    pub fn duration_s(&self) -> f64 {
        self.times[self.times.len() - 1] - self.times[0]
    }
}
