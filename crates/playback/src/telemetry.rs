//! Derived quantities evaluated across the whole trajectory.

use serde::Serialize;

use descent_core::units::rad_to_deg;
use descent_trajectory::{ChannelKind, Progress, TrajectoryModel};

use crate::engine::PlaybackEngine;

/// Snapshot of every derived quantity at one progress value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryFrame {
    pub progress: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub altitude_m: f64,
    pub downrange_m: f64,
    pub pitch_deg: f64,
    pub elapsed_s: f64,
    pub mass_kg: f64,
    pub vertical_velocity_m_s: f64,
    pub horizontal_velocity_m_s: f64,
}

impl TelemetryFrame {
    pub fn at(model: &TrajectoryModel, progress: Progress) -> Self {
        let [x, y, z] = model.vertex(progress);
        Self {
            progress: progress.get(),
            x,
            y,
            z,
            altitude_m: model.altitude(progress),
            downrange_m: model.downrange_distance(progress),
            pitch_deg: rad_to_deg(model.channel_value(ChannelKind::Pitch, progress)),
            elapsed_s: model.channel_value(ChannelKind::ElapsedTime, progress),
            mass_kg: model.channel_value(ChannelKind::Mass, progress),
            vertical_velocity_m_s: model.channel_value(ChannelKind::VerticalVelocity, progress),
            horizontal_velocity_m_s: model.channel_value(ChannelKind::HorizontalVelocity, progress),
        }
    }

    /// Frame at the engine's current progress.
    pub fn from_engine(engine: &PlaybackEngine) -> Self {
        Self::at(engine.trajectory(), Progress::clamped(engine.progress()))
    }
}

/// `count` frames at evenly spaced progress values, both rails included.
/// A count below two yields the two rails.
pub fn sample(model: &TrajectoryModel, count: usize) -> Vec<TelemetryFrame> {
    let count = count.max(2);
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| TelemetryFrame::at(model, Progress::clamped(i as f64 / last)))
        .collect()
}
