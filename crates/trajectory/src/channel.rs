//! Position-indexed lookup over evenly spread scalar samples.

use std::fmt;
use std::str::FromStr;

/// Named scalar quantities carried alongside the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    /// Seconds since trajectory start, served from the time table.
    ElapsedTime,
    /// Attitude relative to the local horizontal, radians.
    Pitch,
    /// Vehicle mass, kilograms.
    Mass,
    /// Radial velocity, m/s.
    VerticalVelocity,
    /// Tangential velocity, m/s.
    HorizontalVelocity,
}

impl ChannelKind {
    /// Channels that can be attached to a trajectory (elapsed time comes from the time table).
    pub const ATTACHABLE: [ChannelKind; 4] = [
        ChannelKind::Pitch,
        ChannelKind::Mass,
        ChannelKind::VerticalVelocity,
        ChannelKind::HorizontalVelocity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ElapsedTime => "elapsed time",
            Self::Pitch => "pitch",
            Self::Mass => "mass",
            Self::VerticalVelocity => "vertical velocity",
            Self::HorizontalVelocity => "horizontal velocity",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown channel name passed to [`ChannelKind::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel `{0}`")]
pub struct UnknownChannel(pub String);

impl FromStr for ChannelKind {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "time" | "elapsed_time" | "timeline" => Ok(Self::ElapsedTime),
            "pitch" => Ok(Self::Pitch),
            "mass" => Ok(Self::Mass),
            "vr" | "vertical_velocity" | "velocity_vertical" => Ok(Self::VerticalVelocity),
            "vth" | "horizontal_velocity" | "velocity_horizontal" => Ok(Self::HorizontalVelocity),
            _ => Err(UnknownChannel(s.to_string())),
        }
    }
}

/// Value of an ordered sample sequence at `position`, treating the samples as
/// evenly spread over `[0, 1]` regardless of their physical timing.
///
/// - no samples: 0
/// - a single sample: that sample everywhere
/// - `[0, 1)`: linear interpolation between neighbouring samples
/// - exactly 1: the last sample
/// - anything else: 0
pub fn value_at(samples: &[f64], position: f64) -> f64 {
    match samples {
        [] => 0.0,
        [only] => *only,
        _ if (0.0..1.0).contains(&position) => {
            let float_index = position * (samples.len() - 1) as f64;
            let index = (float_index.floor() as usize).min(samples.len() - 2);
            let fraction = float_index - index as f64;
            let before = samples[index];
            let after = samples[index + 1];
            before + (after - before) * fraction
        }
        _ if position == 1.0 => samples[samples.len() - 1],
        _ => 0.0,
    }
}
