use std::path::{Path, PathBuf};

use descent_trajectory::ChannelKind;

use crate::parse::ParserKind;

/// Directory the CLI looks in when no data directory is given.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Input files recognised inside a trajectory data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataFile {
    /// Seconds at which each waypoint is reached, one per line.
    Timeline,
    /// `r,theta,phi` per line (metres, radians).
    TrajectoryPolar,
    /// `x,y,z` per line (metres).
    TrajectoryCartesian,
    /// Pitch history in radians.
    Pitch,
    /// Mass history in kilograms.
    Mass,
    /// Vertical velocity history in m/s.
    VerticalVelocity,
    /// Horizontal velocity history in m/s.
    HorizontalVelocity,
}

impl DataFile {
    pub const ALL: [DataFile; 7] = [
        DataFile::Timeline,
        DataFile::TrajectoryPolar,
        DataFile::TrajectoryCartesian,
        DataFile::Pitch,
        DataFile::Mass,
        DataFile::VerticalVelocity,
        DataFile::HorizontalVelocity,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Timeline => "timeline.txt",
            Self::TrajectoryPolar => "trajectory_polar.txt",
            Self::TrajectoryCartesian => "trajectory_cartesian.txt",
            Self::Pitch => "pitch.txt",
            Self::Mass => "mass.txt",
            Self::VerticalVelocity => "velocity_vertical.txt",
            Self::HorizontalVelocity => "velocity_horizontal.txt",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|file| file.file_name() == name)
    }

    /// How each line of this file is parsed.
    pub fn parser_kind(self) -> ParserKind {
        match self {
            Self::TrajectoryPolar => ParserKind::PolarVertex,
            Self::TrajectoryCartesian => ParserKind::CartesianVertex,
            Self::Timeline
            | Self::Pitch
            | Self::Mass
            | Self::VerticalVelocity
            | Self::HorizontalVelocity => ParserKind::Scalar,
        }
    }

    /// Scalar channel fed by this file, if any.
    pub fn channel(self) -> Option<ChannelKind> {
        match self {
            Self::Timeline => Some(ChannelKind::ElapsedTime),
            Self::Pitch => Some(ChannelKind::Pitch),
            Self::Mass => Some(ChannelKind::Mass),
            Self::VerticalVelocity => Some(ChannelKind::VerticalVelocity),
            Self::HorizontalVelocity => Some(ChannelKind::HorizontalVelocity),
            Self::TrajectoryPolar | Self::TrajectoryCartesian => None,
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}
