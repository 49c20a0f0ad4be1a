//! Playback of a descent trajectory: a progress scalar advanced once per fixed
//! logical step, with run/pause, direction, scrubbing, and a stepped speed multiplier.

pub mod clock;
pub mod engine;
pub mod speed;
pub mod telemetry;

pub use clock::FixedStepClock;
pub use engine::{Direction, PlaybackEngine, PlaybackState, SceneDelta};
pub use telemetry::TelemetryFrame;
