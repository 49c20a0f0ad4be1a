//! Playback state machine: progress, direction, run flag, and speed multiplier.

use std::sync::Arc;
use std::time::Duration;

use descent_config::PlaybackConfig;
use descent_core::time::seconds_to_duration;
use descent_core::units::rad_to_deg;
use descent_core::vector::Vector3;
use descent_diagnostics::{DiagnosticsSink, Event, Heading};
use descent_trajectory::{ChannelKind, Progress, TrajectoryModel};

use crate::clock::FixedStepClock;
use crate::speed;

/// Travel direction along the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    fn heading(self) -> Heading {
        match self {
            Self::Forward => Heading::Forward,
            Self::Backward => Heading::Backward,
        }
    }
}

/// User-facing playback flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub running: bool,
    pub direction: Direction,
    pub speed_multiplier: f64,
}

/// Movement between the previous and the current progress, for incremental scene updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneDelta {
    pub from: Vector3,
    pub to: Vector3,
    pub pitch_from_rad: f64,
    pub pitch_to_rad: f64,
}

/// Drives progress along one trajectory. Created stopped, moving forward at 1x.
pub struct PlaybackEngine {
    trajectory: Arc<TrajectoryModel>,
    sink: Arc<dyn DiagnosticsSink>,
    progress: Progress,
    previous: Progress,
    running: bool,
    direction: Direction,
    speed_multiplier: f64,
    nudge_step: f64,
}

impl PlaybackEngine {
    pub fn new(trajectory: Arc<TrajectoryModel>, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            trajectory,
            sink,
            progress: Progress::START,
            previous: Progress::START,
            running: false,
            direction: Direction::Forward,
            speed_multiplier: 1.0,
            nudge_step: PlaybackConfig::default().nudge_step,
        }
    }

    /// Engine tuned by `config`; starts running when `autoplay` is set.
    pub fn with_config(
        trajectory: Arc<TrajectoryModel>,
        sink: Arc<dyn DiagnosticsSink>,
        config: &PlaybackConfig,
    ) -> Self {
        let mut engine = Self::new(trajectory, sink);
        engine.speed_multiplier = config.initial_speed;
        engine.nudge_step = config.nudge_step;
        engine.running = config.autoplay;
        engine
    }

    pub fn trajectory(&self) -> &Arc<TrajectoryModel> {
        &self.trajectory
    }

    pub fn run(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Play/pause.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Flip direction. At either rail this also resumes playback so the
    /// engine can leave the end it is parked on.
    pub fn reverse(&mut self) {
        self.direction = self.direction.flipped();
        let resumed = self.progress.is_rail();
        if resumed {
            self.run();
        }
        self.sink.record(&Event::DirectionChanged {
            heading: self.direction.heading(),
            resumed,
        });
    }

    /// Move progress by `dt_s` of playback time at the local segment speed.
    pub fn advance(&mut self, dt_s: f64) {
        if !self.running {
            return;
        }
        let mut delta = dt_s * self.speed_multiplier * self.trajectory.speed(self.progress);
        if self.direction == Direction::Backward {
            delta = -delta;
        }
        self.seek(self.progress.get() + delta);
    }

    /// Run all fixed steps due after `real_elapsed_s` of wall time.
    /// Returns the number of steps taken.
    pub fn drive(&mut self, clock: &mut FixedStepClock, real_elapsed_s: f64) -> usize {
        let steps = clock.tick(real_elapsed_s);
        for _ in 0..steps {
            self.advance(clock.step_s());
        }
        steps
    }

    /// Jump to `value`, clamped to `[0, 1]`. Landing on either rail pauses playback.
    pub fn seek(&mut self, value: f64) {
        if value.is_nan() {
            self.sink.record(&Event::SeekIgnored);
            return;
        }
        self.previous = self.progress;
        self.progress = Progress::clamped(value);
        if self.progress.is_rail() {
            if self.running {
                self.sink.record(&Event::RailReached {
                    progress: self.progress.get(),
                });
            }
            self.stop();
        }
    }

    /// Scrub by a raw progress offset.
    pub fn nudge(&mut self, delta: f64) {
        self.seek(self.progress.get() + delta);
    }

    /// Scrub forward by the configured nudge step (one held-key frame).
    pub fn step_forward(&mut self) {
        self.nudge(self.nudge_step);
    }

    pub fn step_backward(&mut self) {
        self.nudge(-self.nudge_step);
    }

    pub fn speed_up(&mut self) {
        self.set_multiplier(speed::step_up(self.speed_multiplier));
    }

    pub fn speed_down(&mut self) {
        self.set_multiplier(speed::step_down(self.speed_multiplier));
    }

    fn set_multiplier(&mut self, next: f64) {
        if next != self.speed_multiplier {
            self.sink.record(&Event::SpeedChanged {
                from: self.speed_multiplier,
                to: next,
            });
            self.speed_multiplier = next;
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    pub fn previous_progress(&self) -> f64 {
        self.previous.get()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            running: self.running,
            direction: self.direction,
            speed_multiplier: self.speed_multiplier,
        }
    }

    /// Current point on the smoothed path, in scene units.
    pub fn position(&self) -> Vector3 {
        self.trajectory.vertex(self.progress)
    }

    pub fn scene_delta(&self) -> SceneDelta {
        SceneDelta {
            from: self.trajectory.vertex(self.previous),
            to: self.trajectory.vertex(self.progress),
            pitch_from_rad: self.trajectory.channel_value(ChannelKind::Pitch, self.previous),
            pitch_to_rad: self.trajectory.channel_value(ChannelKind::Pitch, self.progress),
        }
    }

    /// Height above the reference surface in metres.
    pub fn altitude_m(&self) -> f64 {
        self.trajectory.altitude(self.progress)
    }

    /// Surface distance to the landing site in metres.
    pub fn downrange_distance_m(&self) -> f64 {
        self.trajectory.downrange_distance(self.progress)
    }

    pub fn pitch_degrees(&self) -> f64 {
        rad_to_deg(self.channel(ChannelKind::Pitch))
    }

    pub fn elapsed_time(&self) -> Duration {
        seconds_to_duration(self.channel(ChannelKind::ElapsedTime))
    }

    pub fn mass_kg(&self) -> f64 {
        self.channel(ChannelKind::Mass)
    }

    pub fn vertical_velocity_m_s(&self) -> f64 {
        self.channel(ChannelKind::VerticalVelocity)
    }

    pub fn horizontal_velocity_m_s(&self) -> f64 {
        self.channel(ChannelKind::HorizontalVelocity)
    }

    fn channel(&self, kind: ChannelKind) -> f64 {
        self.trajectory.channel_value(kind, self.progress)
    }
}
