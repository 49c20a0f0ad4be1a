//! Fixed-timestep accumulator.
//!
//! Real frame time is accumulated and drained in whole logical steps so that
//! playback speed does not depend on rendering performance.

#[derive(Debug, Clone, PartialEq)]
pub struct FixedStepClock {
    step_s: f64,
    max_catch_up: usize,
    accumulator_s: f64,
}

impl FixedStepClock {
    /// `max_catch_up` bounds the steps drained per tick; any older backlog is dropped.
    pub fn new(step_s: f64, max_catch_up: usize) -> Self {
        Self {
            step_s,
            max_catch_up: max_catch_up.max(1),
            accumulator_s: 0.0,
        }
    }

    pub fn from_rate_hz(rate_hz: f64, max_catch_up: usize) -> Self {
        Self::new(1.0 / rate_hz, max_catch_up)
    }

    pub fn step_s(&self) -> f64 {
        self.step_s
    }

    /// Unconsumed time carried into the next tick.
    pub fn pending_s(&self) -> f64 {
        self.accumulator_s
    }

    /// Add `real_elapsed_s` and return how many fixed steps are due now.
    pub fn tick(&mut self, real_elapsed_s: f64) -> usize {
        if self.step_s.is_nan() || self.step_s <= 0.0 {
            return 0;
        }
        if !real_elapsed_s.is_finite() || real_elapsed_s <= 0.0 {
            return 0;
        }
        self.accumulator_s += real_elapsed_s;

        let mut steps = 0;
        while self.accumulator_s >= self.step_s && steps < self.max_catch_up {
            self.accumulator_s -= self.step_s;
            steps += 1;
        }
        if self.accumulator_s >= self.step_s {
            self.accumulator_s %= self.step_s;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator_s = 0.0;
    }
}
