//! Non-linear speed multiplier steps.

/// Slowest multiplier [`step_down`] reaches from the default 1x.
///
/// Multipliers at or below 0.3x are never slowed further, so an initial speed
/// such as 0.25x stays where it is.
pub const MIN_MULTIPLIER: f64 = 0.2;
/// Fastest multiplier reachable through [`step_up`].
pub const MAX_MULTIPLIER: f64 = 200.0;

/// Next multiplier when speeding up. Multipliers at or above 200x are left unchanged.
pub fn step_up(current: f64) -> f64 {
    let step = if current < 1.0 {
        0.2
    } else if current < 5.0 {
        1.0
    } else if current < 30.0 {
        5.0
    } else if current < 80.0 {
        10.0
    } else if current < MAX_MULTIPLIER {
        20.0
    } else {
        return current;
    };
    settle(current + step)
}

/// Next multiplier when slowing down. Multipliers at or below 0.3x are left unchanged.
pub fn step_down(current: f64) -> f64 {
    let step = if current <= 0.3 {
        return current;
    } else if current <= 1.0 {
        0.2
    } else if current <= 5.0 {
        1.0
    } else if current <= 30.0 {
        5.0
    } else if current <= 80.0 {
        10.0
    } else {
        20.0
    };
    settle(current - step)
}

// drops accumulated representation error so repeated 0.2 steps land on 0.6, 0.8, 1.0
fn settle(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}
