//! Core units, constants, and shared primitives for the descent replay workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Reference lunar radius used for altitude and downrange estimates (m).
    pub const MOON_RADIUS_M: f64 = 1_737_100.0;
    /// Default scale applied to raw waypoints before smoothing (metres to kilometres).
    pub const DEFAULT_SCENE_SCALE: f64 = 0.001;
    /// Lower rail of the normalized progress range.
    pub const PROGRESS_MIN: f64 = 0.0;
    /// Upper rail of the normalized progress range.
    pub const PROGRESS_MAX: f64 = 1.0;
}

/// Unit conversion helpers.
pub mod units {
    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use std::time::Duration;

    /// Convert a (possibly negative or non-finite) number of seconds to a `Duration`.
    ///
    /// Negative and NaN inputs collapse to zero; infinities saturate.
    pub fn seconds_to_duration(seconds: f64) -> Duration {
        if seconds.is_nan() || seconds <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }

    /// Split a duration into whole (minutes, seconds, milliseconds) for display.
    pub fn split_mm_ss_ms(duration: Duration) -> (u64, u64, u32) {
        let total = duration.as_secs();
        (total / 60, total % 60, duration.subsec_millis())
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D point in raw metres or scene units depending on context.
    pub type Vector3 = [f64; 3];

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Linear interpolation between `a` (t = 0) and `b` (t = 1).
    #[inline]
    pub fn lerp(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
        ]
    }

    /// Length of the projection onto the x/y plane.
    #[inline]
    pub fn planar_norm(v: &Vector3) -> f64 {
        v[0].hypot(v[1])
    }

    /// Bearing of the point about the origin in the x/y plane, wrapped into `[0, 2π)`.
    pub fn bearing(v: &Vector3) -> f64 {
        let theta = v[1].atan2(v[0]);
        if theta < 0.0 {
            theta + std::f64::consts::TAU
        } else {
            theta
        }
    }

    /// Spherical (r, θ, φ) to Cartesian conversion.
    ///
    /// `θ` is the azimuth in the x/y plane and `φ` the elevation above it.
    pub fn polar_to_cartesian(r: f64, theta: f64, phi: f64) -> Vector3 {
        [
            r * theta.cos() * phi.cos(),
            r * theta.sin() * phi.cos(),
            r * phi.sin(),
        ]
    }

    /// Component-wise approximate equality helper used by tests and callers.
    pub fn approx_eq(a: &Vector3, b: &Vector3, tolerance: f64) -> bool {
        (0..3).all(|i| (a[i] - b[i]).abs() <= tolerance)
    }
}
