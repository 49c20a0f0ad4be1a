//! Piecewise Bézier smoothing of control waypoints.
//!
//! Waypoints are consumed in groups starting at indices 0, 3, 6, … Each group
//! holds up to four control points (a cubic curve); near the end of the input
//! the trailing group degrades to a quadratic or linear curve. Consecutive
//! groups share only their boundary control point, so the path is continuous
//! in position but not in tangent.
//!
//! Within a group the curve parameter advances uniformly per input span, which
//! means emitted points are not evenly spaced in distance.

use descent_core::vector::{self, Vector3};

/// Points per cubic group, including the shared boundary point.
const GROUP_SIZE: usize = 4;
/// Input indices advanced between group starts.
const GROUP_STRIDE: usize = GROUP_SIZE - 1;

/// Number of path points produced for `waypoints` inputs.
pub fn smoothed_len(waypoints: usize, smooth_factor: usize) -> usize {
    if waypoints == 0 {
        return 0;
    }
    waypoints + (waypoints - 1) * smooth_factor
}

/// Build the smoothed path. `smooth_factor` extra points are inserted between
/// every pair of consecutive waypoints.
///
/// A `smooth_factor` of zero asks for no smoothing and returns the waypoints
/// unchanged. Fewer than two waypoints are returned as-is.
pub fn build(waypoints: &[Vector3], smooth_factor: usize) -> Vec<Vector3> {
    if waypoints.len() < 2 || smooth_factor == 0 {
        return waypoints.to_vec();
    }

    let steps_per_span = smooth_factor + 1;
    let mut path = Vec::with_capacity(smoothed_len(waypoints.len(), smooth_factor));
    let last = waypoints.len() - 1;

    for group_start in (0..last).step_by(GROUP_STRIDE) {
        let group_end = (group_start + GROUP_STRIDE).min(last);
        let controls = &waypoints[group_start..=group_end];
        let spans = controls.len() - 1;
        let denominator = (spans * steps_per_span) as f64;

        for span in 0..spans {
            for step in 0..steps_per_span {
                let t = (span * steps_per_span + step) as f64 / denominator;
                path.push(bezier_point(controls, t));
            }
        }
    }
    path.push(waypoints[last]);

    path
}

/// Evaluate a Bézier curve of arbitrary degree with de Casteljau's algorithm.
///
/// `t = 0` yields the first control point and `t = 1` the last one exactly.
pub fn bezier_point(controls: &[Vector3], t: f64) -> Vector3 {
    match controls {
        [] => [0.0; 3],
        [only] => *only,
        _ if t <= 0.0 => controls[0],
        _ if t >= 1.0 => controls[controls.len() - 1],
        _ => {
            let mut scratch: Vec<Vector3> = controls.to_vec();
            for level in (1..scratch.len()).rev() {
                for i in 0..level {
                    scratch[i] = vector::lerp(&scratch[i], &scratch[i + 1], t);
                }
            }
            scratch[0]
        }
    }
}
