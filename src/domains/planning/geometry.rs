//! Planar geometry helpers shared by the planner, the feasibility checks
//! and the airspace model. All angles are radians; the normalized range
//! for headings is (-pi, pi].

use std::f64::consts::{PI, TAU};

use super::types::Position2D;

/// Euclidean distance between two field positions.
pub fn distance_between(a: &Position2D, b: &Position2D) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Fold an arbitrary angle into (-pi, pi].
pub fn normalize_angle(angle: f64) -> f64 {
    let mut folded = angle % TAU;
    if folded <= -PI {
        folded += TAU;
    } else if folded > PI {
        folded -= TAU;
    }
    folded
}

/// Angle of the vector (dx, dy) relative to the positive x axis,
/// normalized to (-pi, pi].
pub fn bearing_of(dx: f64, dy: f64) -> f64 {
    normalize_angle(dy.atan2(dx))
}

/// Bearing from one position toward another.
pub fn bearing_between(from: &Position2D, to: &Position2D) -> f64 {
    bearing_of(to.x - from.x, to.y - from.y)
}

/// Absolute shortest angular distance between two headings, in [0, pi].
pub fn angular_difference(a: f64, b: f64) -> f64 {
    normalize_angle(a - b).abs()
}
