//! Angle and distance helpers shared by the scans and the renderer.
//!
//! Angles are radians, 0 = +X (east), growing towards +Y. Screen space has
//! +Y pointing down, so "facing down" means the ray's y grows.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;

/// Reduce any angle to `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid may round a tiny negative input up to exactly TAU
    if a >= TAU { 0.0 } else { a }
}

#[inline]
pub fn facing_down(angle: f32) -> bool {
    angle > 0.0 && angle < PI
}

#[inline]
pub fn facing_up(angle: f32) -> bool {
    !facing_down(angle)
}

#[inline]
pub fn facing_right(angle: f32) -> bool {
    angle < FRAC_PI_2 || angle > 1.5 * PI
}

#[inline]
pub fn facing_left(angle: f32) -> bool {
    !facing_right(angle)
}

/// Euclidean distance. Kept in floating point; callers only compare it.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
