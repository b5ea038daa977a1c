//! Small numeric helpers shared by the orb state machine and the curve code.

use glam::Vec2;

/// Move `value` toward `target` by at most `max_move`, never overshooting.
pub fn approach(value: f32, target: f32, max_move: f32) -> f32 {
    if value > target {
        (value - max_move).max(target)
    } else {
        (value + max_move).min(target)
    }
}

/// Triangular 0 → 1 → 0 envelope over `t` in [0, 1].
pub fn yoyo(t: f32) -> f32 {
    if t <= 0.5 {
        t * 2.0
    } else {
        (1.0 - t) * 2.0
    }
}

/// Direction of `v` in radians. A zero vector points along +X.
pub fn angle(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Direction from `from` toward `to` in radians.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    angle(to - from)
}

/// Vector of the given length pointing at `angle` radians.
pub fn angle_to_vector(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos() * length, angle.sin() * length)
}

/// Normalize, or return zero for degenerate input instead of NaN.
pub fn safe_normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Counter-clockwise perpendicular `(-y, x)`.
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp_clamp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Three-way sign: -1, 0 or 1. Unlike `f32::signum`, zero maps to 0.
pub fn sign(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
