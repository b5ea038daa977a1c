use glam::Vec2;

use crate::calc::lerp_clamp;

/// A quadratic Bezier curve from `begin` to `end`, pulled toward `control`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleCurve {
    pub begin: Vec2,
    pub end: Vec2,
    pub control: Vec2,
}

impl SimpleCurve {
    pub fn new(begin: Vec2, end: Vec2, control: Vec2) -> Self {
        Self { begin, end, control }
    }

    /// Sample the quadratic curve at `t`. `t` is not clamped, so overshooting
    /// easers extrapolate past the endpoints.
    pub fn point(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        self.begin * (mt * mt) + self.control * (2.0 * mt * t) + self.end * (t * t)
    }

    /// Straight per-axis interpolation from `begin` to `end`, ignoring the
    /// control point. `t` is clamped to [0, 1].
    pub fn point_linear(&self, t: f32) -> Vec2 {
        Vec2::new(
            lerp_clamp(self.begin.x, self.end.x, t),
            lerp_clamp(self.begin.y, self.end.y, t),
        )
    }

    /// Sample either the curve or the straight line between its endpoints.
    pub fn point_with(&self, t: f32, linear: bool) -> Vec2 {
        if linear {
            self.point_linear(t)
        } else {
            self.point(t)
        }
    }

    /// Approximate arc length by summing `resolution` chords.
    pub fn length_parametric(&self, resolution: u32) -> f32 {
        if resolution == 0 {
            return 0.0;
        }
        let mut last = self.begin;
        let mut length = 0.0;
        for i in 1..=resolution {
            let at = self.point(i as f32 / resolution as f32);
            length += (at - last).length();
            last = at;
        }
        length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bent() -> SimpleCurve {
        SimpleCurve::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 10.0))
    }

    #[test]
    fn test_endpoints_both_modes() {
        let curve = bent();
        for linear in [false, true] {
            assert!(curve.point_with(0.0, linear).abs_diff_eq(curve.begin, 1e-5));
            assert!(curve.point_with(1.0, linear).abs_diff_eq(curve.end, 1e-5));
        }
    }

    #[test]
    fn test_midpoint_differs_when_control_off_center() {
        let curve = bent();
        let curved = curve.point(0.5);
        let straight = curve.point_linear(0.5);
        assert!(straight.abs_diff_eq(Vec2::new(5.0, 0.0), 1e-5));
        assert!(curved.abs_diff_eq(Vec2::new(5.0, 5.0), 1e-5));
    }

    #[test]
    fn test_midpoint_control_matches_line() {
        let curve = SimpleCurve::new(Vec2::ZERO, Vec2::new(4.0, 4.0), Vec2::new(2.0, 2.0));
        assert!(curve.point(0.5).abs_diff_eq(curve.point_linear(0.5), 1e-5));
    }

    #[test]
    fn test_linear_clamps_progress() {
        let curve = bent();
        assert!(curve.point_linear(1.5).abs_diff_eq(curve.end, 1e-5));
        assert!(curve.point_linear(-1.0).abs_diff_eq(curve.begin, 1e-5));
    }

    #[test]
    fn test_length_of_straight_curve() {
        let curve = SimpleCurve::new(Vec2::ZERO, Vec2::new(3.0, 4.0), Vec2::new(1.5, 2.0));
        assert!((curve.length_parametric(10) - 5.0).abs() < 1e-4);
        assert_eq!(curve.length_parametric(0), 0.0);
    }

    #[test]
    fn test_bent_curve_longer_than_chord() {
        assert!(bent().length_parametric(10) > 10.0);
    }
}
