use bevy::math::cubic_splines::{CubicCardinalSpline, CubicCurve, CubicGenerator};
use bevy::math::Vec3;
use itertools::Itertools;
use crate::core::path_error::InvalidPathError;

/// Number of samples in the cumulative length table used to reparametrize by arc length.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Tension of the cardinal spline; 0.5 is Catmull-Rom.
pub const PATH_TENSION: f32 = 0.5;

/// A smooth curve through an ordered list of control points.
///
/// Interpolation is a Catmull-Rom spline; the first and last segments use mirrored phantom
/// points so the curve starts and ends exactly on the outer control points. Public
/// queries take a normalized `t` in `[0, 1]` that is uniform in arc length, so equal steps of
/// `t` cover equal distance along the curve.
#[derive(Debug, Clone)]
pub struct Path {
    points: Vec<Vec3>,
    curve: CubicCurve<Vec3>,
    arc_lengths: Vec<f32>,
}

impl Path {
    pub fn new(points: Vec<Vec3>) -> Result<Self, InvalidPathError> {
        if points.len() < 2 {
            return Err(InvalidPathError { control_points: points.len() });
        }

        let curve = CubicCardinalSpline::new(PATH_TENSION, points.clone())
            .to_curve()
            .map_err(|_| InvalidPathError { control_points: points.len() })?;

        let mut path = Path { points, curve, arc_lengths: Vec::new() };
        path.arc_lengths = path.build_arc_lengths();
        Ok(path)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Position at normalized arc length `t`, clamped to `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.point(self.u_at(t))
    }

    /// Unit direction of travel at normalized arc length `t`, clamped to `[0, 1]`.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        self.tangent(self.u_at(t))
    }

    /// `divisions + 1` points evenly spaced by arc length, both endpoints included.
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }

    /// Start/end pairs of a dashed line laid along the curve.
    pub fn dashes(&self, dash: f32, gap: f32) -> Vec<(Vec3, Vec3)> {
        let total = self.length();
        if dash <= 0.0 || total <= 0.0 {
            return Vec::new();
        }

        let period = dash + gap.max(0.0);
        let mut segments = Vec::new();
        for k in 0.. {
            let start = k as f32 * period;
            let end = (start + dash).min(total);
            if end - start <= total * f32::EPSILON {
                break;
            }
            segments.push((self.point_at(start / total), self.point_at(end / total)));
        }
        segments
    }

    fn build_arc_lengths(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        lengths.push(0.0);

        let mut sum = 0.0;
        for (a, b) in (0..=ARC_LENGTH_DIVISIONS)
            .map(|i| self.point(i as f32 / ARC_LENGTH_DIVISIONS as f32))
            .tuple_windows()
        {
            sum += a.distance(b);
            lengths.push(sum);
        }
        lengths
    }

    // Maps normalized arc length onto the raw spline parameter.
    fn u_at(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let total = self.length();
        if total <= 0.0 {
            return t;
        }

        let target = t * total;
        let last = self.arc_lengths.len() - 1;
        // Index of the last table entry not past the target.
        let i = self
            .arc_lengths
            .partition_point(|&length| length <= target)
            .saturating_sub(1)
            .min(last);

        if i == last {
            return 1.0;
        }

        let before = self.arc_lengths[i];
        let segment = self.arc_lengths[i + 1] - before;
        let fraction = if segment > 0.0 { (target - before) / segment } else { 0.0 };
        (i as f32 + fraction) / last as f32
    }

    fn point(&self, u: f32) -> Vec3 {
        self.curve.position(self.curve_parameter(u))
    }

    fn tangent(&self, u: f32) -> Vec3 {
        let direction = self.curve.velocity(self.curve_parameter(u)).normalize_or_zero();
        if direction != Vec3::ZERO {
            return direction;
        }
        // Coincident control points leave no derivative; fall back to the overall heading.
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        (last - first).normalize_or_zero()
    }

    // The curve runs over `[0, segment count]`.
    fn curve_parameter(&self, u: f32) -> f32 {
        u.clamp(0.0, 1.0) * self.curve.segments().len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn road() -> Path {
        Path::new(vec![
            Vec3::new(8.0, 0.4, -10.0),
            Vec3::new(6.0, 0.4, -4.0),
            Vec3::new(4.0, 0.4, -1.5),
            Vec3::new(2.0, 0.4, 1.5),
            Vec3::new(-1.0, 0.4, 4.0),
            Vec3::new(-4.0, 0.4, 6.0),
            Vec3::new(-8.0, 0.4, 8.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_fewer_than_two_points() {
        assert_eq!(Path::new(vec![]).unwrap_err(), InvalidPathError { control_points: 0 });
        assert_eq!(
            Path::new(vec![Vec3::ONE]).unwrap_err(),
            InvalidPathError { control_points: 1 }
        );
    }

    #[test]
    fn two_points_interpolate_linearly() {
        let path = Path::new(vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]).unwrap();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let p = path.point_at(t);
            assert!((p - Vec3::new(10.0 * t, 0.0, 0.0)).length() < EPS, "t={t} p={p}");
        }
        assert!((path.length() - 10.0).abs() < EPS);
        assert!((path.tangent_at(0.5) - Vec3::X).length() < EPS);
    }

    #[test]
    fn endpoints_match_control_points() {
        let path = road();
        assert!((path.point_at(0.0) - Vec3::new(8.0, 0.4, -10.0)).length() < EPS);
        assert!((path.point_at(1.0) - Vec3::new(-8.0, 0.4, 8.0)).length() < EPS);
    }

    #[test]
    fn end_tangents_point_at_neighbouring_control_points() {
        let path = road();
        let points = path.control_points();
        let start = (points[1] - points[0]).normalize();
        let end = (points[6] - points[5]).normalize();
        assert!((path.tangent_at(0.0) - start).length() < EPS);
        assert!((path.tangent_at(1.0) - end).length() < EPS);
    }

    #[test]
    fn clamps_parameter_outside_unit_range() {
        let path = road();
        assert_eq!(path.point_at(-3.0), path.point_at(0.0));
        assert_eq!(path.point_at(7.0), path.point_at(1.0));
    }

    #[test]
    fn passes_near_interior_control_points() {
        let path = road();
        let samples = path.sample(2000);
        for control in &path.control_points()[1..path.control_points().len() - 1] {
            let nearest = samples
                .iter()
                .map(|s| s.distance(*control))
                .fold(f32::MAX, f32::min);
            assert!(nearest < 0.05, "control point {control} missed by {nearest}");
        }
    }

    #[test]
    fn continuous_and_deterministic() {
        let path = road();
        let step = 1.0 / 1000.0;
        let max_jump = path.length() * step * 1.5;
        for i in 0..1000 {
            let t = i as f32 * step;
            assert_eq!(path.point_at(t), path.point_at(t));
            assert!(path.point_at(t).distance(path.point_at(t + step)) <= max_jump);
        }
    }

    #[test]
    fn tangents_are_unit_and_smooth() {
        let path = road();
        let mut previous = path.tangent_at(0.0);
        for i in 1..=500 {
            let tangent = path.tangent_at(i as f32 / 500.0);
            assert!((tangent.length() - 1.0).abs() < EPS);
            assert!(tangent.dot(previous) > 0.95, "corner near t={}", i as f32 / 500.0);
            previous = tangent;
        }
    }

    #[test]
    fn samples_are_evenly_spaced() {
        let path = road();
        let samples = path.sample(50);
        assert_eq!(samples.len(), 51);
        let expected = path.length() / 50.0;
        for (a, b) in samples.iter().tuple_windows() {
            assert!((a.distance(*b) - expected).abs() < expected * 0.05);
        }
    }

    #[test]
    fn dashes_alternate_with_gaps() {
        let path = Path::new(vec![Vec3::ZERO, Vec3::new(6.0, 0.0, 0.0)]).unwrap();
        let dashes = path.dashes(0.6, 0.6);
        assert_eq!(dashes.len(), 5);
        assert!((dashes[1].0.x - 1.2).abs() < EPS);
        assert!((dashes[1].1.x - 1.8).abs() < EPS);
        assert!(path.dashes(0.0, 1.0).is_empty());
    }

    #[test]
    fn coincident_points_do_not_produce_nan() {
        let path = Path::new(vec![Vec3::ONE, Vec3::ONE, Vec3::ONE]).unwrap();
        assert_eq!(path.length(), 0.0);
        assert_eq!(path.point_at(0.5), Vec3::ONE);
        assert!(!path.tangent_at(0.5).is_nan());
    }
}
