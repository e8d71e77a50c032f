//! Additional math helpers layered on top of `glam`.

/// Double precision 2-D vector used for every world-space quantity.
pub type Vec2 = glam::DVec2;

/// Squared-distance tolerance under which two points are considered coincident.
pub const POINT_TOLERANCE_SQ: f64 = 0.0005 * 0.0005;

/// Absolute tolerance for scalar comparisons.
pub const SCALAR_TOLERANCE: f64 = 0.0005;

/// Operations the kernel needs that `glam::DVec2` does not provide directly.
pub trait Vec2Ext {
    /// Rotates the vector counter-clockwise by `theta` radians.
    fn rotated(self, theta: f64) -> Vec2;

    /// 2-D cross product (perp-dot): `x1 * y2 - y1 * x2`.
    fn cross(self, other: Vec2) -> f64;

    /// True when the squared distance to `other` is below [`POINT_TOLERANCE_SQ`].
    fn is_close_to(self, other: Vec2) -> bool;
}

impl Vec2Ext for Vec2 {
    fn rotated(self, theta: f64) -> Vec2 {
        let (sin, cos) = theta.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    fn cross(self, other: Vec2) -> f64 {
        self.perp_dot(other)
    }

    fn is_close_to(self, other: Vec2) -> bool {
        self.distance_squared(other) < POINT_TOLERANCE_SQ
    }
}

pub fn nearly_equal(a: f64, b: f64) -> bool {
    (b - a).abs() < SCALAR_TOLERANCE
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Projects `point` onto the segment `a..b`, clamping to the endpoints.
pub fn closest_point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let ap = point - a;
    let ab_len_sq = ab.length_squared();
    if ab_len_sq <= f64::EPSILON {
        return a;
    }

    let t = ab.dot(ap) / ab_len_sq;
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a + ab * t
    }
}

/// Point-in-convex-polygon test for corners wound clockwise in a Y-up frame.
///
/// Points on an edge count as inside. Counter-clockwise input inverts the result.
pub fn polygon_contains(points: &[Vec2], point: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    (0..points.len()).all(|i| {
        let start = points[i];
        let end = points[(i + 1) % points.len()];
        (end - start).cross(end - point) >= 0.0
    })
}
