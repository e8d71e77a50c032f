use crate::{
    collision::narrowphase::Mtv,
    core::{body::Body, shape::Shape, types::Edge},
    error::{PhysicsError, Result},
    utils::math::{closest_point_on_segment, nearly_equal, Vec2, Vec2Ext},
};

/// Up to two world-space contact points describing how two polygons touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSet {
    points: [Vec2; 2],
    count: usize,
}

impl Default for ContactSet {
    fn default() -> Self {
        Self {
            points: [Vec2::ZERO; 2],
            count: 0,
        }
    }
}

impl ContactSet {
    pub fn single(point: Vec2) -> Self {
        Self {
            points: [point, Vec2::ZERO],
            count: 1,
        }
    }

    pub fn pair(first: Vec2, second: Vec2) -> Self {
        Self {
            points: [first, second],
            count: 2,
        }
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.points[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Collision normal, depth and contact points for one colliding pair.
///
/// Lives for a single collision pass; nothing is carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManifold {
    pub mtv: Mtv,
    pub contacts: ContactSet,
}

impl CollisionManifold {
    pub fn new(mtv: Mtv, contacts: ContactSet) -> Self {
        Self { mtv, contacts }
    }

    pub fn generate(mtv: Mtv, body_a: &Body, body_b: &Body) -> Result<Self> {
        Ok(Self::new(mtv, ContactPoints::generate(body_a, body_b)?))
    }

    pub fn normal(&self) -> Vec2 {
        self.mtv.normal
    }

    pub fn depth(&self) -> f64 {
        self.mtv.depth
    }
}

pub struct ContactPoints;

impl ContactPoints {
    pub fn generate(body_a: &Body, body_b: &Body) -> Result<ContactSet> {
        match (body_a.shape(), body_b.shape()) {
            (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => Ok(Self::polygon_to_polygon(
                &body_a.transformed_points(),
                &body_a.transformed_axes(),
                &body_b.transformed_points(),
                &body_b.transformed_axes(),
            )),
            #[allow(unreachable_patterns)]
            (a, b) => Err(PhysicsError::UnsupportedShapePair(a.name(), b.name())),
        }
    }

    /// Finds the corner(s) closest to the other polygon's edges.
    ///
    /// Corners of A are checked against edges of B, then corners of B against
    /// edges of A. The first closest corner becomes the first point; the first
    /// later corner at the same distance (and not coincident with it) becomes
    /// the second. Further ties are dropped.
    pub fn polygon_to_polygon(
        points_a: &[Vec2],
        axes_a: &[Edge],
        points_b: &[Vec2],
        axes_b: &[Edge],
    ) -> ContactSet {
        let mut min_dist = f64::MAX;
        let mut first = Vec2::ZERO;
        let mut second = Vec2::ZERO;
        let mut count = 0;

        for (points, edges) in [(points_a, axes_b), (points_b, axes_a)] {
            for &point in points {
                for edge in edges {
                    let closest = closest_point_on_segment(point, edge.start, edge.end);
                    let dist_sq = closest.distance_squared(point);

                    if nearly_equal(dist_sq, min_dist) {
                        if count == 1 && !point.is_close_to(first) {
                            second = point;
                            count = 2;
                        }
                    } else if dist_sq < min_dist {
                        min_dist = dist_sq;
                        first = point;
                        count = 1;
                    }
                }
            }
        }

        match count {
            1 => ContactSet::single(first),
            2 => ContactSet::pair(first, second),
            _ => ContactSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn unit_box(x: f64, y: f64) -> Body {
        Body::rectangle(1.0, 1.0, 1.0, false)
            .unwrap()
            .with_position(Vec2::new(x, y))
    }

    #[test]
    fn face_contact_yields_two_points() {
        let ground = Body::rectangle(10.0, 1.0, 1.0, true)
            .unwrap()
            .with_position(Vec2::new(0.0, 5.0));
        let resting = unit_box(0.0, 4.0);

        let contacts = ContactPoints::generate(&resting, &ground).unwrap();
        assert_eq!(contacts.len(), 2);
        let mut xs: Vec<f64> = contacts.as_slice().iter().map(|p| p.x).collect();
        xs.sort_by(|a, b| a.total_cmp(b));
        assert!(Vec2::new(xs[0], 0.0).is_close_to(Vec2::new(-0.5, 0.0)));
        assert!(Vec2::new(xs[1], 0.0).is_close_to(Vec2::new(0.5, 0.0)));
        assert!(contacts.as_slice().iter().all(|p| (p.y - 4.5).abs() < 1e-9));
    }

    #[test]
    fn corner_contact_yields_single_point() {
        let square = unit_box(0.0, 0.0);
        let diamond = unit_box(1.2071, 0.0).with_rotation(FRAC_PI_4);

        let contacts = ContactPoints::generate(&square, &diamond).unwrap();
        assert_eq!(contacts.len(), 1);
        let tip = contacts.as_slice()[0];
        assert!((tip.x - 0.5).abs() < 1e-3);
        assert!(tip.y.abs() < 1e-9);
    }

    #[test]
    fn generation_is_repeatable() {
        let a = unit_box(0.0, 0.0).with_rotation(0.2);
        let b = unit_box(0.8, 0.3).with_rotation(-0.4);

        let first = ContactPoints::generate(&a, &b).unwrap();
        for _ in 0..5 {
            assert_eq!(ContactPoints::generate(&a, &b).unwrap(), first);
        }
    }

    #[test]
    fn coincident_corners_are_not_double_counted() {
        // Corners of both boxes meet at (0.5, ±0.5); only A's copies are kept.
        let a = unit_box(0.0, 0.0);
        let b = unit_box(1.0, 0.0);
        let contacts = ContactPoints::generate(&a, &b).unwrap();
        assert_eq!(contacts.len(), 2);
        assert!(contacts.as_slice()[0].is_close_to(Vec2::new(0.5, 0.5)));
        assert!(contacts.as_slice()[1].is_close_to(Vec2::new(0.5, -0.5)));
    }
}
