use crate::{
    core::{body::Body, shape::Shape, types::Edge},
    error::{PhysicsError, Result},
    utils::{allocator::BodyHandle, math::Vec2},
};

/// Minimum translation vector between two overlapping bodies.
///
/// `normal` is a unit vector pointing from `body_a` toward `body_b`; moving
/// the bodies apart by `depth` along it removes the overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mtv {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub normal: Vec2,
    pub depth: f64,
}

#[derive(Debug, Clone, Copy)]
struct Projection {
    min: f64,
    max: f64,
}

/// Separating Axis Theorem test for convex polygons.
pub struct SATAlgorithm;

impl SATAlgorithm {
    /// Returns the minimum-overlap axis (oriented from A to B) and its depth.
    ///
    /// Every edge normal of both polygons is tried; the first axis with disjoint
    /// projections proves separation. Touching intervals count as separated.
    pub fn intersect_polygons(
        points_a: &[Vec2],
        axes_a: &[Edge],
        center_a: Vec2,
        points_b: &[Vec2],
        axes_b: &[Edge],
        center_b: Vec2,
    ) -> Option<(Vec2, f64)> {
        let mut min_overlap = f64::MAX;
        let mut min_axis = Vec2::ZERO;

        for edge in axes_a.iter().chain(axes_b) {
            let axis = edge.unit_normal();
            let proj_a = Self::project(axis, points_a);
            let proj_b = Self::project(axis, points_b);

            if proj_a.max <= proj_b.min || proj_b.max <= proj_a.min {
                return None;
            }

            let overlap = (proj_a.max - proj_b.min).min(proj_b.max - proj_a.min);
            if overlap < min_overlap {
                min_overlap = overlap;
                min_axis = axis;
            }
        }

        if (center_a - center_b).dot(min_axis) > 0.0 {
            min_axis = -min_axis;
        }

        Some((min_axis, min_overlap))
    }

    fn project(axis: Vec2, points: &[Vec2]) -> Projection {
        points.iter().fold(
            Projection {
                min: f64::MAX,
                max: -f64::MAX,
            },
            |acc, point| {
                let d = point.dot(axis);
                Projection {
                    min: acc.min.min(d),
                    max: acc.max.max(d),
                }
            },
        )
    }
}

pub struct NarrowPhase;

impl NarrowPhase {
    /// Exact overlap test for a candidate pair. `Ok(None)` means the bodies are apart.
    pub fn collide(
        handle_a: BodyHandle,
        body_a: &Body,
        handle_b: BodyHandle,
        body_b: &Body,
    ) -> Result<Option<Mtv>> {
        let hit = match (body_a.shape(), body_b.shape()) {
            (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => SATAlgorithm::intersect_polygons(
                &body_a.transformed_points(),
                &body_a.transformed_axes(),
                body_a.position(),
                &body_b.transformed_points(),
                &body_b.transformed_axes(),
                body_b.position(),
            ),
            #[allow(unreachable_patterns)]
            (a, b) => return Err(PhysicsError::UnsupportedShapePair(a.name(), b.name())),
        };

        Ok(hit.map(|(normal, depth)| Mtv {
            body_a: handle_a,
            body_b: handle_b,
            normal,
            depth,
        }))
    }
}
