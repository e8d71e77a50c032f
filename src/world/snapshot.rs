use serde::{Deserialize, Serialize};

use crate::{
    core::{body::Body, types::Aabb},
    utils::{
        allocator::BodyHandle,
        math::{polygon_contains, rad_to_deg, Vec2},
    },
};

/// Immutable copy of one body's render-relevant state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub handle: BodyHandle,
    pub position: Vec2,
    pub rotation: f64,
    pub corners: [Vec2; 4],
    pub aabb: Aabb,
    pub is_static: bool,
}

impl BodySnapshot {
    pub fn capture(handle: BodyHandle, body: &Body) -> Self {
        Self {
            handle,
            position: body.position(),
            rotation: body.rotation(),
            corners: body.transformed_points(),
            aabb: body.aabb(),
            is_static: body.is_static(),
        }
    }

    pub fn rotation_degrees(&self) -> f64 {
        rad_to_deg(self.rotation)
    }

    /// Corners converted to view units.
    pub fn scaled_outline(&self, pixels_per_meter: f64) -> [Vec2; 4] {
        self.corners.map(|corner| corner * pixels_per_meter)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        polygon_contains(&self.corners, point)
    }
}

/// State of the whole world after a completed tick, safe to read from any thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    /// Bodies in insertion order.
    pub bodies: Vec<BodySnapshot>,
}

impl WorldSnapshot {
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&BodySnapshot> {
        self.bodies.iter().find(|body| body.handle == handle)
    }

    /// Topmost body under `point`; later bodies are drawn over earlier ones.
    pub fn body_at(&self, point: Vec2) -> Option<&BodySnapshot> {
        self.bodies.iter().rev().find(|body| body.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn snapshot_of(bodies: &[Body]) -> WorldSnapshot {
        WorldSnapshot {
            tick: 3,
            bodies: bodies
                .iter()
                .enumerate()
                .map(|(i, body)| BodySnapshot::capture(BodyHandle::new(i, 0), body))
                .collect(),
        }
    }

    #[test]
    fn capture_copies_pose_and_geometry() {
        let body = Body::rectangle(2.0, 1.0, 1.0, false)
            .unwrap()
            .with_position(Vec2::new(1.0, 2.0))
            .with_rotation(std::f64::consts::FRAC_PI_2);
        let snapshot = BodySnapshot::capture(BodyHandle::new(0, 0), &body);

        assert_eq!(snapshot.position, Vec2::new(1.0, 2.0));
        assert_abs_diff_eq!(snapshot.rotation_degrees(), 90.0, epsilon = 1e-9);
        assert_eq!(snapshot.corners, body.transformed_points());
        assert_abs_diff_eq!(snapshot.aabb.width(), 1.0, epsilon = 1e-9);

        let outline = snapshot.scaled_outline(100.0);
        assert_abs_diff_eq!(outline[0].x, snapshot.corners[0].x * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn hit_testing_prefers_last_body() {
        let bottom = Body::rectangle(4.0, 4.0, 1.0, true).unwrap();
        let top = Body::rectangle(1.0, 1.0, 1.0, false).unwrap();
        let snapshot = snapshot_of(&[bottom, top]);

        assert_eq!(snapshot.body_at(Vec2::ZERO).unwrap().handle.index(), 1);
        assert_eq!(snapshot.body_at(Vec2::new(1.5, 1.5)).unwrap().handle.index(), 0);
        assert!(snapshot.body_at(Vec2::new(5.0, 5.0)).is_none());
    }
}
