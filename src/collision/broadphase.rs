#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    core::{body::Body, types::Aabb},
    utils::allocator::{Arena, BodyHandle},
};

/// Bounding-box snapshot of one body taken at the start of a pass.
#[derive(Debug, Clone, Copy)]
struct BroadPhaseEntry {
    handle: BodyHandle,
    aabb: Aabb,
    is_static: bool,
}

/// Brute-force broad phase returning body pairs whose bounding boxes overlap.
///
/// Every unordered pair is tested, so the cost is O(n²) per pass. That is fine
/// for tens of bodies; there is no spatial index behind it.
#[derive(Debug, Clone, Default)]
pub struct BroadPhase {
    parallel: bool,
}

impl BroadPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates pairs on the rayon pool when the `parallel` feature is built in.
    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Pairs over every body in arena slot order.
    pub fn get_potential_pairs(&self, bodies: &Arena<Body>) -> Vec<(BodyHandle, BodyHandle)> {
        let order: Vec<BodyHandle> = bodies.iter().map(|(handle, _)| handle).collect();
        self.get_ordered_pairs(bodies, &order)
    }

    /// Pairs are `(earlier, later)` following `order`; pairs of two static bodies
    /// are skipped and stale handles are ignored.
    pub fn get_ordered_pairs(
        &self,
        bodies: &Arena<Body>,
        order: &[BodyHandle],
    ) -> Vec<(BodyHandle, BodyHandle)> {
        let entries: Vec<BroadPhaseEntry> = order
            .iter()
            .filter_map(|&handle| {
                bodies.get(handle).map(|body| BroadPhaseEntry {
                    handle,
                    aabb: body.aabb(),
                    is_static: body.is_static(),
                })
            })
            .collect();

        if self.parallel {
            Self::pairs_parallel(&entries)
        } else {
            Self::pairs_sequential(&entries)
        }
    }

    fn pairs_sequential(entries: &[BroadPhaseEntry]) -> Vec<(BodyHandle, BodyHandle)> {
        let mut pairs = Vec::new();
        for (i, first) in entries.iter().enumerate() {
            for second in &entries[i + 1..] {
                if let Some(pair) = Self::test_pair(first, second) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }

    #[cfg(feature = "parallel")]
    fn pairs_parallel(entries: &[BroadPhaseEntry]) -> Vec<(BodyHandle, BodyHandle)> {
        let count = entries.len();
        (0..count)
            .into_par_iter()
            .flat_map_iter(|i| {
                (i + 1..count).filter_map(move |j| Self::test_pair(&entries[i], &entries[j]))
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn pairs_parallel(entries: &[BroadPhaseEntry]) -> Vec<(BodyHandle, BodyHandle)> {
        Self::pairs_sequential(entries)
    }

    fn test_pair(a: &BroadPhaseEntry, b: &BroadPhaseEntry) -> Option<(BodyHandle, BodyHandle)> {
        if a.is_static && b.is_static {
            return None;
        }
        a.aabb.collides(&b.aabb).then_some((a.handle, b.handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::Vec2;

    fn boxed(x: f64, y: f64, is_static: bool) -> Body {
        Body::rectangle(1.0, 1.0, 1.0, is_static)
            .unwrap()
            .with_position(Vec2::new(x, y))
    }

    #[test]
    fn static_pairs_are_never_reported() {
        let mut bodies = Arena::new();
        bodies.insert(boxed(0.0, 0.0, true));
        bodies.insert(boxed(0.5, 0.0, true));

        assert!(BroadPhase::new().get_potential_pairs(&bodies).is_empty());
    }

    #[test]
    fn touching_boxes_are_not_candidates() {
        let mut bodies = Arena::new();
        bodies.insert(boxed(0.0, 0.0, false));
        bodies.insert(boxed(1.0, 0.0, false));

        assert!(BroadPhase::new().get_potential_pairs(&bodies).is_empty());
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let mut bodies = Arena::new();
        for i in 0..12 {
            bodies.insert(boxed(i as f64 * 0.6, (i % 3) as f64 * 0.4, i % 4 == 0));
        }

        let sequential = BroadPhase::new().get_potential_pairs(&bodies);
        let mut parallel_phase = BroadPhase::new();
        parallel_phase.set_parallel(true);
        let parallel = parallel_phase.get_potential_pairs(&bodies);

        assert!(!sequential.is_empty());
        assert_eq!(sequential, parallel);
        assert!(sequential.iter().all(|(a, b)| a.index() < b.index()));
    }

    #[test]
    fn ordered_pairs_follow_the_given_order() {
        let mut bodies = Arena::new();
        let first = bodies.insert(boxed(0.0, 0.0, false));
        let second = bodies.insert(boxed(0.5, 0.0, false));

        let phase = BroadPhase::new();
        assert_eq!(
            phase.get_ordered_pairs(&bodies, &[second, first]),
            vec![(second, first)]
        );

        bodies.remove(first);
        assert!(phase.get_ordered_pairs(&bodies, &[second, first]).is_empty());
    }
}
