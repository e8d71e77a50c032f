use std::time::Instant;

use crate::{
    collision::{broadphase::BroadPhase, contact::CollisionManifold, narrowphase::NarrowPhase},
    config::EngineConfig,
    core::body::Body,
    dynamics::{
        integrator::Integrator,
        solver::{ImpulseSolver, ResolutionStats},
    },
    error::{PhysicsError, Result},
    utils::{
        allocator::{Arena, BodyHandle},
        logging::ScopedTimer,
        math::Vec2,
        profiling::{PhaseTimer, TickProfiler},
    },
};

pub mod driver;
pub mod snapshot;

pub use driver::{SharedSnapshot, SharedWorld, SimulationDriver, TickCallback};
pub use snapshot::{BodySnapshot, WorldSnapshot};

/// Body collection plus the fixed-substep stepping pipeline.
///
/// One [`PhysicsWorld::step`] is a full tick: `substeps` rounds of gravity,
/// one collision pass (broad, narrow, contacts, resolution) and pose integration.
pub struct PhysicsWorld {
    bodies: Arena<Body>,
    insertion_order: Vec<BodyHandle>,
    config: EngineConfig,
    integrator: Integrator,
    broadphase: BroadPhase,
    profiler: TickProfiler,
    tick_count: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let config = config.sanitized();
        Self {
            bodies: Arena::new(),
            insertion_order: Vec::new(),
            config,
            integrator: Integrator::new(config.time_step, config.substeps),
            broadphase: BroadPhase::new(),
            profiler: TickProfiler::default(),
            tick_count: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.broadphase.set_parallel(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.broadphase.is_parallel()
    }

    pub fn add_body(&mut self, mut body: Body) -> BodyHandle {
        body.refresh_geometry();
        let handle = self.bodies.insert(body);
        self.insertion_order.push(handle);
        handle
    }

    pub fn add_bodies<I>(&mut self, bodies: I) -> Vec<BodyHandle>
    where
        I: IntoIterator<Item = Body>,
    {
        bodies.into_iter().map(|body| self.add_body(body)).collect()
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body> {
        let body = self
            .bodies
            .remove(handle)
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        self.insertion_order.retain(|&h| h != handle);
        Ok(body)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    /// Bodies in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.insertion_order
            .iter()
            .filter_map(|&handle| self.bodies.get(handle).map(|body| (handle, body)))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Topmost body containing `point`; the most recently added one wins.
    pub fn body_at(&self, point: Vec2) -> Option<BodyHandle> {
        self.insertion_order.iter().rev().copied().find(|&handle| {
            self.bodies
                .get(handle)
                .is_some_and(|body| body.is_inside(point))
        })
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_tick_profile(&self) -> &TickProfiler {
        &self.profiler
    }

    /// Runs one full tick. An error aborts the tick; bodies keep the state reached so far.
    pub fn step(&mut self) -> Result<()> {
        let _timer = ScopedTimer::new("world::step");
        let started = Instant::now();

        self.profiler.reset();
        self.profiler.body_count = self.bodies.len();
        self.profiler.substeps = self.integrator.substeps;

        for _ in 0..self.integrator.substeps {
            self.substep()?;
        }

        self.tick_count += 1;
        self.profiler.total_tick_time = started.elapsed();
        self.profiler.report();
        Ok(())
    }

    fn substep(&mut self) -> Result<()> {
        self.integrator
            .apply_gravity(&mut self.bodies, self.config.gravity);

        self.resolve_collisions()?;

        let _timer = PhaseTimer::new(&mut self.profiler.integrator_time);
        self.integrator.integrate(&mut self.bodies);
        Ok(())
    }

    /// One collision pass over the current poses: separate, generate contacts, apply impulses.
    pub fn resolve_collisions(&mut self) -> Result<ResolutionStats> {
        let pairs = {
            let _timer = PhaseTimer::new(&mut self.profiler.broad_phase_time);
            self.broadphase
                .get_ordered_pairs(&self.bodies, &self.insertion_order)
        };
        self.profiler.candidate_pairs += pairs.len();

        let mut stats = ResolutionStats::default();
        for (handle_a, handle_b) in pairs {
            let Some((body_a, body_b)) = self.bodies.get2_mut(handle_a, handle_b) else {
                continue;
            };

            let mtv = {
                let _timer = PhaseTimer::new(&mut self.profiler.narrow_phase_time);
                NarrowPhase::collide(handle_a, body_a, handle_b, body_b)?
            };
            let Some(mtv) = mtv else {
                continue;
            };

            let _timer = PhaseTimer::new(&mut self.profiler.solver_time);
            ImpulseSolver::separate_bodies(body_a, body_b, &mtv);
            let manifold = CollisionManifold::generate(mtv, body_a, body_b)?;
            stats.merge(&ImpulseSolver::resolve_collision(body_a, body_b, &manifold));
        }

        self.profiler.collisions += stats.collisions;
        self.profiler.contact_points += stats.contact_points;
        self.profiler.normal_impulse_sum += stats.normal_impulse_sum;
        self.profiler.friction_impulse_sum += stats.friction_impulse_sum;
        Ok(stats)
    }

    /// Collision manifolds for the current poses, without moving anything.
    pub fn collect_manifolds(&self) -> Result<Vec<CollisionManifold>> {
        let mut manifolds = Vec::new();
        let pairs = self
            .broadphase
            .get_ordered_pairs(&self.bodies, &self.insertion_order);
        for (handle_a, handle_b) in pairs {
            let (Some(body_a), Some(body_b)) = (self.bodies.get(handle_a), self.bodies.get(handle_b))
            else {
                continue;
            };
            if let Some(mtv) = NarrowPhase::collide(handle_a, body_a, handle_b, body_b)? {
                manifolds.push(CollisionManifold::generate(mtv, body_a, body_b)?);
            }
        }
        Ok(manifolds)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick_count,
            bodies: self
                .bodies()
                .map(|(handle, body)| BodySnapshot::capture(handle, body))
                .collect(),
        }
    }
}
