//! Gravity Kernel – 2D rigid-body physics for oriented rectangles.
//!
//! The crate provides a bounding-box broad phase, SAT narrow phase, contact
//! point generation and an impulse solver with restitution and Coulomb
//! friction, stepped by a fixed-substep integrator. [`Simulation`] wraps a
//! [`PhysicsWorld`] for use from a background driver thread.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

use std::{sync::Arc, time::Duration};

use parking_lot::{Mutex, RwLock};

pub use glam::DVec2;

pub use collision::{
    broadphase::BroadPhase,
    contact::{CollisionManifold, ContactPoints, ContactSet},
    narrowphase::{Mtv, NarrowPhase, SATAlgorithm},
};
pub use config::EngineConfig;
pub use crate::core::{
    body::Body,
    shape::Shape,
    types::{Aabb, Edge, MassProperties, Material, MaterialPairProperties},
};
pub use dynamics::{
    integrator::Integrator,
    solver::{ImpulseSolver, ResolutionStats},
};
pub use error::{PhysicsError, Result};
pub use utils::{
    allocator::{Arena, BodyHandle},
    math::{Vec2, Vec2Ext},
    profiling::TickProfiler,
};
pub use world::{
    BodySnapshot, PhysicsWorld, SharedSnapshot, SharedWorld, SimulationDriver, WorldSnapshot,
};

/// Thread-safe handle owning a [`PhysicsWorld`] and its optional periodic driver.
///
/// All access to the world goes through one mutex, which the driver holds for
/// the duration of each tick. Readers that must not wait on a tick can use
/// [`Simulation::latest_snapshot`] instead.
pub struct Simulation {
    world: SharedWorld,
    snapshot: SharedSnapshot,
    driver: Option<SimulationDriver>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Simulation {
    pub fn new(config: EngineConfig) -> Self {
        let world = PhysicsWorld::with_config(config);
        let snapshot = world.snapshot();
        Self {
            world: Arc::new(Mutex::new(world)),
            snapshot: Arc::new(RwLock::new(snapshot)),
            driver: None,
        }
    }

    pub fn add_body(&self, body: Body) -> BodyHandle {
        self.world.lock().add_body(body)
    }

    pub fn add_bodies<I>(&self, bodies: I) -> Vec<BodyHandle>
    where
        I: IntoIterator<Item = Body>,
    {
        self.world.lock().add_bodies(bodies)
    }

    pub fn remove_body(&self, handle: BodyHandle) -> Result<Body> {
        self.world.lock().remove_body(handle)
    }

    /// Runs a single tick synchronously and publishes its snapshot.
    pub fn step(&self) -> Result<()> {
        let latest = {
            let mut world = self.world.lock();
            world.step()?;
            world.snapshot()
        };
        *self.snapshot.write() = latest;
        Ok(())
    }

    /// Starts ticking on a background thread every `time_step` seconds.
    ///
    /// `on_tick` runs on the driver thread after each tick with the freshly
    /// published snapshot. A running driver is stopped first.
    pub fn start<F>(&mut self, on_tick: F) -> Result<()>
    where
        F: FnMut(&WorldSnapshot) + Send + 'static,
    {
        self.stop();
        let period = Duration::from_secs_f64(self.world.lock().config().time_step);
        self.driver = Some(SimulationDriver::spawn(
            Arc::clone(&self.world),
            Arc::clone(&self.snapshot),
            period,
            Box::new(on_tick),
        )?);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            driver.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver
            .as_ref()
            .is_some_and(SimulationDriver::is_running)
    }

    /// Runs `f` with exclusive access to the world, between ticks.
    pub fn with_world<R>(&self, f: impl FnOnce(&mut PhysicsWorld) -> R) -> R {
        f(&mut self.world.lock())
    }

    /// Snapshot of the current state, taken under the world lock.
    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.lock().snapshot()
    }

    /// Snapshot published by the last completed tick.
    pub fn latest_snapshot(&self) -> WorldSnapshot {
        self.snapshot.read().clone()
    }

    pub fn world(&self) -> SharedWorld {
        Arc::clone(&self.world)
    }

    pub fn set_parallel_enabled(&self, enabled: bool) {
        self.world.lock().set_parallel_enabled(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.world.lock().parallel_enabled()
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}
