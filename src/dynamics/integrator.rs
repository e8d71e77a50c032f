use crate::{
    core::body::Body,
    utils::{allocator::Arena, math::Vec2},
};

/// Fixed-substep semi-implicit Euler integrator.
#[derive(Debug, Clone)]
pub struct Integrator {
    /// Duration of one substep.
    pub dt: f64,
    pub substeps: u32,
}

impl Integrator {
    pub fn new(time_step: f64, substeps: u32) -> Self {
        let substeps = substeps.max(1);
        Self {
            dt: time_step / substeps as f64,
            substeps,
        }
    }

    /// Adds `gravity * dt` to every dynamic body's velocity.
    pub fn apply_gravity(&self, bodies: &mut Arena<Body>, gravity: Vec2) {
        for (_, body) in bodies.iter_mut() {
            body.apply_acceleration(gravity, self.dt);
        }
    }

    /// Advances poses by one substep and refreshes the cached geometry.
    pub fn integrate(&self, bodies: &mut Arena<Body>) {
        for (_, body) in bodies.iter_mut() {
            body.update(self.dt);
            body.refresh_geometry();
        }
    }
}
