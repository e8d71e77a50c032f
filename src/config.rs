//! Global configuration constants and runtime settings for the Gravity Kernel engine.

use serde::{Deserialize, Serialize};

use crate::utils::math::Vec2;

/// Default gravity vector applied in the physics world (screen space, Y-down).
pub const DEFAULT_GRAVITY: [f64; 2] = [0.0, 9.81];

/// Default macro timestep of one tick (in seconds).
pub const DEFAULT_TIME_STEP: f64 = 1.0 / 60.0;

/// Number of integration substeps performed per tick.
pub const DEFAULT_SUBSTEPS: u32 = 20;

/// Conversion factor between world meters and host view pixels.
pub const DEFAULT_PIXELS_PER_METER: f64 = 100.0;

/// Runtime settings for a [`PhysicsWorld`](crate::world::PhysicsWorld).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gravity: Vec2,
    pub time_step: f64,
    pub substeps: u32,
    pub pixels_per_meter: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            time_step: DEFAULT_TIME_STEP,
            substeps: DEFAULT_SUBSTEPS,
            pixels_per_meter: DEFAULT_PIXELS_PER_METER,
        }
    }
}

impl EngineConfig {
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    /// Replaces out-of-range values with the defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            log::warn!(
                "invalid time step {}, falling back to {DEFAULT_TIME_STEP}",
                self.time_step
            );
            self.time_step = DEFAULT_TIME_STEP;
        }
        if self.substeps == 0 {
            log::warn!("substeps must be positive, falling back to {DEFAULT_SUBSTEPS}");
            self.substeps = DEFAULT_SUBSTEPS;
        }
        if !self.gravity.is_finite() {
            log::warn!("non-finite gravity {:?}, falling back to default", self.gravity);
            self.gravity = Vec2::from_array(DEFAULT_GRAVITY);
        }
        if !(self.pixels_per_meter.is_finite() && self.pixels_per_meter > 0.0) {
            self.pixels_per_meter = DEFAULT_PIXELS_PER_METER;
        }
        self
    }

    /// Duration of a single substep.
    pub fn substep_dt(&self) -> f64 {
        self.time_step / self.substeps.max(1) as f64
    }
}
