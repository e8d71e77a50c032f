//! Simulation dynamics: substep integration and impulse-based collision response.

pub mod friction;
pub mod integrator;
pub mod solver;

pub use friction::apply_friction;
pub use integrator::Integrator;
pub use solver::{ImpulseSolver, ResolutionStats};
