//! Error types for the physics kernel.

use thiserror::Error;

use crate::utils::allocator::BodyHandle;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Narrow-phase or contact generation was asked to handle a shape pair it has no algorithm for.
    #[error("unsupported shape pair: {0} vs {1}")]
    UnsupportedShapePair(&'static str, &'static str),
    #[error("invalid mass {0}: dynamic bodies need a positive finite mass")]
    InvalidMass(f64),
    #[error("invalid inertia {0}: dynamic bodies need a positive finite inertia")]
    InvalidInertia(f64),
    #[error("invalid rectangle dimensions {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("body {0:?} not found")]
    BodyNotFound(BodyHandle),
    #[error("failed to spawn simulation driver: {0}")]
    DriverSpawn(String),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
