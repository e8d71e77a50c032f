//! Collision pipeline: bounding-box broad phase, SAT narrow phase and contact generation.

pub mod broadphase;
pub mod contact;
pub mod narrowphase;

pub use broadphase::BroadPhase;
pub use contact::{CollisionManifold, ContactPoints, ContactSet};
pub use narrowphase::{Mtv, NarrowPhase, SATAlgorithm};
