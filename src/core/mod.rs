//! Core types describing bodies, their shapes, and shared geometric data.

pub mod body;
pub mod shape;
pub mod types;

pub use body::Body;
pub use shape::Shape;
pub use types::{Aabb, Edge, MassProperties, Material, MaterialPairProperties};
