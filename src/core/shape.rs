use serde::{Deserialize, Serialize};

use super::types::rectangle_inertia;
use crate::{
    error::{PhysicsError, Result},
    utils::math::Vec2,
};

/// Enumeration of supported body geometries.
///
/// Collision routines match on shape pairs, so adding a variant only requires
/// teaching the narrow-phase and contact generation about it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle { width: f64, height: f64 },
}

impl Shape {
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Shape::Rectangle { width, height })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Rectangle { .. } => "rectangle",
        }
    }

    /// Corners in body space, in edge order.
    pub fn local_corners(&self) -> [Vec2; 4] {
        match *self {
            Shape::Rectangle { width, height } => {
                let (hw, hh) = (width * 0.5, height * 0.5);
                [
                    Vec2::new(-hw, hh),
                    Vec2::new(hw, hh),
                    Vec2::new(hw, -hh),
                    Vec2::new(-hw, -hh),
                ]
            }
        }
    }

    pub fn inertia(&self, mass: f64) -> f64 {
        match *self {
            Shape::Rectangle { width, height } => rectangle_inertia(width, height, mass),
        }
    }
}

pub(crate) fn validate_dimensions(width: f64, height: f64) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(PhysicsError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_rejects_degenerate_sizes() {
        assert!(Shape::rectangle(1.0, 2.0).is_ok());
        assert_eq!(
            Shape::rectangle(0.0, 2.0),
            Err(PhysicsError::InvalidDimensions {
                width: 0.0,
                height: 2.0
            })
        );
        assert!(Shape::rectangle(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn corners_span_half_extents() {
        let shape = Shape::rectangle(4.0, 2.0).unwrap();
        let corners = shape.local_corners();
        assert_eq!(corners[0], Vec2::new(-2.0, 1.0));
        assert_eq!(corners[2], Vec2::new(2.0, -1.0));
    }
}
