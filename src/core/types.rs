use serde::{Deserialize, Serialize};

use crate::utils::math::Vec2;

/// Axis-aligned bounding box in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing every point. Empty input yields an inverted box.
    pub fn from_points(points: &[Vec2]) -> Self {
        points.iter().fold(
            Self::new(f64::MAX, f64::MAX, -f64::MAX, -f64::MAX),
            |acc, p| Self {
                min_x: acc.min_x.min(p.x),
                min_y: acc.min_y.min(p.y),
                max_x: acc.max_x.max(p.x),
                max_y: acc.max_y.max(p.y),
            },
        )
    }

    /// Strict overlap: boxes sharing only an edge do not collide.
    pub fn collides(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Strict interior test: boundary points are outside.
    pub fn is_inside(&self, point: Vec2) -> bool {
        self.min_x < point.x && self.max_x > point.x && self.min_y < point.y && self.max_y > point.y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }
}

/// World-space polygon edge running from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn vector(&self) -> Vec2 {
        self.end - self.start
    }

    /// Unit normal of the edge (left perpendicular of the edge vector).
    pub fn unit_normal(&self) -> Vec2 {
        self.vector().perp().normalize()
    }
}

/// Material coefficients that affect interactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub restitution: f64,
    pub static_friction: f64,
    pub dynamic_friction: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.2,
            static_friction: 0.6,
            dynamic_friction: 0.4,
        }
    }
}

impl Material {
    pub fn rubber() -> Self {
        Self {
            restitution: 0.8,
            static_friction: 1.0,
            dynamic_friction: 0.8,
        }
    }

    pub fn ice() -> Self {
        Self {
            restitution: 0.05,
            static_friction: 0.05,
            dynamic_friction: 0.03,
        }
    }

    pub fn frictionless(restitution: f64) -> Self {
        Self {
            restitution,
            static_friction: 0.0,
            dynamic_friction: 0.0,
        }
    }

    pub fn combine_pair(a: &Self, b: &Self) -> MaterialPairProperties {
        MaterialPairProperties {
            restitution: a.restitution.min(b.restitution),
            static_friction: a.static_friction.hypot(b.static_friction),
            dynamic_friction: a.dynamic_friction.hypot(b.dynamic_friction),
        }
    }
}

/// Coefficients for one contacting pair.
///
/// Restitution takes the smaller value; friction coefficients combine as
/// `sqrt(a² + b²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialPairProperties {
    pub restitution: f64,
    pub static_friction: f64,
    pub dynamic_friction: f64,
}

/// Mass and rotational inertia together with their cached inverses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    pub mass: f64,
    pub inertia: f64,
    pub inverse_mass: f64,
    pub inverse_inertia: f64,
}

impl MassProperties {
    /// Uniform solid rectangle: `I = m (w² + h²) / 12`.
    pub fn for_rectangle(width: f64, height: f64, mass: f64, is_static: bool) -> Self {
        let mut props = Self {
            mass,
            inertia: rectangle_inertia(width, height, mass),
            inverse_mass: 0.0,
            inverse_inertia: 0.0,
        };
        props.recompute_inverses(is_static);
        props
    }

    /// Static bodies always carry zero inverses.
    pub fn recompute_inverses(&mut self, is_static: bool) {
        if is_static {
            self.inverse_mass = 0.0;
            self.inverse_inertia = 0.0;
        } else {
            self.inverse_mass = 1.0 / self.mass;
            self.inverse_inertia = 1.0 / self.inertia;
        }
    }
}

pub fn rectangle_inertia(width: f64, height: f64, mass: f64) -> f64 {
    mass * (width * width + height * height) / 12.0
}
