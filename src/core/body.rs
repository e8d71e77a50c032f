use super::{
    shape::{validate_dimensions, Shape},
    types::{Aabb, Edge, MassProperties, Material},
};
use crate::{
    error::{PhysicsError, Result},
    utils::math::{polygon_contains, Vec2, Vec2Ext},
};

/// World-space geometry derived from shape and pose.
#[derive(Debug, Clone, Copy)]
struct GeometryCache {
    points: [Vec2; 4],
    aabb: Aabb,
    dirty: bool,
}

/// Rigid body state: pose, motion, mass properties, material and cached geometry.
///
/// Pose setters only flag the cached geometry as stale. Read accessors compute
/// fresh values while the flag is set, and [`Body::refresh_geometry`] stores
/// them again; the integrator calls it after every pose update.
#[derive(Debug, Clone)]
pub struct Body {
    shape: Shape,
    position: Vec2,
    rotation: f64,
    velocity: Vec2,
    angular_velocity: f64,
    mass_properties: MassProperties,
    material: Material,
    is_static: bool,
    geometry: GeometryCache,
}

impl Body {
    /// Creates a rectangle with the uniform solid-rectangle inertia.
    pub fn rectangle(width: f64, height: f64, mass: f64, is_static: bool) -> Result<Self> {
        let shape = Shape::rectangle(width, height)?;
        validate_mass(mass, is_static)?;

        let mut body = Self {
            shape,
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass_properties: MassProperties::for_rectangle(width, height, mass, is_static),
            material: Material::default(),
            is_static,
            geometry: GeometryCache {
                points: [Vec2::ZERO; 4],
                aabb: Aabb::new(0.0, 0.0, 0.0, 0.0),
                dirty: true,
            },
        };
        body.refresh_geometry();
        Ok(body)
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self.refresh_geometry();
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.set_rotation(rotation);
        self.refresh_geometry();
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity);
        self
    }

    pub fn with_angular_velocity(mut self, omega: f64) -> Self {
        self.set_angular_velocity(omega);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn width(&self) -> f64 {
        match self.shape {
            Shape::Rectangle { width, .. } => width,
        }
    }

    pub fn height(&self) -> f64 {
        match self.shape {
            Shape::Rectangle { height, .. } => height,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn mass_properties(&self) -> &MassProperties {
        &self.mass_properties
    }

    pub fn mass(&self) -> f64 {
        self.mass_properties.mass
    }

    pub fn inertia(&self) -> f64 {
        self.mass_properties.inertia
    }

    pub fn inverse_mass(&self) -> f64 {
        self.mass_properties.inverse_mass
    }

    pub fn inverse_inertia(&self) -> f64 {
        self.mass_properties.inverse_inertia
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.invalidate_geometry();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.invalidate_geometry();
    }

    /// Static bodies keep a zero velocity.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, omega: f64) {
        if self.is_static {
            return;
        }
        self.angular_velocity = omega;
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Updates the mass and re-derives inertia from the current shape.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        validate_mass(mass, self.is_static)?;
        self.mass_properties.mass = mass;
        self.mass_properties.inertia = self.shape.inertia(mass);
        self.mass_properties.recompute_inverses(self.is_static);
        Ok(())
    }

    /// Overrides the derived inertia until the next mass or size change.
    pub fn set_inertia(&mut self, inertia: f64) -> Result<()> {
        if !self.is_static && !(inertia.is_finite() && inertia > 0.0) {
            return Err(PhysicsError::InvalidInertia(inertia));
        }
        self.mass_properties.inertia = inertia;
        self.mass_properties.recompute_inverses(self.is_static);
        Ok(())
    }

    pub fn set_size(&mut self, width: f64, height: f64) -> Result<()> {
        validate_dimensions(width, height)?;
        self.shape = Shape::Rectangle { width, height };
        self.mass_properties.inertia = self.shape.inertia(self.mass_properties.mass);
        self.mass_properties.recompute_inverses(self.is_static);
        self.invalidate_geometry();
        Ok(())
    }

    /// Semi-implicit Euler position update. Velocity must already include this step's forces.
    pub fn update(&mut self, dt: f64) {
        if self.is_static {
            return;
        }
        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;
        self.invalidate_geometry();
    }

    pub fn apply_acceleration(&mut self, acceleration: Vec2, dt: f64) {
        if self.is_static {
            return;
        }
        self.velocity += acceleration * dt;
    }

    /// Applies `impulse` at `contact_vector` (contact point relative to the body center).
    pub fn apply_impulse(&mut self, impulse: Vec2, contact_vector: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.mass_properties.inverse_mass;
        self.angular_velocity += contact_vector.cross(impulse) * self.mass_properties.inverse_inertia;
    }

    /// Velocity of the material point at `contact_vector` from the center.
    pub fn velocity_at(&self, contact_vector: Vec2) -> Vec2 {
        self.velocity + contact_vector.perp() * self.angular_velocity
    }

    pub fn invalidate_geometry(&mut self) {
        self.geometry.dirty = true;
    }

    pub fn needs_geometry_refresh(&self) -> bool {
        self.geometry.dirty
    }

    /// Recomputes and stores world corners and bounding box if the pose changed.
    pub fn refresh_geometry(&mut self) {
        if !self.geometry.dirty {
            return;
        }
        let points = self.compute_points();
        self.geometry = GeometryCache {
            points,
            aabb: Aabb::from_points(&points),
            dirty: false,
        };
    }

    /// World-space corners: local corners rotated by `rotation`, then translated by `position`.
    pub fn transformed_points(&self) -> [Vec2; 4] {
        if self.geometry.dirty {
            self.compute_points()
        } else {
            self.geometry.points
        }
    }

    /// World-space edges `points[i] -> points[(i + 1) % 4]`.
    pub fn transformed_axes(&self) -> [Edge; 4] {
        let points = self.transformed_points();
        std::array::from_fn(|i| Edge::new(points[i], points[(i + 1) % points.len()]))
    }

    pub fn aabb(&self) -> Aabb {
        if self.geometry.dirty {
            self.calculate_aabb()
        } else {
            self.geometry.aabb
        }
    }

    pub fn calculate_aabb(&self) -> Aabb {
        Aabb::from_points(&self.transformed_points())
    }

    /// Edges and the point on their inner side count as inside.
    pub fn is_inside(&self, point: Vec2) -> bool {
        polygon_contains(&self.transformed_points(), point)
    }

    fn compute_points(&self) -> [Vec2; 4] {
        self.shape
            .local_corners()
            .map(|corner| corner.rotated(self.rotation) + self.position)
    }
}

fn validate_mass(mass: f64, is_static: bool) -> Result<()> {
    if is_static {
        if mass.is_finite() && mass >= 0.0 {
            return Ok(());
        }
    } else if mass.is_finite() && mass > 0.0 {
        return Ok(());
    }
    Err(PhysicsError::InvalidMass(mass))
}
