use crate::{
    collision::{contact::CollisionManifold, narrowphase::Mtv},
    core::{body::Body, types::Material},
    dynamics::friction::apply_friction,
    utils::math::Vec2,
};

/// Impulse totals gathered while resolving collisions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ResolutionStats {
    pub collisions: usize,
    pub contact_points: usize,
    pub normal_impulse_sum: f64,
    pub friction_impulse_sum: f64,
}

impl ResolutionStats {
    pub fn merge(&mut self, other: &Self) {
        self.collisions += other.collisions;
        self.contact_points += other.contact_points;
        self.normal_impulse_sum += other.normal_impulse_sum;
        self.friction_impulse_sum += other.friction_impulse_sum;
    }
}

/// Per-contact quantities shared by the normal and friction passes.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ContactLever {
    pub r_a: Vec2,
    pub r_b: Vec2,
}

impl ContactLever {
    pub(crate) fn new(contact: Vec2, body_a: &Body, body_b: &Body) -> Self {
        Self {
            r_a: contact - body_a.position(),
            r_b: contact - body_b.position(),
        }
    }

    /// Velocity of B relative to A at the contact point.
    pub(crate) fn relative_velocity(&self, body_a: &Body, body_b: &Body) -> Vec2 {
        body_b.velocity_at(self.r_b) - body_a.velocity_at(self.r_a)
    }

    /// Effective inverse mass along `direction`.
    pub(crate) fn effective_inverse_mass(&self, body_a: &Body, body_b: &Body, direction: Vec2) -> f64 {
        let ra_perp = self.r_a.perp().dot(direction);
        let rb_perp = self.r_b.perp().dot(direction);
        body_a.inverse_mass()
            + body_b.inverse_mass()
            + ra_perp * ra_perp * body_a.inverse_inertia()
            + rb_perp * rb_perp * body_b.inverse_inertia()
    }
}

/// Collision response: positional de-penetration plus restitution and friction impulses.
pub struct ImpulseSolver;

impl ImpulseSolver {
    /// Pushes the bodies apart along the MTV normal.
    ///
    /// A static partner leaves the full depth to the dynamic body; two dynamic
    /// bodies move half the depth each. Masses are not taken into account.
    pub fn separate_bodies(body_a: &mut Body, body_b: &mut Body, mtv: &Mtv) {
        let normal = mtv.normal;
        match (body_a.is_static(), body_b.is_static()) {
            (true, true) => {}
            (false, true) => body_a.translate(-normal * mtv.depth),
            (true, false) => body_b.translate(normal * mtv.depth),
            (false, false) => {
                let half = mtv.depth * 0.5;
                body_a.translate(-normal * half);
                body_b.translate(normal * half);
            }
        }
    }

    /// Applies restitution impulses for every contact, then friction impulses.
    ///
    /// Impulses within one pass are computed from the same velocities and applied
    /// together afterwards, so contact order does not bias the result.
    pub fn resolve_collision(
        body_a: &mut Body,
        body_b: &mut Body,
        manifold: &CollisionManifold,
    ) -> ResolutionStats {
        let contacts = manifold.contacts.as_slice();
        let mut stats = ResolutionStats {
            collisions: 1,
            contact_points: contacts.len(),
            ..ResolutionStats::default()
        };
        if contacts.is_empty() {
            return stats;
        }

        let pair = Material::combine_pair(body_a.material(), body_b.material());
        let normal = manifold.normal();
        let count = contacts.len() as f64;

        let mut levers = [ContactLever::default(); 2];
        let mut impulses = [Vec2::ZERO; 2];
        let mut magnitudes = [0.0_f64; 2];

        for (i, &contact) in contacts.iter().enumerate() {
            let lever = ContactLever::new(contact, body_a, body_b);
            levers[i] = lever;

            let normal_speed = lever.relative_velocity(body_a, body_b).dot(normal);
            if normal_speed > 0.0 {
                continue;
            }

            let denominator = lever.effective_inverse_mass(body_a, body_b, normal);
            let j = -(1.0 + pair.restitution) * normal_speed / denominator / count;
            magnitudes[i] = j;
            impulses[i] = normal * j;
        }

        for i in 0..contacts.len() {
            body_a.apply_impulse(-impulses[i], levers[i].r_a);
            body_b.apply_impulse(impulses[i], levers[i].r_b);
            stats.normal_impulse_sum += magnitudes[i].abs();
        }

        stats.friction_impulse_sum = apply_friction(
            body_a,
            body_b,
            contacts,
            normal,
            &magnitudes[..contacts.len()],
            &pair,
        );
        stats
    }
}
