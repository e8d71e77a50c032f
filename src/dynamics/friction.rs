use crate::{
    core::{body::Body, types::MaterialPairProperties},
    dynamics::solver::ContactLever,
    utils::math::{Vec2, Vec2Ext},
};

/// Applies Coulomb friction for each contact, reusing the normal impulse magnitudes.
///
/// The tangential impulse is used as-is while it stays inside the static cone
/// (`|jt| <= j * static_friction`); otherwise it is replaced by the kinetic
/// impulse `-j * dynamic_friction` along the tangent. Returns the sum of the
/// applied impulse magnitudes. Only the first two contacts are used.
pub fn apply_friction(
    body_a: &mut Body,
    body_b: &mut Body,
    contacts: &[Vec2],
    normal: Vec2,
    normal_impulses: &[f64],
    material: &MaterialPairProperties,
) -> f64 {
    let contacts = &contacts[..contacts.len().min(normal_impulses.len()).min(2)];
    let count = contacts.len() as f64;
    let mut levers = [ContactLever::default(); 2];
    let mut impulses = [Vec2::ZERO; 2];

    for (i, (&contact, &j)) in contacts.iter().zip(normal_impulses).enumerate() {
        let lever = ContactLever::new(contact, body_a, body_b);
        levers[i] = lever;

        let relative = lever.relative_velocity(body_a, body_b);
        let tangent = relative - normal * relative.dot(normal);
        if tangent.is_close_to(Vec2::ZERO) {
            continue;
        }
        let tangent = tangent.normalize();

        let denominator = lever.effective_inverse_mass(body_a, body_b, tangent);
        let jt = -relative.dot(tangent) / denominator / count;

        impulses[i] = if jt.abs() <= j * material.static_friction {
            tangent * jt
        } else {
            tangent * (-j * material.dynamic_friction)
        };
    }

    let mut total = 0.0;
    for i in 0..contacts.len() {
        body_a.apply_impulse(-impulses[i], levers[i].r_a);
        body_b.apply_impulse(impulses[i], levers[i].r_b);
        total += impulses[i].length();
    }
    total
}
