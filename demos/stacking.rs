use gravity_kernel::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = PhysicsWorld::new();
    world.set_parallel_enabled(true);
    world.add_body(
        Body::rectangle(12.0, 1.0, 1.0, true)?.with_position(Vec2::new(0.0, 6.0)),
    );

    let mut stack = Vec::new();
    for level in 0..5 {
        let y = 5.0 - level as f64 * 1.05;
        stack.push(
            Body::rectangle(1.0, 1.0, 1.0, false)?
                .with_position(Vec2::new(0.0, y))
                .with_material(Material::default()),
        );
    }
    let handles = world.add_bodies(stack);

    for _ in 0..300 {
        world.step()?;
    }

    for (level, handle) in handles.iter().enumerate() {
        if let Some(body) = world.body(*handle) {
            println!(
                "level {level}: y = {:.3}, rotation = {:.2} deg",
                body.position().y,
                utils::rad_to_deg(body.rotation())
            );
        }
    }

    let profile = world.last_tick_profile();
    println!(
        "last tick: {} pairs, {} collisions, {:.3} ms",
        profile.candidate_pairs,
        profile.collisions,
        profile.total_tick_time.as_secs_f64() * 1000.0
    );
    Ok(())
}
