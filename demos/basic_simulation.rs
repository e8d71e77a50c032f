use gravity_kernel::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = PhysicsWorld::new();
    world.add_body(
        Body::rectangle(10.0, 1.0, 1.0, true)?.with_position(Vec2::new(0.0, 5.0)),
    );
    let body_id = world.add_body(Body::rectangle(1.0, 1.0, 1.0, false)?);

    for tick in 0..120 {
        world.step()?;
        if tick % 20 == 0 {
            if let Some(body) = world.body(body_id) {
                println!(
                    "tick {tick:3}: position = ({:.3}, {:.3}), velocity = ({:.3}, {:.3})",
                    body.position().x,
                    body.position().y,
                    body.velocity().x,
                    body.velocity().y
                );
            }
        }
    }
    Ok(())
}
