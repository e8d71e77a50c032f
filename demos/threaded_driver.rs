use std::{thread, time::Duration};

use gravity_kernel::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EngineConfig::default();
    let pixels_per_meter = config.pixels_per_meter;
    let mut simulation = Simulation::new(config);
    simulation.add_bodies([
        Body::rectangle(8.0, 0.5, 1.0, true)?.with_position(Vec2::new(0.0, 4.0)),
        Body::rectangle(1.0, 0.5, 2.0, false)?
            .with_position(Vec2::new(-1.0, 0.0))
            .with_rotation(0.4)
            .with_material(Material::rubber()),
        Body::rectangle(0.5, 1.0, 1.0, false)?
            .with_position(Vec2::new(1.0, 1.0))
            .with_angular_velocity(2.0),
    ]);

    simulation.start(move |snapshot| {
        if snapshot.tick % 30 == 0 {
            for body in snapshot.bodies.iter().filter(|body| !body.is_static) {
                let outline = body.scaled_outline(pixels_per_meter);
                println!(
                    "tick {:4} body {:?}: first corner at ({:.0}px, {:.0}px), {:.1} deg",
                    snapshot.tick,
                    body.handle,
                    outline[0].x,
                    outline[0].y,
                    body.rotation_degrees()
                );
            }
        }
    })?;

    thread::sleep(Duration::from_secs(2));

    let latest = simulation.latest_snapshot();
    match latest.body_at(Vec2::new(0.0, 4.0)) {
        Some(body) => println!("body under (0, 4): {:?}", body.handle),
        None => println!("nothing under (0, 4)"),
    }

    simulation.stop();
    Ok(())
}
