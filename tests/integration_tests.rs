use approx::assert_abs_diff_eq;
use gravity_kernel::*;

fn ground() -> Body {
    Body::rectangle(10.0, 1.0, 1.0, true)
        .expect("valid ground")
        .with_position(Vec2::new(0.0, 5.0))
}

fn crate_box(x: f64, y: f64) -> Body {
    Body::rectangle(1.0, 1.0, 1.0, false)
        .expect("valid box")
        .with_position(Vec2::new(x, y))
}

fn run_ticks(world: &mut PhysicsWorld, ticks: usize) {
    for _ in 0..ticks {
        world.step().expect("tick should succeed");
    }
}

#[test]
fn bodies_fall_under_gravity() {
    let mut world = PhysicsWorld::new();
    let handle = world.add_body(crate_box(0.0, 0.0));

    world.step().unwrap();

    let body = world.body(handle).expect("body should exist");
    assert!(body.position().y > 0.0, "y grows downward, y = {}", body.position().y);
    assert!(body.velocity().y > 0.0);
}

#[test]
fn dropped_box_comes_to_rest_on_ground() {
    let mut world = PhysicsWorld::new();
    let floor = world.add_body(ground());
    let falling = world.add_body(crate_box(0.0, 0.0));

    run_ticks(&mut world, 600);

    let body = world.body(falling).unwrap();
    let mut bottom: Vec<Vec2> = body
        .transformed_points()
        .into_iter()
        .filter(|corner| corner.y > body.position().y)
        .collect();
    bottom.sort_by(|a, b| a.x.total_cmp(&b.x));
    assert_eq!(bottom.len(), 2);
    assert!(bottom[0].is_close_to(Vec2::new(-0.5, 4.5)), "corner at {:?}", bottom[0]);
    assert!(bottom[1].is_close_to(Vec2::new(0.5, 4.5)), "corner at {:?}", bottom[1]);
    assert_abs_diff_eq!(body.position().x, 0.0, epsilon = 1e-9);
    assert!(body.velocity().y.abs() < 0.05, "vy = {}", body.velocity().y);
    assert_abs_diff_eq!(body.rotation(), 0.0, epsilon = 1e-9);

    let floor = world.body(floor).unwrap();
    assert_eq!(floor.position(), Vec2::new(0.0, 5.0));
    assert_eq!(floor.velocity(), Vec2::ZERO);
    assert_eq!(floor.angular_velocity(), 0.0);
}

#[test]
fn stacked_boxes_stay_in_order() {
    let mut world = PhysicsWorld::new();
    world.add_body(ground());
    let lower = world.add_body(crate_box(0.0, 3.2));
    let upper = world.add_body(crate_box(0.0, 1.5));

    run_ticks(&mut world, 300);

    let lower = world.body(lower).unwrap();
    let upper = world.body(upper).unwrap();
    assert!(lower.position().y > 3.9 && lower.position().y < 4.05);
    assert!(upper.position().y < lower.position().y - 0.9);
    assert!(upper.position().y > lower.position().y - 1.1);
    assert_abs_diff_eq!(upper.rotation(), 0.0, epsilon = 1e-9);
}

#[test]
fn tilted_box_does_not_sink_through_ground() {
    let mut world = PhysicsWorld::new();
    world.add_body(ground());
    let tilted = world.add_body(crate_box(0.0, 2.0).with_rotation(0.3));

    run_ticks(&mut world, 600);

    let body = world.body(tilted).unwrap();
    let lowest = body
        .transformed_points()
        .iter()
        .map(|corner| corner.y)
        .fold(f64::MIN, f64::max);
    assert!(lowest < 4.55, "deepest corner at y = {lowest}");
    assert!(body.position().y < 4.5);
}

#[test]
fn removed_body_no_longer_collides() {
    let mut world = PhysicsWorld::new();
    let floor = world.add_body(ground());
    let falling = world.add_body(crate_box(0.0, 0.0));

    world.remove_body(floor).unwrap();
    run_ticks(&mut world, 120);

    let body = world.body(falling).unwrap();
    assert!(body.position().y > 6.0, "box should fall past the removed ground");
    assert!(world.remove_body(floor).is_err());
    assert_eq!(world.len(), 1);
}

#[test]
fn body_mutators_take_effect_between_ticks() {
    let mut world = PhysicsWorld::with_config(EngineConfig::default().with_gravity(Vec2::ZERO));
    let handle = world.add_body(crate_box(0.0, 0.0));

    {
        let body = world.body_mut(handle).unwrap();
        body.set_position(Vec2::new(2.0, 2.0));
        body.set_rotation(std::f64::consts::FRAC_PI_2);
        body.set_size(2.0, 1.0).unwrap();
        body.set_velocity(Vec2::new(60.0, 0.0));
        assert!(body.set_mass(-1.0).is_err());
    }
    world.step().unwrap();

    let body = world.body(handle).unwrap();
    assert_abs_diff_eq!(body.position().x, 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(body.aabb().height(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(body.mass(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(body.inertia(), 5.0 / 12.0, epsilon = 1e-12);
}

#[test]
fn parallel_broad_phase_gives_identical_results() {
    let scene = || {
        let mut bodies = vec![ground()];
        for i in 0..8 {
            let y = 2.0 - (i % 3) as f64 * 1.2;
            bodies.push(crate_box(-3.5 + i as f64, y).with_rotation(0.1 * i as f64));
        }
        bodies
    };

    let mut sequential = PhysicsWorld::new();
    sequential.set_parallel_enabled(false);
    sequential.add_bodies(scene());

    let mut parallel = PhysicsWorld::new();
    parallel.set_parallel_enabled(true);
    parallel.add_bodies(scene());

    run_ticks(&mut sequential, 60);
    run_ticks(&mut parallel, 60);

    assert_eq!(sequential.snapshot(), parallel.snapshot());
}
