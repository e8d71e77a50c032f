use gravity_kernel::{Body, EngineConfig, PhysicsWorld, Simulation, Vec2, WorldSnapshot};
use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::thread;
use std::time::{Duration, Instant};

fn wait_until(deadline: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let end = Instant::now() + deadline;
    while Instant::now() < end {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    condition()
}

fn populated_simulation() -> Simulation {
    let simulation = Simulation::new(EngineConfig::default());
    simulation.add_bodies([
        Body::rectangle(10.0, 1.0, 1.0, true)
            .unwrap()
            .with_position(Vec2::new(0.0, 5.0)),
        Body::rectangle(1.0, 1.0, 1.0, false).unwrap(),
    ]);
    simulation
}

#[test]
fn test_core_types_are_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<PhysicsWorld>();
    assert_sync_send::<WorldSnapshot>();
    assert_sync_send::<Simulation>();
}

#[test]
fn test_driver_publishes_snapshots_until_stopped() {
    let mut simulation = populated_simulation();
    let observed = Arc::new(AtomicU64::new(0));
    let observer = Arc::clone(&observed);

    simulation
        .start(move |snapshot| {
            observer.store(snapshot.tick, Ordering::SeqCst);
        })
        .expect("driver should start");
    assert!(simulation.is_running());

    assert!(wait_until(Duration::from_secs(5), || {
        observed.load(Ordering::SeqCst) >= 3
    }));

    simulation.stop();
    assert!(!simulation.is_running());

    let final_tick = simulation.with_world(|world| world.tick_count());
    assert_eq!(simulation.latest_snapshot().tick, final_tick);
    assert_eq!(observed.load(Ordering::SeqCst), final_tick);

    thread::sleep(Duration::from_millis(50));
    assert_eq!(simulation.with_world(|world| world.tick_count()), final_tick);
}

#[test]
fn test_overrunning_ticks_are_delayed_not_skipped() {
    let mut simulation = Simulation::new(EngineConfig::default().with_time_step(0.001));
    simulation.add_body(Body::rectangle(1.0, 1.0, 1.0, false).unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);

    simulation
        .start(move |snapshot| {
            recorder.lock().push(snapshot.tick);
            thread::sleep(Duration::from_millis(5));
        })
        .expect("driver should start");

    assert!(wait_until(Duration::from_secs(5), || seen.lock().len() >= 8));
    simulation.stop();

    let seen = seen.lock();
    let expected: Vec<u64> = (1..=seen.len() as u64).collect();
    assert_eq!(*seen, expected);
    assert_eq!(
        seen.last().copied(),
        Some(simulation.with_world(|world| world.tick_count()))
    );
}

#[test]
fn test_world_can_be_mutated_while_driver_runs() {
    let mut simulation = populated_simulation();
    simulation.start(|_| {}).unwrap();

    let extra = simulation.add_body(
        Body::rectangle(1.0, 1.0, 1.0, false)
            .unwrap()
            .with_position(Vec2::new(3.0, 0.0)),
    );
    assert!(wait_until(Duration::from_secs(5), || {
        simulation
            .latest_snapshot()
            .body(extra)
            .is_some_and(|body| body.position.y > 0.0)
    }));

    simulation.remove_body(extra).unwrap();
    simulation.stop();
    assert!(simulation.snapshot().body(extra).is_none());
}

#[test]
fn test_restart_replaces_previous_driver() {
    let mut simulation = populated_simulation();
    simulation.start(|_| {}).unwrap();
    simulation.start(|_| {}).unwrap();
    assert!(simulation.is_running());

    let world = simulation.world();
    assert!(wait_until(Duration::from_secs(5), || world.lock().tick_count() >= 2));
    drop(simulation);

    let stopped_at = world.lock().tick_count();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(world.lock().tick_count(), stopped_at);
}

#[test]
fn test_shared_world_across_threads() {
    let simulation = Arc::new(populated_simulation());

    let mut handles = vec![];
    for _ in 0..4 {
        let simulation = Arc::clone(&simulation);
        handles.push(thread::spawn(move || {
            simulation.step().expect("tick should succeed");
            simulation.latest_snapshot().len()
        }));
    }

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert_eq!(simulation.snapshot().tick, 4);
}
