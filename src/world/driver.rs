use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError, Sender, TryRecvError},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use log::{error, info};
use parking_lot::{Mutex, RwLock};

use crate::{
    error::{PhysicsError, Result},
    utils::logging::warn_if_tick_budget_exceeded,
    world::{snapshot::WorldSnapshot, PhysicsWorld},
};

/// World behind the lock held for a whole tick and for every external access.
pub type SharedWorld = Arc<Mutex<PhysicsWorld>>;

/// Snapshot published after every completed tick.
pub type SharedSnapshot = Arc<RwLock<WorldSnapshot>>;

/// Invoked on the driver thread after each tick, outside the world lock.
pub type TickCallback = Box<dyn FnMut(&WorldSnapshot) + Send + 'static>;

/// Worker thread that ticks a shared world at a fixed period until stopped.
///
/// Stopping prevents any new tick from starting; a tick already running
/// finishes first. Ticks that overrun the period are delayed, never skipped.
pub struct SimulationDriver {
    stop_sender: Sender<()>,
    thread_handle: Option<thread::JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl SimulationDriver {
    pub fn spawn(
        world: SharedWorld,
        snapshot: SharedSnapshot,
        period: Duration,
        on_tick: TickCallback,
    ) -> Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let running = Arc::new(AtomicBool::new(true));
        let running_flag = Arc::clone(&running);

        let thread_handle = thread::Builder::new()
            .name("gravity-kernel-driver".to_string())
            .spawn(move || {
                Self::tick_loop(world, snapshot, period, on_tick, stop_rx);
                running_flag.store(false, Ordering::Release);
            })
            .map_err(|err| PhysicsError::DriverSpawn(err.to_string()))?;

        info!(
            "Simulation driver started ({:.2} ms period)",
            period.as_secs_f64() * 1000.0
        );

        Ok(Self {
            stop_sender: stop_tx,
            thread_handle: Some(thread_handle),
            running,
        })
    }

    fn tick_loop(
        world: SharedWorld,
        snapshot: SharedSnapshot,
        period: Duration,
        mut on_tick: TickCallback,
        stop_rx: mpsc::Receiver<()>,
    ) {
        loop {
            match stop_rx.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => break,
                Err(TryRecvError::Empty) => {}
            }

            let started = Instant::now();
            let result = {
                let mut world = world.lock();
                world.step().map(|()| world.snapshot())
            };

            match result {
                Ok(latest) => {
                    *snapshot.write() = latest.clone();
                    on_tick(&latest);
                }
                Err(err) => {
                    error!("Tick aborted, stopping simulation driver: {err}");
                    break;
                }
            }

            warn_if_tick_budget_exceeded(started.elapsed(), period);

            let wait = (started + period).saturating_duration_since(Instant::now());
            match stop_rx.recv_timeout(wait) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        info!("Simulation driver stopped");
    }

    /// False once the worker has exited, either through `stop` or an aborted tick.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Signals the worker and waits for it to exit.
    pub fn stop(&mut self) {
        let Some(handle) = self.thread_handle.take() else {
            return;
        };
        // The worker may already be gone after an aborted tick.
        let _ = self.stop_sender.send(());
        if handle.join().is_err() {
            error!("Simulation driver thread panicked");
        }
    }
}

impl Drop for SimulationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::Body;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn stop_prevents_further_ticks() {
        let world: SharedWorld = Arc::new(Mutex::new(PhysicsWorld::new()));
        world
            .lock()
            .add_body(Body::rectangle(1.0, 1.0, 1.0, false).unwrap());
        let snapshot: SharedSnapshot = Arc::new(RwLock::new(WorldSnapshot::default()));
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let mut driver = SimulationDriver::spawn(
            Arc::clone(&world),
            Arc::clone(&snapshot),
            Duration::from_millis(2),
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while ticks.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        driver.stop();
        assert!(!driver.is_running());

        let stopped_at = world.lock().tick_count();
        assert!(stopped_at >= 3);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(world.lock().tick_count(), stopped_at);
        assert_eq!(snapshot.read().tick, stopped_at);
        assert_eq!(ticks.load(Ordering::SeqCst) as u64, stopped_at);
    }
}
