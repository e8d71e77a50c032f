use std::time::{Duration, Instant};

/// Timing and workload counters for the most recent tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickProfiler {
    pub broad_phase_time: Duration,
    pub narrow_phase_time: Duration,
    pub solver_time: Duration,
    pub integrator_time: Duration,
    pub total_tick_time: Duration,

    pub body_count: usize,
    pub substeps: u32,
    pub candidate_pairs: usize,
    pub collisions: usize,
    pub contact_points: usize,
    pub normal_impulse_sum: f64,
    pub friction_impulse_sum: f64,
}

impl TickProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_tick_time.as_micros() as f64;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "tick: {} bodies, {} substeps, {} pairs, {} collisions, {} contacts, {:.2} ms \
             (broad {:.1}%, narrow {:.1}%, solver {:.1}%, integrator {:.1}%)",
            self.body_count,
            self.substeps,
            self.candidate_pairs,
            self.collisions,
            self.contact_points,
            self.total_tick_time.as_secs_f64() * 1000.0,
            Self::share(self.broad_phase_time, total_us),
            Self::share(self.narrow_phase_time, total_us),
            Self::share(self.solver_time, total_us),
            Self::share(self.integrator_time, total_us),
        );
    }

    fn share(phase: Duration, total_us: f64) -> f64 {
        phase.as_micros() as f64 / total_us * 100.0
    }
}

/// Adds the lifetime of the guard to the referenced duration.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_timer_accumulates() {
        let mut total = Duration::ZERO;
        {
            let _timer = PhaseTimer::new(&mut total);
            std::thread::sleep(Duration::from_millis(1));
        }
        let first = total;
        assert!(first >= Duration::from_millis(1));
        {
            let _timer = PhaseTimer::new(&mut total);
        }
        assert!(total >= first);
    }
}
