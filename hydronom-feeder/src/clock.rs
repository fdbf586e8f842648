//! Time source for the feeder loop

use std::time::{Duration, Instant};

/// Elapsed time since loop start plus a way to wait
pub trait Clock {
    /// Time since the clock was created
    fn elapsed(&self) -> Duration;

    /// Block for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Real time, backed by [`Instant`] and [`std::thread::sleep`]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Virtual time that only moves when slept on
///
/// Lets a test run thousands of ticks instantly while the feeder still sees
/// consistent elapsed times.
#[derive(Debug, Default, Clone)]
pub struct SimulatedClock {
    now: Duration,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SimulatedClock {
    fn elapsed(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
    }
}
