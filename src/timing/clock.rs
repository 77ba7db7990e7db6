use std::time::{Duration, Instant};

/// Time source for everything that needs "now" or has to wait.
pub trait Clock {
    /// Elapsed time since the clock's epoch.
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock anchored at session start. All timestamps in a session are
/// offsets from the same epoch so they can be compared across threads.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    origin: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SessionClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
