use std::thread;
use std::time::{Duration, Instant};

/// Source of time for the pause before the app is relaunched.
///
/// The launcher only ever asks for the current instant and for one blocking
/// pause; tests swap in a clock that records the pause instead of taking it.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, d: Duration);
}

/// Real clock: blocks the calling thread for the requested pause.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    // A zero pause (e.g. `--delay-ms 0`) skips the syscall entirely.
    fn sleep(&self, d: Duration) {
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, d: Duration) {
        (**self).sleep(d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sleep_returns_immediately() {
        let clock = MonotonicClock::new();
        let start = clock.now();
        clock.sleep(Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn sleep_waits_at_least_requested() {
        let clock = MonotonicClock::new();
        let start = clock.now();
        clock.sleep(Duration::from_millis(20));
        assert!(clock.now().duration_since(start) >= Duration::from_millis(20));
    }
}
