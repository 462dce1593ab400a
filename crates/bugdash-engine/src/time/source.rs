use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Where the game loop reads "now" from.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Monotonic wall time (`Instant::now()`).
#[derive(Debug, Default, Copy, Clone)]
pub struct MonotonicTime;

impl TimeSource for MonotonicTime {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually driven time for headless runs and tests.
///
/// Clones share the same reading, so a driver can keep one handle and advance
/// it between ticks while the loop owns another.
#[derive(Debug, Clone)]
pub struct ManualTime {
    now: Rc<Cell<Instant>>,
}

impl ManualTime {
    pub fn new(start: Instant) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn set(&self, now: Instant) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_time_clones_share_reading() {
        let start = Instant::now();
        let a = ManualTime::new(start);
        let b = a.clone();
        a.advance(Duration::from_millis(16));
        assert_eq!(b.now(), start + Duration::from_millis(16));
    }

    #[test]
    fn monotonic_time_does_not_go_backwards() {
        let t = MonotonicTime;
        let a = t.now();
        let b = t.now();
        assert!(b >= a);
    }
}
