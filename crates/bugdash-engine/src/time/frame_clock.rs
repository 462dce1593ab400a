use std::time::{Duration, Instant};

use super::DeltaTime;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick.
    pub dt: DeltaTime,

    /// Timestamp the tick was computed for.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0 for the first tick.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The clock is started with the timestamp at which the loop begins and then
/// fed one timestamp per tick. `last` is only ever written after the delta for
/// the current tick has been computed.
///
/// No clamp is applied by default, so `dt` is exactly the wall time between
/// two ticks. `with_max_delta` caps it for hosts that stall (debugger,
/// minimized window) and would otherwise hand the simulation a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    max_delta: Option<Duration>,
}

impl FrameClock {
    /// Starts a clock whose baseline is `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            frame_index: 0,
            max_delta: None,
        }
    }

    /// Caps every delta at `max`.
    pub fn with_max_delta(mut self, max: Duration) -> Self {
        self.max_delta = Some(max);
        self
    }

    /// Timestamp of the previous tick (or of the start, before the first tick).
    pub fn last(&self) -> Instant {
        self.last
    }

    /// Number of ticks produced so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Re-bases the clock without counting a frame.
    ///
    /// Useful when resuming from suspension so the next delta does not include
    /// the time spent suspended.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    /// Advances the clock to `now` and returns the snapshot for this tick.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        // A clock that went backwards yields zero rather than a negative delta.
        let mut elapsed = now.saturating_duration_since(self.last);
        if let Some(max) = self.max_delta {
            elapsed = elapsed.min(max);
        }

        self.last = now;

        let ft = FrameTime {
            dt: DeltaTime::from_duration(elapsed),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}
