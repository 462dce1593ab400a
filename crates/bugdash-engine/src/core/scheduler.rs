/// Host hook that re-enqueues the loop for the next display frame.
///
/// The loop calls `request_frame` exactly once at the end of every tick that
/// completed while the loop is alive.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler for headless drivers: records requests, runs nothing.
///
/// A driver loop looks like `while sched.take_request() { game_loop.tick(&mut sched)?; }`.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the pending request, if any.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Requests received since creation.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}
