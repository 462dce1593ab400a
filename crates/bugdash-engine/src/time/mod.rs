//! Time subsystem.
//!
//! Provides frame timing without coupling to the runtime:
//! - one `FrameClock` per game loop, started once assets are ready
//! - `tick(now)` once per frame yields a `FrameTime` carrying the `DeltaTime`
//! - `TimeSource` decouples "what time is it" from the clock so headless
//!   drivers and tests can feed exact timestamps

mod delta;
mod frame_clock;
mod source;

pub use delta::DeltaTime;
pub use frame_clock::{FrameClock, FrameTime};
pub use source::{ManualTime, MonotonicTime, TimeSource};
