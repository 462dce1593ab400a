use std::time::Duration;

/// Seconds elapsed since the previous tick.
///
/// Never negative: a non-monotonic reading collapses to zero, which consumers
/// treat as "no time has passed".
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct DeltaTime(f32);

impl DeltaTime {
    pub const ZERO: Self = Self(0.0);

    /// Creates a delta from seconds. Negative and NaN inputs become zero.
    #[inline]
    pub fn from_secs(secs: f32) -> Self {
        if secs > 0.0 { Self(secs) } else { Self::ZERO }
    }

    #[inline]
    pub fn from_duration(d: Duration) -> Self {
        Self(d.as_secs_f32())
    }

    #[inline]
    pub fn as_secs(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 <= 0.0
    }

    /// Distance covered at `rate` units per second during this delta.
    ///
    /// Returns `0.0` for a zero delta so time-scaled motion is skipped.
    #[inline]
    pub fn scale(self, rate: f32) -> f32 {
        if self.is_zero() { 0.0 } else { rate * self.0 }
    }
}

impl From<Duration> for DeltaTime {
    fn from(d: Duration) -> Self {
        Self::from_duration(d)
    }
}
