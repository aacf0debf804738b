use std::time::{Duration, Instant};

/// A point on a monotonic timeline, in nanoseconds since the clock's origin.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Creates a timestamp from raw nanoseconds.
    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Returns the raw nanosecond value.
    #[inline]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Signed nanoseconds from `earlier` to `self`.
    ///
    /// Negative when `earlier` is actually later. Saturates at the `i64` range.
    pub fn nanos_since(self, earlier: Timestamp) -> i64 {
        let diff = self.0 as i128 - earlier.0 as i128;
        diff.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

/// Monotonic clock consumed by the frame scheduler.
///
/// The scheduler only ever reads the time, sleeps its own thread and yields.
/// Keeping those three operations behind a trait lets tests drive the loop
/// with a deterministic clock.
pub trait Clock {
    /// Current monotonic time.
    fn now(&self) -> Timestamp;

    /// Blocks the calling thread for (at least, usually) `duration`.
    fn sleep(&mut self, duration: Duration);

    /// Gives up the rest of the time slice to other ready threads.
    fn yield_now(&mut self);
}

/// Wall clock backed by [`Instant`] and the OS thread primitives.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let nanos = self.origin.elapsed().as_nanos();
        Timestamp(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    fn yield_now(&mut self) {
        std::thread::yield_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nanos_since_is_signed() {
        let a = Timestamp::from_nanos(1_000);
        let b = Timestamp::from_nanos(4_500);
        assert_eq!(b.nanos_since(a), 3_500);
        assert_eq!(a.nanos_since(b), -3_500);
        assert_eq!(a.nanos_since(a), 0);
    }

    #[test]
    fn nanos_since_saturates() {
        let lo = Timestamp::from_nanos(0);
        let hi = Timestamp::from_nanos(u64::MAX);
        assert_eq!(hi.nanos_since(lo), i64::MAX);
        assert_eq!(lo.nanos_since(hi), i64::MIN);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now();
        clock.sleep(Duration::from_millis(2));
        let b = clock.now();
        assert!(b.nanos_since(a) >= 2_000_000);
    }
}
