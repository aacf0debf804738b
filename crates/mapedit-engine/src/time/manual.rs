use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::clock::{Clock, Timestamp};

/// Deterministic clock for driving the scheduler without real time passing.
///
/// Time only moves when [`advance`](Self::advance) or [`Clock::sleep`] is
/// called. Clones share the same timeline, so a hook can hold one clone to
/// simulate slow rendering while the scheduler holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    now_ns: AtomicU64,
    oversleep_ns: AtomicU64,
    yields: AtomicU32,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the timeline forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.advance_nanos(duration_nanos(by));
    }

    /// Moves the timeline forward by `nanos`.
    pub fn advance_nanos(&self, nanos: u64) {
        self.inner.now_ns.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Every subsequent sleep overshoots its request by `extra`.
    pub fn set_oversleep(&self, extra: Duration) {
        self.inner
            .oversleep_ns
            .store(duration_nanos(extra), Ordering::SeqCst);
    }

    /// Sleep requests received so far, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner
            .sleeps
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Number of forced yields received so far.
    pub fn yields(&self) -> u32 {
        self.inner.yields.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.inner.now_ns.load(Ordering::SeqCst))
    }

    fn sleep(&mut self, duration: Duration) {
        if let Ok(mut sleeps) = self.inner.sleeps.lock() {
            sleeps.push(duration);
        }
        let extra = self.inner.oversleep_ns.load(Ordering::SeqCst);
        self.advance_nanos(duration_nanos(duration).saturating_add(extra));
    }

    fn yield_now(&mut self) {
        self.inner.yields.fetch_add(1, Ordering::SeqCst);
    }
}

fn duration_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_timeline() {
        let a = ManualClock::new();
        let b = a.clone();
        b.advance(Duration::from_millis(3));
        assert_eq!(a.now().as_nanos(), 3_000_000);
    }

    #[test]
    fn sleep_records_request_and_applies_oversleep() {
        let mut clock = ManualClock::new();
        clock.set_oversleep(Duration::from_micros(250));
        clock.sleep(Duration::from_millis(10));

        assert_eq!(clock.sleeps(), vec![Duration::from_millis(10)]);
        assert_eq!(clock.now().as_nanos(), 10_250_000);
    }

    #[test]
    fn yields_are_counted_without_moving_time() {
        let mut clock = ManualClock::new();
        clock.yield_now();
        clock.yield_now();
        assert_eq!(clock.yields(), 2);
        assert_eq!(clock.now(), Timestamp::default());
    }
}
