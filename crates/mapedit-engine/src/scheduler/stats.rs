use std::time::Duration;

use crate::core::FrameError;
use crate::time::Timestamp;

/// Totals reported when a scheduler run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// Completed cycles (one render/present each).
    pub cycles: u64,
    /// Regular per-cycle updates.
    pub updates: u64,
    /// Catch-up updates forced by accumulated overtime.
    pub forced_updates: u64,
    /// Cycles that slept.
    pub sleeps: u64,
    /// Forced processor yields after too many cycles without sleep.
    pub yields: u64,
    /// Cycles whose render hook reported an error.
    pub render_skips: u64,
    /// Cycles whose present hook reported an error.
    pub present_failures: u64,
    /// Time between loop start and loop exit.
    pub elapsed: Duration,
}

impl LoopSummary {
    /// All logic updates, regular and forced.
    pub fn total_updates(&self) -> u64 {
        self.updates + self.forced_updates
    }
}

/// Consecutive failures of one hook, for rate-limited logging.
#[derive(Debug, Default)]
struct FailureStreak {
    length: u64,
}

impl FailureStreak {
    fn fail(&mut self, stage: &str, err: &FrameError) {
        if self.length == 0 {
            log::warn!("{stage} failed, skipping this cycle: {err}");
        } else {
            log::trace!("{stage} still failing ({} cycles): {err}", self.length + 1);
        }
        self.length += 1;
    }

    fn succeed(&mut self, stage: &str) {
        if self.length > 0 {
            log::info!("{stage} recovered after {} failed cycles", self.length);
            self.length = 0;
        }
    }
}

/// Running counters plus the periodic rate report.
#[derive(Debug)]
pub(crate) struct LoopStats {
    started: Timestamp,
    summary: LoopSummary,

    interval_ns: Option<i64>,
    window_start: Timestamp,
    window_cycles: u64,
    window_updates: u64,

    render_streak: FailureStreak,
    present_streak: FailureStreak,
}

impl LoopStats {
    pub fn new(now: Timestamp, interval: Option<Duration>) -> Self {
        Self {
            started: now,
            summary: LoopSummary::default(),
            interval_ns: interval.map(|i| i64::try_from(i.as_nanos()).unwrap_or(i64::MAX)),
            window_start: now,
            window_cycles: 0,
            window_updates: 0,
            render_streak: FailureStreak::default(),
            present_streak: FailureStreak::default(),
        }
    }

    #[cfg(test)]
    pub fn summary(&self) -> &LoopSummary {
        &self.summary
    }

    pub fn record_update(&mut self) {
        self.summary.updates += 1;
        self.window_updates += 1;
    }

    pub fn record_forced_update(&mut self) {
        self.summary.forced_updates += 1;
        self.window_updates += 1;
    }

    pub fn record_render(&mut self, result: Result<(), FrameError>) {
        match result {
            Ok(()) => self.render_streak.succeed("render"),
            Err(err) => {
                self.summary.render_skips += 1;
                self.render_streak.fail("render", &err);
            }
        }
    }

    pub fn record_present(&mut self, result: Result<(), FrameError>) {
        match result {
            Ok(()) => self.present_streak.succeed("present"),
            Err(err) => {
                self.summary.present_failures += 1;
                self.present_streak.fail("present", &err);
            }
        }
    }

    pub fn record_sleep(&mut self) {
        self.summary.sleeps += 1;
    }

    pub fn record_yield(&mut self) {
        self.summary.yields += 1;
    }

    /// Counts a finished cycle and logs rates when the report window elapses.
    pub fn end_cycle(&mut self, now: Timestamp) {
        self.summary.cycles += 1;
        self.window_cycles += 1;

        let Some(interval_ns) = self.interval_ns else {
            return;
        };

        let window_ns = now.nanos_since(self.window_start);
        if window_ns < interval_ns {
            return;
        }

        let secs = window_ns as f64 / 1e9;
        log::debug!(
            "loop rates: {:.1} fps, {:.1} ups",
            self.window_cycles as f64 / secs,
            self.window_updates as f64 / secs,
        );

        self.window_start = now;
        self.window_cycles = 0;
        self.window_updates = 0;
    }

    /// Closes the run and returns the totals.
    pub fn finish(mut self, now: Timestamp) -> LoopSummary {
        let ns = now.nanos_since(self.started).max(0);
        self.summary.elapsed = Duration::from_nanos(ns as u64);
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(ms: u64) -> Timestamp {
        Timestamp::from_nanos(ms * 1_000_000)
    }

    #[test]
    fn failures_are_counted_per_hook() {
        let mut stats = LoopStats::new(ts(0), None);
        stats.record_present(Err(FrameError::presentation_unavailable("lost")));
        stats.record_present(Err(FrameError::presentation_unavailable("lost")));
        stats.record_present(Ok(()));
        stats.record_render(Err(FrameError::buffer_unavailable("zero size")));

        assert_eq!(stats.summary().present_failures, 2);
        assert_eq!(stats.summary().render_skips, 1);
    }

    #[test]
    fn report_window_resets_after_interval() {
        let mut stats = LoopStats::new(ts(0), Some(Duration::from_millis(100)));
        stats.record_update();
        stats.end_cycle(ts(50));
        assert_eq!(stats.window_cycles, 1);

        stats.end_cycle(ts(100));
        assert_eq!(stats.window_cycles, 0);
        assert_eq!(stats.window_updates, 0);
        assert_eq!(stats.window_start, ts(100));
        assert_eq!(stats.summary().cycles, 2);
    }

    #[test]
    fn finish_reports_elapsed_and_totals() {
        let mut stats = LoopStats::new(ts(10), None);
        stats.record_update();
        stats.record_forced_update();
        stats.record_forced_update();
        stats.end_cycle(ts(20));

        let summary = stats.finish(ts(40));
        assert_eq!(summary.elapsed, Duration::from_millis(30));
        assert_eq!(summary.total_updates(), 3);
        assert_eq!(summary.cycles, 1);
    }
}
