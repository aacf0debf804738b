use crate::core::FrameHooks;
use crate::time::{Clock, SystemClock, Timestamp};

use super::config::{ConfigError, FRAME_SKIP_LIMIT, LoopConfig, SLEEP_SKIP_LIMIT};
use super::control::StopHandle;
use super::state::LoopState;
use super::stats::{LoopStats, LoopSummary};

/// Fixed-timestep loop that renders every cycle and keeps logic updates in
/// step with the target frequency.
///
/// Each cycle renders and presents once, then either sleeps off the rest of
/// the period or, when the cycle ran long, books the shortfall as overtime.
/// Overtime is repaid with forced `update()` calls, at most
/// [`FRAME_SKIP_LIMIT`] per cycle.
///
/// A scheduler runs once: [`start`](Self::start) consumes it. Stop it from any
/// thread through a [`StopHandle`].
pub struct FrameScheduler<C = SystemClock> {
    config: LoopConfig,
    clock: C,
    control: StopHandle,
    state: LoopState,
}

impl FrameScheduler<SystemClock> {
    /// Creates a scheduler with default settings for `frequency_hz`.
    pub fn new(frequency_hz: i32) -> Result<Self, ConfigError> {
        Ok(Self::from_config(LoopConfig::new(frequency_hz)?))
    }

    pub fn from_config(config: LoopConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> FrameScheduler<C> {
    /// Creates a scheduler measuring time with `clock`.
    pub fn with_clock(config: LoopConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            control: StopHandle::new(),
            state: LoopState::default(),
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Returns a handle that can stop this scheduler from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.control.clone()
    }

    /// Requests the loop to exit at its next cycle boundary.
    pub fn stop(&self) {
        self.control.stop();
    }

    /// Runs the cycle loop on the calling thread until stopped.
    ///
    /// The host must only call this once its display surface can receive
    /// frames. On exit the frame buffer is handed to `hooks.release` and the
    /// run totals are returned.
    pub fn start<H: FrameHooks>(mut self, hooks: &mut H) -> LoopSummary {
        let mut stats = LoopStats::new(self.clock.now(), self.config.stats_interval());

        if let Err(state) = self.control.begin() {
            log::warn!("frame scheduler not started (state: {state:?})");
            return stats.finish(self.clock.now());
        }

        log::info!(
            "frame scheduler started: {} Hz, period {} ns",
            self.config.frequency_hz(),
            self.config.period_ns()
        );

        let mut buffer: Option<H::Buffer> = None;
        let mut before = self.clock.now();

        while self.control.is_running() {
            before = self.cycle(hooks, &mut buffer, &mut stats, before);
        }

        if let Some(buffer) = buffer.take() {
            hooks.release(buffer);
        }

        let summary = stats.finish(self.clock.now());
        log::info!(
            "frame scheduler stopped after {} cycles ({} updates, {} forced, {} yields)",
            summary.cycles,
            summary.updates,
            summary.forced_updates,
            summary.yields
        );
        summary
    }

    /// Runs one cycle; `before` is the baseline taken at the end of the
    /// previous cycle. Returns the baseline for the next one.
    fn cycle<H: FrameHooks>(
        &mut self,
        hooks: &mut H,
        buffer: &mut Option<H::Buffer>,
        stats: &mut LoopStats,
        before: Timestamp,
    ) -> Timestamp {
        let period_ns = self.config.period_ns();

        if self.config.update_each_cycle() {
            hooks.update();
            stats.record_update();
        }

        let rendered = hooks.render(buffer);
        stats.record_render(rendered);
        let presented = hooks.present(buffer.as_ref());
        stats.record_present(presented);

        let after = self.clock.now();
        let elapsed_ns = after.nanos_since(before);
        let time_to_sleep_ns = (period_ns - elapsed_ns) - self.state.overslept_ns;

        if time_to_sleep_ns > 0 {
            let requested = self.config.sleep_granularity().truncate(time_to_sleep_ns);
            self.clock.sleep(requested);
            stats.record_sleep();

            if self.config.compensate_oversleep() {
                let slept_ns = self.clock.now().nanos_since(after);
                let requested_ns = i64::try_from(requested.as_nanos()).unwrap_or(i64::MAX);
                self.state.overslept_ns = (slept_ns - requested_ns).max(0);
            }
        } else {
            self.state.overtime_ns += -time_to_sleep_ns;
            self.state.overslept_ns = 0;

            self.state.sleep_skip_streak += 1;
            if self.state.sleep_skip_streak >= SLEEP_SKIP_LIMIT {
                self.clock.yield_now();
                stats.record_yield();
                self.state.sleep_skip_streak = 0;
            }
        }

        let next_before = self.clock.now();

        self.state.frames_skipped = 0;
        while self.state.overtime_ns > period_ns && self.state.frames_skipped < FRAME_SKIP_LIMIT {
            hooks.update();
            stats.record_forced_update();
            self.state.overtime_ns -= period_ns;
            self.state.frames_skipped += 1;
        }

        stats.end_cycle(next_before);
        next_before
    }
}
