/// Timing accumulators carried between cycles.
///
/// Owned by the loop thread; never shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LoopState {
    /// How far the logic clock is behind wall time. Grows when a cycle runs
    /// past its period and shrinks by one period per forced update.
    pub overtime_ns: i64,
    /// Excess of the last measured sleep over its request. Subtracted from the
    /// next sleep, then replaced or cleared.
    pub overslept_ns: i64,
    /// Consecutive cycles that did not sleep. Reset only by a forced yield.
    pub sleep_skip_streak: u8,
    /// Forced updates issued in the current cycle's catch-up phase.
    pub frames_skipped: u8,
}
