use std::fmt;
use std::time::Duration;

/// Nanoseconds in one second.
pub const NS_PER_SEC: i64 = 1_000_000_000;
/// Nanoseconds in one millisecond.
pub const NS_PER_MS: i64 = 1_000_000;

/// Lowest accepted target frequency, in cycles per second.
pub const MIN_FREQUENCY_HZ: i32 = 1;
/// Highest accepted target frequency, in cycles per second.
pub const MAX_FREQUENCY_HZ: i32 = 127;

/// Consecutive cycles without a sleep before the loop yields the processor.
pub const SLEEP_SKIP_LIMIT: u8 = 16;
/// Maximum forced catch-up updates per cycle.
pub const FRAME_SKIP_LIMIT: u8 = 5;

/// Construction-time configuration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Target frequency is not within `MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ`.
    FrequencyOutOfRange { hz: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrequencyOutOfRange { hz } => write!(
                f,
                "target frequency {hz} Hz is outside the supported range \
                 ({MIN_FREQUENCY_HZ} to {MAX_FREQUENCY_HZ})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolution the loop sleeps at.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SleepGranularity {
    /// Whole milliseconds; the sub-millisecond remainder is dropped and not
    /// carried into the next cycle.
    #[default]
    Millisecond,
    /// Full nanosecond precision (still subject to OS timer resolution).
    Nanosecond,
}

impl SleepGranularity {
    /// Converts a positive sleep request into the duration actually requested
    /// from the clock.
    pub fn truncate(self, nanos: i64) -> Duration {
        if nanos <= 0 {
            return Duration::ZERO;
        }
        match self {
            Self::Millisecond => Duration::from_millis((nanos / NS_PER_MS) as u64),
            Self::Nanosecond => Duration::from_nanos(nanos as u64),
        }
    }
}

/// Immutable scheduler configuration.
///
/// Only the target frequency is required. The remaining settings default to
/// the plain loop behavior: millisecond sleeps, no oversleep measurement and
/// logic updates only during catch-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    frequency_hz: i32,
    period_ns: i64,
    sleep_granularity: SleepGranularity,
    compensate_oversleep: bool,
    update_each_cycle: bool,
    stats_interval: Option<Duration>,
}

impl LoopConfig {
    /// Validates `frequency_hz` and derives the cycle period.
    pub fn new(frequency_hz: i32) -> Result<Self, ConfigError> {
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&frequency_hz) {
            return Err(ConfigError::FrequencyOutOfRange { hz: frequency_hz });
        }

        Ok(Self {
            frequency_hz,
            period_ns: NS_PER_SEC / frequency_hz as i64,
            sleep_granularity: SleepGranularity::default(),
            compensate_oversleep: false,
            update_each_cycle: false,
            stats_interval: Some(Duration::from_secs(1)),
        })
    }

    pub fn with_sleep_granularity(mut self, granularity: SleepGranularity) -> Self {
        self.sleep_granularity = granularity;
        self
    }

    /// Measures each sleep and shortens the next one by the overshoot.
    pub fn with_oversleep_compensation(mut self, enabled: bool) -> Self {
        self.compensate_oversleep = enabled;
        self
    }

    /// Runs one regular update before every render, in addition to catch-up.
    pub fn with_update_each_cycle(mut self, enabled: bool) -> Self {
        self.update_each_cycle = enabled;
        self
    }

    /// How often loop rates are logged; `None` disables the report.
    pub fn with_stats_interval(mut self, interval: Option<Duration>) -> Self {
        self.stats_interval = interval.filter(|i| !i.is_zero());
        self
    }

    pub fn frequency_hz(&self) -> i32 {
        self.frequency_hz
    }

    /// Cycle period in nanoseconds (`NS_PER_SEC / frequency_hz`, truncated).
    pub fn period_ns(&self) -> i64 {
        self.period_ns
    }

    pub fn period(&self) -> Duration {
        Duration::from_nanos(self.period_ns as u64)
    }

    pub fn sleep_granularity(&self) -> SleepGranularity {
        self.sleep_granularity
    }

    pub fn compensate_oversleep(&self) -> bool {
        self.compensate_oversleep
    }

    pub fn update_each_cycle(&self) -> bool {
        self.update_each_cycle
    }

    pub fn stats_interval(&self) -> Option<Duration> {
        self.stats_interval
    }
}
