//! Fixed-timestep frame scheduler.
//!
//! The scheduler renders and presents once per cycle and keeps logic updates
//! in step with a target frequency:
//! - fast cycles sleep off the remainder of the period
//! - slow cycles accumulate overtime, repaid by a bounded number of forced
//!   `update()` calls
//! - a run of cycles that never sleep ends in a forced yield
//!
//! Stopping is cooperative through a `StopHandle`, observed once per cycle.

mod config;
mod control;
mod frame_scheduler;
mod state;
mod stats;

pub use config::{
    ConfigError, FRAME_SKIP_LIMIT, LoopConfig, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ, NS_PER_MS,
    NS_PER_SEC, SLEEP_SKIP_LIMIT, SleepGranularity,
};
pub use control::{RunState, StopHandle};
pub use frame_scheduler::FrameScheduler;
pub use stats::LoopSummary;
