//! Time subsystem.
//!
//! Provides the monotonic clock the frame scheduler measures cycles with.
//! - `SystemClock` is the production clock (`Instant` + OS sleep/yield)
//! - `ManualClock` is a deterministic timeline for unit tests

mod clock;
#[cfg(test)]
mod manual;

pub use clock::{Clock, SystemClock, Timestamp};
#[cfg(test)]
pub(crate) use manual::ManualClock;
