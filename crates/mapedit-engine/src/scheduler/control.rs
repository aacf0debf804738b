use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;

/// Lifecycle of a single scheduler run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RunState {
    /// Constructed, not started.
    Idle,
    /// Cycle loop active.
    Running,
    /// Stop requested or loop finished. Terminal.
    Stopped,
}

impl RunState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            IDLE => Self::Idle,
            RUNNING => Self::Running,
            _ => Self::Stopped,
        }
    }
}

/// Cloneable, thread-safe handle that stops a scheduler.
///
/// The flag only ever moves forward (`Idle -> Running -> Stopped`, or straight
/// to `Stopped`), so a stop issued before the loop starts is not lost.
#[derive(Debug, Clone)]
pub struct StopHandle {
    state: Arc<AtomicU8>,
}

impl StopHandle {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(IDLE)),
        }
    }

    /// Requests the loop to exit at its next cycle boundary.
    ///
    /// Does not interrupt an in-flight render, present or sleep.
    pub fn stop(&self) {
        self.state.store(STOPPED, Ordering::Release);
    }

    pub fn state(&self) -> RunState {
        RunState::from_raw(self.state.load(Ordering::Acquire))
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// `Idle -> Running`. Fails if the run was already started or stopped.
    pub(crate) fn begin(&self) -> Result<(), RunState> {
        self.state
            .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(RunState::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_then_stop() {
        let handle = StopHandle::new();
        assert_eq!(handle.state(), RunState::Idle);
        assert!(handle.begin().is_ok());
        assert!(handle.is_running());

        handle.clone().stop();
        assert_eq!(handle.state(), RunState::Stopped);
    }

    #[test]
    fn stop_before_begin_is_sticky() {
        let handle = StopHandle::new();
        handle.stop();
        assert_eq!(handle.begin(), Err(RunState::Stopped));
        assert!(!handle.is_running());
    }

    #[test]
    fn begin_twice_fails() {
        let handle = StopHandle::new();
        handle.begin().unwrap();
        assert_eq!(handle.begin(), Err(RunState::Running));
    }
}
