/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; presentation may resume next cycle.
    Reconfigured,
    /// Transient error; skip presentation for this cycle.
    SkipFrame,
    /// Fatal error (commonly OOM); the host should stop the scheduler.
    Fatal,
}
