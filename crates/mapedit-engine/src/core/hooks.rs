use std::fmt;

/// Recoverable per-cycle failure reported by a render or present hook.
///
/// The scheduler logs these and carries on with the next cycle. They never
/// stop the loop and never change how many logic updates run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The offscreen buffer could not be created or is not usable this cycle.
    BufferUnavailable(String),
    /// The visible surface could not be obtained or written this cycle.
    PresentationUnavailable(String),
}

impl FrameError {
    pub fn buffer_unavailable(reason: impl Into<String>) -> Self {
        Self::BufferUnavailable(reason.into())
    }

    pub fn presentation_unavailable(reason: impl Into<String>) -> Self {
        Self::PresentationUnavailable(reason.into())
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferUnavailable(reason) => write!(f, "frame buffer unavailable: {reason}"),
            Self::PresentationUnavailable(reason) => {
                write!(f, "presentation surface unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Capabilities the frame scheduler drives once started.
///
/// `Buffer` is the offscreen frame the host draws into. The scheduler owns the
/// slot holding it for the whole run: `render` may fill an empty slot (or empty
/// it to invalidate the buffer), `present` reads it, and `release` receives it
/// back when the loop shuts down.
pub trait FrameHooks {
    type Buffer;

    /// Advances logic by exactly one fixed timestep.
    ///
    /// May run zero or several times per cycle with identical semantics.
    /// Must not block.
    fn update(&mut self);

    /// Draws the next frame into the buffer, creating it first if absent.
    fn render(&mut self, buffer: &mut Option<Self::Buffer>) -> Result<(), FrameError>;

    /// Copies the buffer to the visible surface.
    fn present(&mut self, buffer: Option<&Self::Buffer>) -> Result<(), FrameError>;

    /// Called once with the buffer when the loop exits.
    fn release(&mut self, buffer: Self::Buffer) {
        drop(buffer);
    }
}
