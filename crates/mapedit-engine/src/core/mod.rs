//! Core engine-facing contracts.
//!
//! This module defines the seams between the frame scheduler and whoever
//! supplies its work:
//! - `FrameHooks` is what the scheduler calls each cycle
//! - `App` is what a windowed host program implements; the runtime adapts it
//!   into `FrameHooks`

mod app;
mod ctx;
mod hooks;

pub use app::App;
pub use ctx::DrawTarget;
pub use hooks::{FrameError, FrameHooks};
