//! Window + runtime host.
//!
//! Owns the `winit` EventLoop and Window, builds the GPU surface, and runs the
//! frame scheduler on its own thread against them.

mod hooks;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
