//! Map editor engine crate.
//!
//! The heart of the crate is the fixed-timestep `scheduler`, which depends
//! only on `time` and the `core` hook contracts. `device` and `window` are the
//! wgpu/winit host that feeds it frames.

pub mod core;
pub mod scheduler;
pub mod time;

pub mod device;
pub mod window;

pub mod logging;
