//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the window Surface
//! - allocating the offscreen `FrameBuffer` and copying it to the surface

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::FrameBuffer;
pub use gpu::Gpu;
pub use init::GpuInit;
