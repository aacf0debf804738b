use winit::dpi::PhysicalSize;

/// Per-frame drawing context passed to `core::App::draw`.
///
/// `view` targets the offscreen frame buffer, never the window surface. The
/// encoder is submitted by the runtime after `draw` returns.
pub struct DrawTarget<'a> {
    pub device:  &'a wgpu::Device,
    pub queue:   &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view:    &'a wgpu::TextureView,
    pub format:  wgpu::TextureFormat,
    /// Buffer size in physical pixels.
    pub size:    PhysicalSize<u32>,
}
