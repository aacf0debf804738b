use winit::dpi::PhysicalSize;

/// Offscreen frame the scheduler's render hook draws into.
///
/// Has the surface's format and the drawable size it was created at. A size
/// change makes it stale; the host drops it and a fresh one is created on the
/// next render.
pub struct FrameBuffer {
    pub texture: wgpu::Texture,
    pub view:    wgpu::TextureView,
    pub size:    PhysicalSize<u32>,
}

impl FrameBuffer {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("mapedit frame buffer"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view, size }
    }

    /// Whether this buffer still matches `size`.
    pub fn matches(&self, size: PhysicalSize<u32>) -> bool {
        self.size == size
    }
}
