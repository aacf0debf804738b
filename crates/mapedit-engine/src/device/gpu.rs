use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{self, SURFACE_USAGE};
use super::{FrameBuffer, GpuInit, SurfaceErrorAction};

/// Owns wgpu core objects and the window surface.
///
/// Built on the event-loop thread, then moved to the scheduler thread, which is
/// the only one that touches it afterwards. The window is shared through an
/// `Arc` so the surface can be `'static`.
pub struct Gpu {
    /// Window the surface presents to. Only queried for its size and for
    /// pre-present notification.
    window: Arc<Window>,

    /// Surface bound to the window.
    surface: wgpu::Surface<'static>,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels (may be zero while minimized).
    size: PhysicalSize<u32>,
}

impl Gpu {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("mapedit device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, prefer_srgb)
            .context("no supported surface formats")?;
        anyhow::ensure!(
            caps.usages.contains(SURFACE_USAGE),
            "surface does not support being a copy destination (usages: {:?})",
            caps.usages
        );

        let config = wgpu::SurfaceConfiguration {
            usage: SURFACE_USAGE,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps, alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::info!(
            "gpu ready: {} ({:?}), surface {:?} {}x{}",
            adapter.get_info().name,
            adapter.get_info().backend,
            format,
            size.width,
            size.height
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Picks up window resizes. Returns `true` if the drawable size changed.
    ///
    /// wgpu does not support configuring a surface with a 0x0 size; in that case,
    /// only internal state is updated and configuration is deferred.
    pub fn sync_size(&mut self) -> bool {
        let new_size = self.window.inner_size();
        if new_size == self.size {
            return false;
        }

        log::debug!(
            "drawable size changed: {}x{} -> {}x{}",
            self.size.width,
            self.size.height,
            new_size.width,
            new_size.height
        );
        self.size = new_size;

        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
        true
    }

    /// Allocates an offscreen buffer of the current drawable size.
    ///
    /// Returns `None` while the drawable size is zero (e.g. minimized).
    pub fn create_frame_buffer(&self) -> Option<FrameBuffer> {
        if self.size.width == 0 || self.size.height == 0 {
            return None;
        }
        Some(FrameBuffer::new(&self.device, self.config.format, self.size))
    }

    /// Copies `buffer` into the next surface texture and presents it.
    pub fn present(&self, buffer: &FrameBuffer) -> Result<(), SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;

        let extent = wgpu::Extent3d {
            width: buffer.size.width.min(surface_texture.texture.width()),
            height: buffer.size.height.min(surface_texture.texture.height()),
            depth_or_array_layers: 1,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("mapedit present encoder"),
            });
        encoder.copy_texture_to_texture(
            buffer.texture.as_image_copy(),
            surface_texture.texture.as_image_copy(),
            extent,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        surface_texture.present();
        Ok(())
    }

    /// Converts a `SurfaceError` into a higher-level action, reconfiguring the
    /// surface when it was lost or outdated.
    pub fn handle_surface_error(&mut self, err: &SurfaceError) -> SurfaceErrorAction {
        let action = surface::classify_surface_error(err);
        if action == SurfaceErrorAction::Reconfigured
            && self.size.width > 0
            && self.size.height > 0
        {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}
