use crate::core::{App, DrawTarget, FrameError, FrameHooks};
use crate::device::{FrameBuffer, Gpu, SurfaceErrorAction};
use crate::scheduler::StopHandle;

/// Adapts an [`App`] plus a [`Gpu`] into the scheduler's frame hooks.
///
/// Render clears the offscreen buffer and lets the app draw into it; present
/// copies the buffer onto the window surface.
pub(crate) struct GpuHooks<A> {
    app: A,
    gpu: Gpu,
    stop: StopHandle,
    /// Surface error that stopped the loop, kept for the host's exit status.
    fatal: Option<String>,
}

impl<A: App> GpuHooks<A> {
    pub fn new(app: A, gpu: Gpu, stop: StopHandle) -> Self {
        Self {
            app,
            gpu,
            stop,
            fatal: None,
        }
    }

    /// Returns the unrecoverable surface error that stopped the loop, if any.
    pub fn take_fatal(&mut self) -> Option<String> {
        self.fatal.take()
    }
}

impl<A: App> FrameHooks for GpuHooks<A> {
    type Buffer = FrameBuffer;

    fn update(&mut self) {
        self.app.update();
    }

    fn render(&mut self, slot: &mut Option<FrameBuffer>) -> Result<(), FrameError> {
        if self.gpu.sync_size() {
            // Stale size: drop it so a matching buffer is built below.
            *slot = None;
        }
        if slot.is_none() {
            *slot = self.gpu.create_frame_buffer();
        }
        let Some(buffer) = slot.as_ref() else {
            return Err(FrameError::buffer_unavailable("drawable size is zero"));
        };

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("mapedit render encoder"),
            });

        // Clear pass — dropped before the encoder is handed to the app.
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("mapedit clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view:           &buffer.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(self.app.background()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes:         None,
                occlusion_query_set:      None,
                multiview_mask:           None,
            });
        }

        {
            let mut target = DrawTarget {
                device:  self.gpu.device(),
                queue:   self.gpu.queue(),
                encoder: &mut encoder,
                view:    &buffer.view,
                format:  self.gpu.surface_format(),
                size:    buffer.size,
            };
            self.app.draw(&mut target);
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn present(&mut self, buffer: Option<&FrameBuffer>) -> Result<(), FrameError> {
        let Some(buffer) = buffer else {
            return Err(FrameError::presentation_unavailable("no frame rendered yet"));
        };
        if !buffer.matches(self.gpu.size()) {
            return Err(FrameError::presentation_unavailable("frame buffer is stale"));
        }

        match self.gpu.present(buffer) {
            Ok(()) => Ok(()),
            Err(err) => {
                let action = self.gpu.handle_surface_error(&err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("surface error is not recoverable, stopping: {err}");
                    self.fatal.get_or_insert_with(|| err.to_string());
                    self.stop.stop();
                }
                Err(FrameError::presentation_unavailable(format!("{err} ({action:?})")))
            }
        }
    }

    fn release(&mut self, buffer: FrameBuffer) {
        log::debug!(
            "releasing frame buffer ({}x{})",
            buffer.size.width,
            buffer.size.height
        );
        buffer.texture.destroy();
    }
}
