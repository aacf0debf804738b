use super::ctx::DrawTarget;

/// Application contract implemented by the host program.
///
/// The runtime moves the app onto the scheduler thread, so it must be `Send`.
/// All three callbacks run on that thread only.
pub trait App: Send + 'static {
    /// Advances editor logic by one fixed step.
    fn update(&mut self);

    /// Color the offscreen buffer is cleared to before `draw`.
    fn background(&self) -> wgpu::Color {
        wgpu::Color::BLACK
    }

    /// Records draw commands for the current frame.
    ///
    /// The target has already been cleared to `background()`.
    fn draw(&mut self, target: &mut DrawTarget<'_>) {
        let _ = target;
    }
}
