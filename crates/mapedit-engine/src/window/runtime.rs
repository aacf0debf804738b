use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::core::App;
use crate::device::{Gpu, GpuInit};
use crate::scheduler::{FrameScheduler, LoopConfig, LoopSummary, StopHandle};

use super::hooks::GpuHooks;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Map Editor".to_string(),
            initial_size: LogicalSize::new(500.0, 500.0),
            resizable: true,
        }
    }
}

/// Events posted to the event loop from the scheduler thread.
#[derive(Debug, Clone, Copy)]
enum RuntimeEvent {
    SchedulerExited,
}

/// Entry point for the runtime.
///
/// The winit event loop stays on the calling (main) thread. Once the window and
/// its surface exist, the frame scheduler is started on a dedicated thread and
/// drives rendering from there; the event loop only handles window lifecycle.
pub struct Runtime;

impl Runtime {
    pub fn run<A: App>(
        window: RuntimeConfig,
        loop_config: LoopConfig,
        gpu_init: GpuInit,
        app: A,
    ) -> Result<()> {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = HostState::new(window, loop_config, gpu_init, app, event_loop.create_proxy());

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// What the scheduler thread hands back when it exits.
#[derive(Debug)]
struct SchedulerReport {
    summary: LoopSummary,
    /// Set when an unrecoverable surface error stopped the loop.
    fatal: Option<String>,
}

impl SchedulerReport {
    fn into_result(self) -> Result<LoopSummary> {
        match self.fatal {
            Some(err) => Err(anyhow!("rendering stopped by a fatal surface error: {err}")),
            None => Ok(self.summary),
        }
    }
}

/// Whether teardown may block on the scheduler thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Join {
    /// The thread already announced its exit; joining cannot stall.
    Wait,
    /// The thread may still be waiting on the main thread.
    IfFinished,
}

#[derive(Debug)]
enum Teardown {
    Finished(SchedulerReport),
    Panicked,
    /// Still running; left to end on its own.
    Detached,
}

struct SchedulerThread {
    stop: StopHandle,
    handle: JoinHandle<SchedulerReport>,
}

impl SchedulerThread {
    /// Stops the loop and collects the thread.
    fn teardown(self, join: Join) -> Teardown {
        self.stop.stop();
        if join == Join::IfFinished && !self.handle.is_finished() {
            return Teardown::Detached;
        }
        match self.handle.join() {
            Ok(report) => Teardown::Finished(report),
            Err(_) => Teardown::Panicked,
        }
    }
}

struct HostState<A: App> {
    window_config: RuntimeConfig,
    loop_config: LoopConfig,
    gpu_init: GpuInit,
    app: Option<A>,
    proxy: EventLoopProxy<RuntimeEvent>,

    window: Option<Arc<Window>>,
    scheduler: Option<SchedulerThread>,
    error: Option<anyhow::Error>,
}

impl<A: App> HostState<A> {
    fn new(
        window_config: RuntimeConfig,
        loop_config: LoopConfig,
        gpu_init: GpuInit,
        app: A,
        proxy: EventLoopProxy<RuntimeEvent>,
    ) -> Self {
        Self {
            window_config,
            loop_config,
            gpu_init,
            app: Some(app),
            proxy,
            window: None,
            scheduler: None,
            error: None,
        }
    }

    /// Creates the window and surface, then hands both to a new scheduler
    /// thread. Only valid once: the app moves onto that thread.
    fn launch(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let app = self.app.take().context("frame scheduler was already launched")?;

        let attrs = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(self.window_config.initial_size)
            .with_resizable(self.window_config.resizable);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        self.window = Some(Arc::clone(&window));

        let gpu = pollster::block_on(Gpu::new(Arc::clone(&window), self.gpu_init.clone()))
            .context("GPU initialization failed for window")?;

        let scheduler = FrameScheduler::from_config(self.loop_config.clone());
        let stop = scheduler.stop_handle();
        let hooks_stop = stop.clone();
        let proxy = self.proxy.clone();

        let handle = thread::Builder::new()
            .name("frame-scheduler".to_string())
            .spawn(move || {
                let mut hooks = GpuHooks::new(app, gpu, hooks_stop);
                let summary = scheduler.start(&mut hooks);
                let fatal = hooks.take_fatal();
                // The event loop may already be gone during shutdown.
                let _ = proxy.send_event(RuntimeEvent::SchedulerExited);
                SchedulerReport { summary, fatal }
            })
            .context("failed to spawn frame scheduler thread")?;

        self.scheduler = Some(SchedulerThread { stop, handle });
        Ok(())
    }

    /// Asks the scheduler to stop without blocking the event loop.
    ///
    /// Some platforms service window queries from the scheduler thread on the
    /// main thread, so joining here could deadlock. The join happens once the
    /// scheduler reports back through `RuntimeEvent::SchedulerExited`.
    fn request_stop(&mut self, event_loop: &ActiveEventLoop) {
        match &self.scheduler {
            Some(scheduler) => scheduler.stop.stop(),
            None => event_loop.exit(),
        }
    }

    /// Stops the scheduler (if running), collects it and exits the event loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop, join: Join) {
        if let Some(scheduler) = self.scheduler.take() {
            if let Err(err) = settle(scheduler.teardown(join)) {
                log::error!("{err:#}");
                self.error.get_or_insert(err);
            }
        }

        self.window = None;
        event_loop.exit();
    }
}

impl<A: App> ApplicationHandler<RuntimeEvent> for HostState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.app.is_none() {
            return;
        }

        if let Err(e) = self.launch(event_loop) {
            log::error!("failed to start map editor: {e:#}");
            self.error = Some(e);
            self.shutdown(event_loop, Join::Wait);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        match event {
            RuntimeEvent::SchedulerExited => {
                log::debug!("frame scheduler thread reported exit");
                self.shutdown(event_loop, Join::Wait);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.request_stop(event_loop),
            // The scheduler thread polls the drawable size every render.
            WindowEvent::Resized(size) => {
                log::trace!("window resized to {}x{}", size.width, size.height);
            }
            _ => {}
        }
    }

    // Reached without `SchedulerExited` when the platform ends the loop
    // itself (e.g. quitting from the macOS app menu).
    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop, Join::IfFinished);
    }
}

/// Logs how the scheduler thread ended; fatal endings become errors.
fn settle(teardown: Teardown) -> Result<()> {
    match teardown {
        Teardown::Finished(report) => {
            let summary = report.into_result()?;
            log::info!(
                "scheduler summary: {} cycles, {} updates, {} present failures in {:.2?}",
                summary.cycles,
                summary.total_updates(),
                summary.present_failures,
                summary.elapsed
            );
            Ok(())
        }
        Teardown::Panicked => Err(anyhow!("frame scheduler thread panicked")),
        Teardown::Detached => {
            log::warn!("frame scheduler thread still running at exit, abandoning it");
            Ok(())
        }
    }
}
