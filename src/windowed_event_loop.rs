use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::cli::HostConfig;
use crate::gpu::WgpuShaderApi;
use crate::renderers::window::{FpsCounter, FrameClock, IntervalTimer};
use crate::renderers::WindowRenderer;
use crate::shader::{ReloadController, ReloadOutcome};

const WINDOW_TITLE: &str = "ray-tracer";

// Everything that only exists once the window and GPU are up.
struct RunningHost {
    window: Arc<Window>,
    renderer: WindowRenderer,
    controller: ReloadController<WgpuShaderApi>,
}

struct WindowedApp {
    config: HostConfig,
    host: Option<RunningHost>,
    clock: FrameClock,
    reload_timer: IntervalTimer,
    fps: FpsCounter,
    // Set when startup fails; reported once the event loop has exited.
    fatal: Option<anyhow::Error>,
}

impl WindowedApp {
    fn new(config: HostConfig) -> Self {
        let reload_timer = IntervalTimer::new(config.reload_interval);
        Self {
            config,
            host: None,
            clock: FrameClock::new(),
            reload_timer,
            fps: FpsCounter::new(),
            fatal: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<RunningHost> {
        let size = self.config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(size, size))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create rendering surface")?;
        let window_size = window.inner_size();
        let renderer =
            WindowRenderer::new(instance, surface, (window_size.width, window_size.height))?;

        let controller = ReloadController::new(
            renderer.shader_api(),
            self.config.vertex_origin.clone(),
            self.config.fragment_origin.clone(),
        )?;
        let (vertex, fragment) = controller.origins();
        tracing::info!("Shader program ready (vertex: {vertex}, fragment: {fragment})");

        Ok(RunningHost {
            window,
            renderer,
            controller,
        })
    }

    // AIDEV-NOTE: Reload checks run on the render thread between frames; a failed
    // attempt leaves the controller's current program bound for the next draw.
    fn on_frame(&mut self) {
        let delta = self.clock.tick();

        if let Some(frames) = self.fps.record_frame(delta) {
            if self.config.show_fps {
                tracing::info!("FPS: {frames}");
            }
        }

        if !self.config.reload_enabled || !self.reload_timer.advance(delta) {
            return;
        }
        let Some(host) = &mut self.host else {
            return;
        };

        let now = self.clock.elapsed_secs();
        match host.controller.tick() {
            ReloadOutcome::Unchanged => {}
            ReloadOutcome::Reloaded => {
                let sources = host.controller.snapshot();
                tracing::info!("Reload succeeded ({now:.2})");
                tracing::debug!(
                    vertex_bytes = sources.vertex.len(),
                    fragment_bytes = sources.fragment.len(),
                    "active shader sources"
                );
            }
            ReloadOutcome::Failed(err) => {
                let err = anyhow::Error::from(err);
                tracing::error!("Reload failed ({now:.2})\n{err:#}");
            }
        }
    }
}

impl ApplicationHandler for WindowedApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(host) => {
                host.window.request_redraw();
                self.host = Some(host);
                self.clock = FrameClock::new();
            }
            Err(err) => {
                self.fatal = Some(err);
                event_loop.exit();
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
            WindowEvent::CloseRequested => {
                tracing::debug!("window close requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::KeyQ | KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(host) = &mut self.host {
                    host.renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let time = self.clock.elapsed_secs();
                if let Some(host) = &mut self.host {
                    if let Err(err) = host.renderer.render(host.controller.active(), time) {
                        tracing::warn!("Render error: {err:#}");
                    }
                }
                self.on_frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(host) = &self.host {
            host.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }
}

pub fn run_windowed_event_loop(config: HostConfig) -> Result<()> {
    if config.reload_enabled {
        let (vertex, fragment) = (&config.vertex_origin, &config.fragment_origin);
        tracing::info!("Auto-reload enabled ({vertex}, {fragment})");
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = WindowedApp::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|err| anyhow!("event loop terminated: {err}"))?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
