use std::{sync::Arc, time::Instant};

use anyhow::{anyhow, Context};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowAttributes},
};

use crate::{
    config::AppConfig,
    error::InitError,
    gfx::{
        camera::ViewController,
        rendering::RenderEngine,
        resources::TextureResource,
        scene::{desk, SceneManager},
    },
    input::InputState,
};

/// Pixels of touchpad travel treated as one wheel line.
const PIXELS_PER_SCROLL_LINE: f64 = 40.0;

pub struct DioramaApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: SceneManager<TextureResource>,
    view: ViewController,
    input: InputState,
    last_frame: Option<Instant>,
    /// Pointer motion is only applied while the window has focus.
    focused: bool,
    /// Set when the loop had to stop because of an error.
    fatal: Option<anyhow::Error>,
}

impl DioramaApp {
    /// Creates the event loop and the desk scene. No window exists until
    /// the loop starts.
    pub fn new(config: AppConfig) -> Result<Self, InitError> {
        let event_loop = EventLoop::new().map_err(|e| InitError::EventLoop(e.to_string()))?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                view: ViewController::new(&config),
                scene: SceneManager::new(desk::desk_scene()),
                input: InputState::new(),
                config,
                window: None,
                render_engine: None,
                last_frame: None,
                focused: true,
                fatal: None,
            },
        })
    }

    /// Run the application until the window closes
    ///
    /// # Errors
    /// Startup failures and unrecoverable rendering errors.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow!("event loop already consumed"))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        // Covers loops that end without `exiting` being delivered
        self.app_state.teardown();

        match self.app_state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_config = &self.config.window;
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(window_config.title.clone())
                    .with_inner_size(PhysicalSize::new(window_config.width, window_config.height)),
            )
            .map_err(|e| InitError::Window(e.to_string()))?;
        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let grab = window_handle
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window_handle.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grab {
            log::debug!("cursor grab unavailable: {}", e);
        }
        window_handle.set_cursor_visible(false);

        let (width, height) = window_handle.inner_size().into();
        let window_clone = window_handle.clone();
        let mut renderer =
            pollster::block_on(async move { RenderEngine::new(window_clone, width, height).await })?;

        self.view.set_viewport(width, height);

        let (slots, queue) = renderer.resources_mut();
        if let Err(err) = self.scene.prepare_scene(slots, queue, &self.config.asset_root) {
            // Textures loaded before the failure still belong to the scene
            self.scene.teardown(slots);
            renderer.destroy();
            return Err(err).context("failed to prepare the scene");
        }

        self.render_engine = Some(renderer);
        self.last_frame = Some(Instant::now());
        Ok(())
    }

    /// Releases scene textures, then the renderer, then the window.
    fn teardown(&mut self) {
        if let Some(mut renderer) = self.render_engine.take() {
            let (slots, _) = renderer.resources_mut();
            self.scene.teardown(slots);
            renderer.destroy();
            log::info!("renderer shut down");
        }
        self.window = None;
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        ..
                    },
                ..
            } => {
                self.input.on_key(key_code, state.is_pressed());
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pixels) => (pixels.y / PIXELS_PER_SCROLL_LINE) as f32,
                };
                self.input.on_scroll(lines);
            }
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    self.input.release_all();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                render_engine.resize(width, height);
                self.view.set_viewport(width, height);
            }
            WindowEvent::CloseRequested => {
                self.input.request_close();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = self
                    .last_frame
                    .replace(now)
                    .map(|previous| now.duration_since(previous).as_secs_f32())
                    .unwrap_or(0.0);

                let frame = render_engine.draw_queue_mut();
                self.view.update(elapsed, &mut self.input, frame);
                self.scene.render_frame(frame);
                self.input.end_frame();

                if let Err(err) = render_engine.render() {
                    self.fail(event_loop, anyhow!("rendering failed: {}", err));
                    return;
                }

                if self.input.close_requested() {
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.render_engine.is_none() || !self.focused {
            return;
        }

        // Raw motion keeps arriving while the cursor is grabbed
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.on_mouse_motion(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}
