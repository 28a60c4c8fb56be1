//! Windowed front end
//!
//! [`OrreryApp`] owns the winit event loop and an [`AppState`] that implements
//! [`ApplicationHandler`]. Window events are translated into the
//! [`Simulation`] callbacks; each redraw presents through a [`WindowTarget`]
//! backed by the render engine and the UI overlay.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::OrreryConfig;
use crate::error::{AppError, RenderError};
use crate::gfx::{camera::CameraController, rendering::RenderEngine};
use crate::simulation::{FrameTarget, FrameView, Simulation, SolarSystem};
use crate::ui::{description_panel, UiManager};

const ROTATE_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.1;

pub struct OrreryApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: OrreryConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    system: SolarSystem,
    controller: CameraController,
    error: Option<RenderError>,
}

/// Presents frames to the window: scene first, description overlay on top
struct WindowTarget<'a> {
    engine: &'a mut RenderEngine,
    ui: &'a mut UiManager,
    window: &'a Window,
    error: Option<RenderError>,
}

impl FrameTarget for WindowTarget<'_> {
    fn present(&mut self, frame: FrameView<'_>) {
        self.engine.update(frame);

        let ui = &mut *self.ui;
        let window = self.window;
        let result = self
            .engine
            .render_frame(Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 color_attachment: &wgpu::TextureView| {
                    ui.draw(device, queue, encoder, window, color_attachment, |frame_ui| {
                        description_panel(frame_ui, frame.description);
                    });
                },
            ));

        if let Err(e) = result {
            self.error = Some(e);
        }
    }
}

fn is_escape(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}

impl OrreryApp {
    /// Creates the event loop and builds the solar system from `config`
    pub fn new(config: OrreryConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new()?;
        let system = SolarSystem::new(&config);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                system,
                controller: CameraController::new(ROTATE_SPEED, ZOOM_SPEED),
                error: None,
            },
        })
    }

    pub fn system(&self) -> &SolarSystem {
        &self.app_state.system
    }

    /// Runs until the window closes or rendering fails
    pub fn run(self) -> Result<(), AppError> {
        let OrreryApp {
            event_loop,
            mut app_state,
        } = self;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut app_state)?;

        match app_state.error.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RenderError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        let (width, height) = self.config.window_size;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.title.clone())
                .with_inner_size(LogicalSize::new(width, height)),
        )?;
        let window_handle = Arc::new(window);

        let PhysicalSize { width, height } = window_handle.inner_size();
        self.system.on_resize(width, height);

        let renderer = pollster::block_on(RenderEngine::new(
            window_handle.clone(),
            width,
            height,
            self.system.graph(),
            &self.config,
        ))?;

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window_handle,
        );

        log::info!("Window {}x{} ready: {}", width, height, self.system.name());
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.window = Some(window_handle);
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };

        let ui_event: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        if ui_manager.handle_input(window, &ui_event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event: key, .. } => {
                if is_escape(&key) {
                    event_loop.exit();
                } else {
                    self.controller
                        .process_keyed_events(&key, self.system.camera_mut());
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.process_mouse_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.controller
                    .process_scroll(&delta, self.system.camera_mut());
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.system
                    .on_pointer_move(position.x as f32, position.y as f32);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.system.on_resize(width, height);
                render_engine.resize(width, height);
                if width > 0 && height > 0 {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                let mut target = WindowTarget {
                    engine: render_engine,
                    ui: ui_manager,
                    window,
                    error: None,
                };
                self.system.on_frame(&mut target);
                if let Some(e) = target.error {
                    self.fail(event_loop, e);
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self
            .ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_mouse())
        {
            return;
        }
        self.controller
            .process_device_event(&event, self.system.camera_mut());
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
