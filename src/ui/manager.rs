//! ImGui integration with wgpu and winit
//!
//! Frame timing, input capture and rendering of the overlay on top of the
//! 3D scene. Coordinates are physical pixels (locked DPI factor of 1).

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

const FONT_SIZE: f32 = 18.0;

/// Input routed either to the overlay or to the camera and simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pointer,
    Keyboard,
}

impl InputKind {
    pub fn of(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => Some(Self::Pointer),
            WindowEvent::KeyboardInput { .. } => Some(Self::Keyboard),
            _ => None,
        }
    }

    /// Whether ImGui keeps this input for itself
    pub fn captured_by(self, want_mouse: bool, want_keyboard: bool) -> bool {
        match self {
            Self::Pointer => want_mouse,
            Self::Keyboard => want_keyboard,
        }
    }
}

pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    /// Creates a new UI manager
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating renderer resources
    /// * `queue` - WGPU queue for renderer operations
    /// * `output_color_format` - Target texture format for rendering
    /// * `window` - Window for platform integration
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: FONT_SIZE,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    /// Must be called when the render target size changes
    pub fn update_display_size(&mut self, width: u32, height: u32) {
        self.context.io_mut().display_size = [width as f32, height as f32];
    }

    /// Feeds an input event to ImGui
    ///
    /// # Arguments
    /// * `window` - Window the event belongs to
    /// * `event` - Winit event; only window input events are forwarded
    ///
    /// # Returns
    /// True if ImGui captured the event and it should go no further
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> bool {
        let Event::WindowEvent {
            event: window_event,
            ..
        } = event
        else {
            return false;
        };

        let kind = InputKind::of(window_event);
        if kind.is_none() && !matches!(window_event, WindowEvent::Focused(_)) {
            return false;
        }

        self.platform
            .handle_event(self.context.io_mut(), window, event);
        let io = self.context.io();
        kind.is_some_and(|kind| kind.captured_by(io.want_capture_mouse, io.want_capture_keyboard))
    }

    pub fn wants_mouse(&self) -> bool {
        self.context.io().want_capture_mouse
    }

    /// Prepares a new ImGui frame and runs the UI callback
    ///
    /// # Arguments
    /// * `window` - Window used for frame preparation and cursor updates
    /// * `run_ui` - Closure that builds this frame's widgets
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F)
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(e) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("Failed to prepare UI frame: {}", e);
        }

        let ui = self.context.frame();
        run_ui(&ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(&ui, window);
        }
    }

    /// Renders the UI built in the last `update_logic()` call over the scene
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        let draw_data = self.context.render();

        // Skip degenerate frames to avoid an invalid scissor rect
        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(e) = self
            .renderer
            .render(draw_data, queue, device, &mut render_pass)
        {
            log::error!("Failed to render UI: {}", e);
        }
    }

    /// `update_logic()` followed by `render_display_only()`
    pub fn draw<F>(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        window: &Window,
        color_attachment: &TextureView,
        run_ui: F,
    ) where
        F: FnOnce(&imgui::Ui),
    {
        self.update_logic(window, run_ui);
        self.render_display_only(device, queue, encoder, color_attachment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn test_pointer_captured_only_when_wanted() {
        assert!(InputKind::Pointer.captured_by(true, false));
        assert!(!InputKind::Pointer.captured_by(false, true));
        assert!(InputKind::Keyboard.captured_by(false, true));
        assert!(!InputKind::Keyboard.captured_by(true, false));
    }

    #[test]
    fn test_window_events_never_captured() {
        for event in [
            WindowEvent::Resized(PhysicalSize::new(10, 10)),
            WindowEvent::Focused(true),
            WindowEvent::CloseRequested,
        ] {
            assert_eq!(InputKind::of(&event), None);
        }
    }
}
