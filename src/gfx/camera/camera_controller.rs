use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Orbit controls: drag to rotate, shift+drag to pan, wheel to zoom
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.is_mouse_pressed = state == ElementState::Pressed;
        }
    }

    /// Applies a wheel step. Returns true when the camera moved.
    pub fn process_scroll(&mut self, delta: &MouseScrollDelta, camera: &mut OrbitCamera) -> bool {
        let scroll_amount = -match delta {
            MouseScrollDelta::LineDelta(_, scroll) => *scroll,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => *scroll as f32,
        };
        if scroll_amount == 0.0 {
            return false;
        }
        camera.add_distance(scroll_amount * self.zoom_speed);
        true
    }

    /// Applies raw mouse motion while a drag is active. Returns true when the camera moved.
    pub fn process_device_event(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                if self.is_shift_held {
                    // SHIFT + DRAG = PAN (move focus point)
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                } else {
                    // NORMAL DRAG = ROTATE (orbit around focus)
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                let was_shift_held = self.is_shift_held;
                self.is_shift_held = *state == ElementState::Pressed;

                if was_shift_held != self.is_shift_held {
                    log::trace!("Shift state changed: {}", self.is_shift_held);
                }
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } => {
                // Reset camera when Shift+C is pressed
                if self.is_shift_held {
                    log::debug!("Resetting camera to default position");
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    #[test]
    fn test_motion_ignored_without_drag() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = OrbitCamera::new(100.0, 0.3, 0.2, Vector3::zero(), 1.0);
        let moved = controller.process_device_event(
            &DeviceEvent::MouseMotion { delta: (10.0, 5.0) },
            &mut camera,
        );
        assert!(!moved);
        assert_eq!(camera.yaw, 0.2);
    }

    #[test]
    fn test_drag_rotates_camera() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = OrbitCamera::new(100.0, 0.3, 0.2, Vector3::zero(), 1.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        let moved = controller.process_device_event(
            &DeviceEvent::MouseMotion { delta: (10.0, 0.0) },
            &mut camera,
        );
        assert!(moved);
        assert!((camera.yaw - (0.2 - 0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_zooms_out() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = OrbitCamera::new(100.0, 0.3, 0.2, Vector3::zero(), 1.0);
        assert!(controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, -1.0), &mut camera));
        assert!(camera.distance > 100.0);
    }
}
