/// Camera controller: turns winit window events into camera movement.
///
/// - Mouse wheel: zoom
/// - Left drag: orbit around the target
/// - Middle drag: pan
/// - Right drag: rotate in place
/// - Resize: viewport size

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use super::camera::Camera;

/// Pixel scroll deltas are much larger than line deltas
const PIXEL_SCROLL_SCALE: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct CameraController {
    cursor_position: Option<Vec2>,
    left_pressed: bool,
    middle_pressed: bool,
    right_pressed: bool,
    enabled: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self { enabled: true, ..Default::default() }
    }

    /// Disabled controllers ignore every event (e.g. while a GUI has focus)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.left_pressed = false;
            self.middle_pressed = false;
            self.right_pressed = false;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Apply a window event to `camera`
    ///
    /// Returns true when the event moved the camera.
    pub fn handle_event(&mut self, camera: &mut Camera, event: &WindowEvent) -> bool {
        if !self.enabled {
            return false;
        }
        match event {
            WindowEvent::MouseWheel { delta, .. } => self.on_scroll(camera, *delta),
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(camera, Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(*button, *state);
                false
            }
            WindowEvent::Resized(size) => self.on_resize(camera, size.width, size.height),
            _ => false,
        }
    }

    pub fn on_scroll(&mut self, camera: &mut Camera, delta: MouseScrollDelta) -> bool {
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 * PIXEL_SCROLL_SCALE,
        };
        if amount == 0.0 {
            return false;
        }
        camera.zoom(amount);
        true
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.left_pressed = pressed,
            MouseButton::Middle => self.middle_pressed = pressed,
            MouseButton::Right => self.right_pressed = pressed,
            _ => {}
        }
    }

    /// Drag with the first pressed button (left, middle, right)
    pub fn on_cursor_moved(&mut self, camera: &mut Camera, position: Vec2) -> bool {
        let previous = self.cursor_position.replace(position);
        let Some(previous) = previous else {
            return false;
        };
        let delta = position - previous;
        if delta == Vec2::ZERO {
            return false;
        }

        if self.left_pressed {
            camera.orbit(delta);
        } else if self.middle_pressed {
            camera.translate(delta);
        } else if self.right_pressed {
            camera.rotate(delta);
        } else {
            return false;
        }
        true
    }

    /// Zero-sized resizes (minimized windows) are ignored
    pub fn on_resize(&mut self, camera: &mut Camera, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        camera.set_viewport_size(width as f32, height as f32).is_ok()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
