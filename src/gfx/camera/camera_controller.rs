use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

// Below this the remaining damped motion is invisible
const SETTLE_THRESHOLD: f32 = 1e-5;

/// Translates mouse and keyboard input into orbit camera motion.
///
/// Rotation and panning are damped: input accumulates into a pending delta,
/// and every frame [`CameraController::update`] applies `damping_factor` of
/// it and keeps the rest, so the camera glides to a stop. A damping factor of
/// 1.0 applies input in a single frame. Zoom is applied immediately.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: (f32, f32),
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            damping_factor: 1.0,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: (0.0, 0.0),
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    /// Enables damping; `factor` is clamped to `(0, 1]`
    pub fn with_damping(mut self, factor: f32) -> Self {
        self.damping_factor = if factor.is_finite() {
            factor.clamp(0.001, 1.0)
        } else {
            1.0
        };
        self
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.is_mouse_pressed = state == ElementState::Pressed;
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    self.apply_drag((delta.0 as f32, delta.1 as f32));
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    /// Queues the motion for a mouse drag of `delta` pixels
    fn apply_drag(&mut self, delta: (f32, f32)) {
        if self.is_shift_held {
            // SHIFT + DRAG = PAN (move focus point)
            self.pending_pan.0 += -delta.0 * self.pan_speed;
            self.pending_pan.1 += delta.1 * self.pan_speed;
        } else {
            // NORMAL DRAG = ROTATE (orbit around focus)
            self.pending_yaw += -delta.0 * self.rotate_speed;
            self.pending_pitch += delta.1 * self.rotate_speed;
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } => {
                if self.is_shift_held {
                    log::info!("Resetting camera to default position");
                    self.stop();
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    /// Applies one frame of pending motion to the camera
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        let factor = self.damping_factor;

        if self.pending_yaw != 0.0 {
            camera.add_yaw(self.pending_yaw * factor);
        }
        if self.pending_pitch != 0.0 {
            camera.add_pitch(self.pending_pitch * factor);
        }
        if self.pending_pan != (0.0, 0.0) {
            camera.pan((self.pending_pan.0 * factor, self.pending_pan.1 * factor));
        }

        let keep = 1.0 - factor;
        self.pending_yaw = settle(self.pending_yaw * keep);
        self.pending_pitch = settle(self.pending_pitch * keep);
        self.pending_pan = (
            settle(self.pending_pan.0 * keep),
            settle(self.pending_pan.1 * keep),
        );
    }

    /// Drops any motion still in flight
    pub fn stop(&mut self) {
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_pan = (0.0, 0.0);
    }

    /// Returns true while damped motion is still being applied
    pub fn is_moving(&self) -> bool {
        self.pending_yaw != 0.0 || self.pending_pitch != 0.0 || self.pending_pan != (0.0, 0.0)
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }
}

fn settle(value: f32) -> f32 {
    if value.abs() < SETTLE_THRESHOLD {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::orbit_camera::OrbitPose;

    #[test]
    fn test_undamped_drag_applies_in_one_frame() {
        let mut camera = OrbitCamera::new(OrbitPose::default(), 1.0);
        let mut controller = CameraController::new(0.01, 0.1);

        controller.apply_drag((-10.0, 0.0));
        controller.update(&mut camera);

        assert!((camera.yaw - 0.1).abs() < 1e-6);
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_damped_drag_glides_to_target() {
        let mut camera = OrbitCamera::new(OrbitPose::default(), 1.0);
        let mut controller = CameraController::new(0.01, 0.1).with_damping(0.03);

        controller.apply_drag((-10.0, 0.0));
        controller.update(&mut camera);
        let first_step = camera.yaw;
        assert!((first_step - 0.003).abs() < 1e-6);

        for _ in 0..1000 {
            controller.update(&mut camera);
        }
        assert!(!controller.is_moving());
        assert!((camera.yaw - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_shift_drag_pans() {
        let mut camera = OrbitCamera::new(OrbitPose::default(), 1.0);
        let mut controller = CameraController::new(0.01, 0.1);
        controller.is_shift_held = true;
        controller.is_mouse_pressed = true;
        assert!(controller.is_panning());

        controller.apply_drag((20.0, 0.0));
        controller.update(&mut camera);

        assert_eq!(camera.yaw, 0.0);
        assert!(camera.target.x.abs() > 0.0);
    }

    #[test]
    fn test_stop_clears_pending_motion() {
        let mut controller = CameraController::new(0.01, 0.1).with_damping(0.5);
        controller.apply_drag((5.0, 5.0));
        assert!(controller.is_moving());
        controller.stop();
        assert!(!controller.is_moving());
    }
}
