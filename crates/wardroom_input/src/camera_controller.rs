//! Camera controller for touch, mouse and keyboard walkthrough
//!
//! Controls:
//! - Virtual joystick (bottom-left): walk along the camera's forward/right
//! - Touch drag on the right half of the viewport: look around
//! - Tap or left click: select the object under the pointer
//! - Left mouse drag: look around
//! - W/A/S/D or arrow keys: walk

use wardroom_math::{Vec2, Vec3};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::joystick::VirtualJoystick;
use crate::pointer::{PointerEvent, PointerKind, PointerPhase};
use crate::touch_tracker::{PointerTracker, TrackerConfig};

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Unit forward direction in world space
    fn forward(&self) -> Vec3;
    /// Unit right direction in world space
    fn right(&self) -> Vec3;
    /// Add to the velocity integrated on the camera's next update
    fn add_velocity(&mut self, delta: Vec3);
    /// Rotate by yaw (about world up) and pitch (positive looks down)
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Clamp pitch into `[-limit, limit]`
    fn clamp_pitch(&mut self, limit: f32);
    /// Movement speed per frame
    fn speed(&self) -> f32;
}

/// Ray-picks the scene for the selection gesture
pub trait ScenePicker {
    /// Handle to a picked object
    type Handle;

    /// Nearest pickable object under a screen point (surface pixels)
    fn pick(&self, point: Vec2) -> Option<Self::Handle>;
    /// The label that owns a picked object
    fn owning_label(&self, handle: Self::Handle) -> Option<&str>;
    /// Viewport size in surface pixels
    fn viewport_size(&self) -> Vec2;
}

/// Shows the current selection
pub trait SelectionDisplay {
    /// Show a label, or the "nothing selected" placeholder for `None`
    fn show(&mut self, label: Option<&str>);
}

/// Pick at a screen point and report the owning label (or none) to the display
pub fn select_at<P, D>(point: Vec2, picker: &P, display: &mut D)
where
    P: ScenePicker + ?Sized,
    D: SelectionDisplay + ?Sized,
{
    let label = picker.pick(point).and_then(|hit| picker.owning_label(hit));
    log::debug!("Select at ({:.0}, {:.0}): {:?}", point.x, point.y, label);
    display.show(label);
}

/// Select whatever is under the centre of the viewport
pub fn select_center<P, D>(picker: &P, display: &mut D)
where
    P: ScenePicker + ?Sized,
    D: SelectionDisplay + ?Sized,
{
    let size = picker.viewport_size();
    select_at(size / 2.0, picker, display);
}

/// Camera controller for handling input
pub struct CameraController {
    tracker: PointerTracker,
    joystick: VirtualJoystick,

    // Keyboard movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,

    // Mouse drag look state
    mouse_dragging: bool,
    last_mouse: Option<Vec2>,
    pending_mouse: Vec2,

    // Joystick placement
    joystick_margin: f32,
    viewport: Vec2,

    // Configuration
    pub look_sensitivity: f32,
    pub look_pitch_limit: f32,
    pub mouse_sensitivity: f32,
}

impl CameraController {
    /// Joystick control radius in pixels
    pub const DEFAULT_JOYSTICK_RADIUS: f32 = 60.0;
    /// Distance from the joystick control to the viewport's bottom-left edges
    pub const DEFAULT_JOYSTICK_MARGIN: f32 = 24.0;

    pub fn new(viewport: Vec2) -> Self {
        let margin = Self::DEFAULT_JOYSTICK_MARGIN;
        let radius = Self::DEFAULT_JOYSTICK_RADIUS;
        Self {
            tracker: PointerTracker::new(viewport.x),
            joystick: VirtualJoystick::new(joystick_center(viewport, margin, radius), radius),

            forward: false,
            backward: false,
            left: false,
            right: false,

            mouse_dragging: false,
            last_mouse: None,
            pending_mouse: Vec2::ZERO,

            joystick_margin: margin,
            viewport,

            look_sensitivity: 0.0025,
            look_pitch_limit: 1.3,
            mouse_sensitivity: 1.0 / 4000.0,
        }
    }

    /// Update viewport-dependent layout after a resize
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.tracker.set_viewport_width(viewport.x);
        self.joystick.set_center(joystick_center(
            viewport,
            self.joystick_margin,
            self.joystick.radius(),
        ));
    }

    /// Route a pointer event; returns a point to select at, if any
    pub fn process_pointer(&mut self, phase: PointerPhase, event: &PointerEvent) -> Option<Vec2> {
        match phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => {
                self.pointer_move(event);
                None
            }
            PointerPhase::Up => self.pointer_up(event),
            PointerPhase::Cancel => {
                self.pointer_cancel(event);
                None
            }
        }
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) -> Option<Vec2> {
        if event.primary && self.joystick.contains(event.position) && self.joystick.press(event.id) {
            return None;
        }

        if event.kind != PointerKind::Touch && event.primary {
            self.mouse_dragging = true;
            self.last_mouse = Some(event.position);
        }
        self.tracker.pointer_down(event)
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if self.joystick.is_captured(event.id) {
            self.joystick.drag(event.id, event.position);
            return;
        }

        if event.kind != PointerKind::Touch {
            if let (true, Some(last)) = (self.mouse_dragging, self.last_mouse) {
                self.pending_mouse += event.position - last;
            }
            self.last_mouse = Some(event.position);
        }
        self.tracker.pointer_move(event);
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> Option<Vec2> {
        if self.joystick.is_captured(event.id) {
            self.joystick.release(event.id);
            return None;
        }

        if event.kind != PointerKind::Touch {
            self.mouse_dragging = false;
        }
        self.tracker.pointer_up(event)
    }

    pub fn pointer_cancel(&mut self, event: &PointerEvent) {
        if self.joystick.is_captured(event.id) {
            self.joystick.release(event.id);
            return;
        }
        if event.kind != PointerKind::Touch {
            self.mouse_dragging = false;
        }
        self.tracker.pointer_cancel(event);
    }

    /// Process keyboard input
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => { self.forward = pressed; true }
            KeyCode::KeyS | KeyCode::ArrowDown => { self.backward = pressed; true }
            KeyCode::KeyA | KeyCode::ArrowLeft => { self.left = pressed; true }
            KeyCode::KeyD | KeyCode::ArrowRight => { self.right = pressed; true }
            _ => false,
        }
    }

    /// Apply one frame of accumulated input to the camera
    ///
    /// Order: joystick movement, touch look, mouse look, keyboard movement.
    pub fn update<C: CameraControl + ?Sized>(&mut self, camera: &mut C) {
        if self.joystick.is_active() {
            let v = self.joystick.vector();
            let movement = camera.forward() * v.y + camera.right() * v.x;
            camera.add_velocity(movement * camera.speed());
        }

        let look = self.tracker.take_look_delta();
        if !look.is_zero() {
            camera.rotate(look.x * self.look_sensitivity, look.y * self.look_sensitivity);
            camera.clamp_pitch(self.look_pitch_limit);
        }

        let drag = std::mem::take(&mut self.pending_mouse);
        if !drag.is_zero() {
            camera.rotate(drag.x * self.mouse_sensitivity, drag.y * self.mouse_sensitivity);
        }

        let (fwd, rgt) = self.get_movement_input();
        if fwd != 0.0 || rgt != 0.0 {
            let movement = camera.forward() * fwd + camera.right() * rgt;
            camera.add_velocity(movement * camera.speed());
        }
    }

    /// Get raw keyboard movement input as (forward, right) in -1.0..=1.0
    pub fn get_movement_input(&self) -> (f32, f32) {
        let forward = (self.forward as i32 - self.backward as i32) as f32;
        let right = (self.right as i32 - self.left as i32) as f32;
        (forward, right)
    }

    /// Check if any movement input is active
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.joystick.is_active()
    }

    pub fn joystick(&self) -> &VirtualJoystick {
        &self.joystick
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    /// Builder: set touch look sensitivity (radians per pixel)
    pub fn with_look_sensitivity(mut self, sensitivity: f32) -> Self {
        self.look_sensitivity = sensitivity;
        self
    }

    /// Builder: set the pitch clamp applied after touch look
    pub fn with_look_pitch_limit(mut self, limit: f32) -> Self {
        self.look_pitch_limit = limit;
        self
    }

    /// Builder: set mouse drag sensitivity (radians per pixel)
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set tap thresholds
    pub fn with_tracker_config(mut self, config: TrackerConfig) -> Self {
        self.tracker = PointerTracker::with_config(self.viewport.x, config);
        self
    }

    /// Builder: set joystick size, margin and full-deflection distance
    pub fn with_joystick(mut self, radius: f32, margin: f32, max_radius: f32) -> Self {
        self.joystick_margin = margin;
        self.joystick = VirtualJoystick::new(joystick_center(self.viewport, margin, radius), radius)
            .with_max_radius(max_radius);
        self
    }
}

fn joystick_center(viewport: Vec2, margin: f32, radius: f32) -> Vec2 {
    Vec2::new(margin + radius, viewport.y - margin - radius)
}
