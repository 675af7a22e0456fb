//! On-screen virtual joystick
//!
//! A circular control anchored in the viewport. Pressing inside it captures
//! the pointer; dragging produces a movement vector whose magnitude is the
//! drag distance divided by `max_radius`, clamped to 1.

use wardroom_math::Vec2;

use crate::pointer::PointerId;

/// Joystick activity and output
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JoystickState {
    pub active: bool,
    /// Centre of the control at the time it was pressed
    pub origin: Vec2,
    /// Movement vector, `|vector| <= 1`
    pub vector: Vec2,
}

/// Virtual joystick driven by a captured pointer
#[derive(Clone, Debug)]
pub struct VirtualJoystick {
    state: JoystickState,
    pointer: Option<PointerId>,
    center: Vec2,
    radius: f32,
    /// Drag distance in pixels that maps to full deflection
    pub max_radius: f32,
}

impl VirtualJoystick {
    /// Create a joystick control of `radius` pixels centred at `center`
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            state: JoystickState::default(),
            pointer: None,
            center,
            radius,
            max_radius: 40.0,
        }
    }

    /// Builder: set the full-deflection drag distance
    pub fn with_max_radius(mut self, max_radius: f32) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Move the control, e.g. after a resize
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether a screen point lies on the control
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }

    /// Capture a pointer that went down on the control
    ///
    /// Ignored while another pointer already holds the joystick.
    pub fn press(&mut self, id: PointerId) -> bool {
        if self.pointer.is_some() {
            return false;
        }
        self.pointer = Some(id);
        self.state = JoystickState {
            active: true,
            origin: self.center,
            vector: Vec2::ZERO,
        };
        true
    }

    /// Update the vector from the captured pointer's position
    pub fn drag(&mut self, id: PointerId, position: Vec2) {
        if !self.is_captured(id) || self.max_radius <= 0.0 {
            return;
        }
        let clamped = (position - self.state.origin).clamp_length(self.max_radius);
        self.state.vector = clamped / self.max_radius;
    }

    /// Release the captured pointer and zero the output
    pub fn release(&mut self, id: PointerId) {
        if self.is_captured(id) {
            self.pointer = None;
            self.state.active = false;
            self.state.vector = Vec2::ZERO;
        }
    }

    /// Whether `id` is the pointer holding the joystick
    pub fn is_captured(&self, id: PointerId) -> bool {
        self.pointer == Some(id)
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Current movement vector
    pub fn vector(&self) -> Vec2 {
        self.state.vector
    }

    pub fn state(&self) -> &JoystickState {
        &self.state
    }

    /// Knob displacement in pixels for drawing the indicator
    pub fn knob_offset(&self) -> Vec2 {
        self.state.vector * self.max_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: PointerId = PointerId(7);

    fn pressed() -> VirtualJoystick {
        let mut joystick = VirtualJoystick::new(Vec2::new(100.0, 500.0), 60.0);
        assert!(joystick.press(ID));
        joystick
    }

    #[test]
    fn test_press_resets_vector_to_centre() {
        let joystick = pressed();
        assert!(joystick.is_active());
        assert_eq!(joystick.state().origin, Vec2::new(100.0, 500.0));
        assert_eq!(joystick.vector(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_within_radius_is_proportional() {
        let mut joystick = pressed();
        joystick.drag(ID, Vec2::new(120.0, 500.0));
        assert!((joystick.vector().length() - 0.5).abs() < 1e-6);
        assert!((joystick.vector().x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_drag_beyond_radius_clamps_to_unit() {
        let mut joystick = pressed();
        joystick.drag(ID, Vec2::new(100.0 + 300.0, 500.0 - 400.0));
        let v = joystick.vector();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.y + 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_drag_exactly_at_radius() {
        let mut joystick = pressed();
        joystick.drag(ID, Vec2::new(100.0, 540.0));
        assert!((joystick.vector().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_knob_offset_follows_vector() {
        let mut joystick = pressed();
        joystick.drag(ID, Vec2::new(100.0, 400.0));
        assert_eq!(joystick.knob_offset(), Vec2::new(0.0, -40.0));
    }

    #[test]
    fn test_release_zeroes_output() {
        let mut joystick = pressed();
        joystick.drag(ID, Vec2::new(130.0, 500.0));
        joystick.release(ID);
        assert!(!joystick.is_active());
        assert_eq!(joystick.vector(), Vec2::ZERO);
    }

    #[test]
    fn test_other_pointers_are_ignored() {
        let mut joystick = pressed();
        assert!(!joystick.press(PointerId(8)));
        joystick.drag(PointerId(8), Vec2::new(200.0, 500.0));
        assert_eq!(joystick.vector(), Vec2::ZERO);
        joystick.release(PointerId(8));
        assert!(joystick.is_active());
    }

    #[test]
    fn test_contains() {
        let joystick = VirtualJoystick::new(Vec2::new(100.0, 500.0), 60.0);
        assert!(joystick.contains(Vec2::new(140.0, 520.0)));
        assert!(!joystick.contains(Vec2::new(300.0, 500.0)));
    }
}
