//! Pointer, touch and keyboard input handling
//!
//! This crate turns raw pointer events into camera look, joystick movement
//! and tap-to-select gestures for a first-person walkthrough camera.

mod pointer;
mod touch_tracker;
mod joystick;
mod camera_controller;

pub use pointer::{PointerId, PointerKind, PointerPhase, PointerEvent};
pub use touch_tracker::{PointerTracker, TrackerConfig};
pub use joystick::{VirtualJoystick, JoystickState};
pub use camera_controller::{
    CameraController, CameraControl, ScenePicker, SelectionDisplay, select_at, select_center,
};
