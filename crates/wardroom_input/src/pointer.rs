//! Device-independent pointer events
//!
//! Touches, mouse buttons and pens all arrive as [`PointerEvent`]s in
//! surface pixels (origin top-left, y down) stamped with the time they were
//! received.

use std::time::Instant;

use wardroom_math::Vec2;
use winit::event::{Touch, TouchPhase};

/// Identifier of a pointer for the lifetime of one press
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

impl PointerId {
    /// The single mouse pointer
    pub const MOUSE: Self = Self(u64::MAX);
}

/// Kind of device behind a pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Touch,
    Mouse,
    Pen,
}

/// Stage of a pointer's press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

impl From<TouchPhase> for PointerPhase {
    fn from(phase: TouchPhase) -> Self {
        match phase {
            TouchPhase::Started => PointerPhase::Down,
            TouchPhase::Moved => PointerPhase::Move,
            TouchPhase::Ended => PointerPhase::Up,
            TouchPhase::Cancelled => PointerPhase::Cancel,
        }
    }
}

/// A pointer event in surface pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerKind,
    pub position: Vec2,
    /// Primary button held (always true for touches)
    pub primary: bool,
    pub time: Instant,
}

impl PointerEvent {
    /// A touch contact
    pub fn touch(id: u64, x: f32, y: f32, time: Instant) -> Self {
        Self {
            id: PointerId(id),
            kind: PointerKind::Touch,
            position: Vec2::new(x, y),
            primary: true,
            time,
        }
    }

    /// A mouse event; `primary` is whether the left button is involved
    pub fn mouse(x: f32, y: f32, primary: bool, time: Instant) -> Self {
        Self {
            id: PointerId::MOUSE,
            kind: PointerKind::Mouse,
            position: Vec2::new(x, y),
            primary,
            time,
        }
    }

    /// Convert a winit touch into a phase and event
    pub fn from_touch(touch: &Touch, time: Instant) -> (PointerPhase, Self) {
        let event = Self::touch(
            touch.id,
            touch.location.x as f32,
            touch.location.y as f32,
            time,
        );
        (touch.phase.into(), event)
    }

    /// Copy of this event at another position and time
    pub fn moved_to(self, x: f32, y: f32, time: Instant) -> Self {
        Self {
            position: Vec2::new(x, y),
            time,
            ..self
        }
    }
}
