//! Pointer gesture tracking
//!
//! Classifies raw pointer events into two outputs:
//! - a look delta, accumulated from one touch dragged on the right half of
//!   the viewport and consumed once per frame
//! - "select at point" requests, from short low-movement taps and from
//!   primary mouse or pen presses

use std::time::{Duration, Instant};

use wardroom_math::Vec2;

use crate::pointer::{PointerEvent, PointerId, PointerKind};

/// Tap classification thresholds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Distance in pixels a touch may travel and still count as a tap
    pub tap_slop: f32,
    /// A touch must lift before this much time has elapsed to count as a tap
    pub tap_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tap_slop: 12.0,
            tap_timeout: Duration::from_millis(250),
        }
    }
}

/// The touch driving camera look
#[derive(Clone, Copy, Debug, Default)]
struct LookState {
    active_touch: Option<PointerId>,
    last_position: Option<Vec2>,
    accumulated_delta: Vec2,
}

/// A touch that may still turn out to be a tap
#[derive(Clone, Copy, Debug)]
struct TapGesture {
    pointer: PointerId,
    start_position: Vec2,
    start_time: Instant,
    moved: bool,
}

/// Tracks look touches and tap candidates across pointer events
#[derive(Clone, Debug)]
pub struct PointerTracker {
    config: TrackerConfig,
    viewport_width: f32,
    look: LookState,
    tap: Option<TapGesture>,
}

impl PointerTracker {
    pub fn new(viewport_width: f32) -> Self {
        Self::with_config(viewport_width, TrackerConfig::default())
    }

    pub fn with_config(viewport_width: f32, config: TrackerConfig) -> Self {
        Self {
            config,
            viewport_width,
            look: LookState::default(),
            tap: None,
        }
    }

    /// Update the surface width used to split look and non-look touches
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Handle a pointer press; returns a point to select at, if any
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Option<Vec2> {
        match event.kind {
            PointerKind::Touch => {
                let on_right = event.position.x > self.viewport_width / 2.0;
                if on_right && self.look.active_touch.is_none() {
                    self.look.active_touch = Some(event.id);
                    self.look.last_position = Some(event.position);
                }
                self.tap = Some(TapGesture {
                    pointer: event.id,
                    start_position: event.position,
                    start_time: event.time,
                    moved: false,
                });
                None
            }
            PointerKind::Mouse | PointerKind::Pen => event.primary.then_some(event.position),
        }
    }

    /// Handle pointer motion
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if self.look.active_touch == Some(event.id) {
            if let Some(last) = self.look.last_position {
                self.look.accumulated_delta += event.position - last;
            }
            self.look.last_position = Some(event.position);
        }

        if let Some(tap) = self.tap.as_mut().filter(|t| t.pointer == event.id) {
            if event.position.distance(tap.start_position) > self.config.tap_slop {
                tap.moved = true;
            }
        }
    }

    /// Handle a pointer release; returns a point to select at for a tap
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Option<Vec2> {
        self.release_look(event.id);

        let tap = self.take_tap(event.id)?;
        let elapsed = event.time.saturating_duration_since(tap.start_time);
        (!tap.moved && elapsed < self.config.tap_timeout).then_some(event.position)
    }

    /// Handle a cancelled pointer: released without a tap
    pub fn pointer_cancel(&mut self, event: &PointerEvent) {
        self.release_look(event.id);
        self.take_tap(event.id);
    }

    fn release_look(&mut self, id: PointerId) {
        if self.look.active_touch == Some(id) {
            self.look.active_touch = None;
            self.look.last_position = None;
        }
    }

    fn take_tap(&mut self, id: PointerId) -> Option<TapGesture> {
        match self.tap {
            Some(tap) if tap.pointer == id => self.tap.take(),
            _ => None,
        }
    }

    /// Return the look delta accumulated since the last call and reset it
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look.accumulated_delta)
    }

    /// The touch currently driving look, if any
    pub fn look_touch(&self) -> Option<PointerId> {
        self.look.active_touch
    }

    /// Whether a tap candidate is pending
    pub fn has_tap_candidate(&self) -> bool {
        self.tap.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 800.0;

    fn touch(id: u64, x: f32, y: f32, t: Instant) -> PointerEvent {
        PointerEvent::touch(id, x, y, t)
    }

    fn ms(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[test]
    fn test_quick_tap_selects_at_release_point() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        assert_eq!(tracker.pointer_down(&touch(1, 100.0, 200.0, t0)), None);
        let select = tracker.pointer_up(&touch(1, 100.0, 200.0, ms(t0, 200)));

        assert_eq!(select, Some(Vec2::new(100.0, 200.0)));
        assert!(!tracker.has_tap_candidate());
    }

    #[test]
    fn test_slow_tap_does_not_select() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 100.0, 200.0, t0));
        assert_eq!(tracker.pointer_up(&touch(1, 100.0, 200.0, ms(t0, 300))), None);
    }

    #[test]
    fn test_moved_touch_does_not_select() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 100.0, 200.0, t0));
        tracker.pointer_move(&touch(1, 113.0, 200.0, ms(t0, 50)));
        // Returning to the start does not clear the latch
        tracker.pointer_move(&touch(1, 100.0, 200.0, ms(t0, 80)));

        assert_eq!(tracker.pointer_up(&touch(1, 100.0, 200.0, ms(t0, 100))), None);
    }

    #[test]
    fn test_small_wobble_still_taps() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 100.0, 200.0, t0));
        tracker.pointer_move(&touch(1, 108.0, 208.0, ms(t0, 50)));

        assert!(tracker.pointer_up(&touch(1, 108.0, 208.0, ms(t0, 100))).is_some());
    }

    #[test]
    fn test_right_half_touch_accumulates_look() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 600.0, 300.0, t0));
        tracker.pointer_move(&touch(1, 610.0, 295.0, t0));
        tracker.pointer_move(&touch(1, 625.0, 290.0, t0));

        assert_eq!(tracker.take_look_delta(), Vec2::new(25.0, -10.0));
        assert_eq!(tracker.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_left_half_touch_does_not_look() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 200.0, 300.0, t0));
        tracker.pointer_move(&touch(1, 260.0, 300.0, t0));

        assert_eq!(tracker.look_touch(), None);
        assert_eq!(tracker.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_first_right_half_touch_wins() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 600.0, 300.0, t0));
        tracker.pointer_down(&touch(2, 700.0, 300.0, t0));
        tracker.pointer_move(&touch(2, 750.0, 350.0, t0));
        tracker.pointer_move(&touch(1, 605.0, 300.0, t0));

        assert_eq!(tracker.look_touch(), Some(PointerId(1)));
        assert_eq!(tracker.take_look_delta(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_look_released_on_up_and_next_touch_takes_over() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 600.0, 300.0, t0));
        tracker.pointer_move(&touch(1, 620.0, 300.0, t0));
        tracker.pointer_up(&touch(1, 620.0, 300.0, ms(t0, 500)));
        assert_eq!(tracker.look_touch(), None);

        // Delta gathered before release is still delivered
        assert_eq!(tracker.take_look_delta(), Vec2::new(20.0, 0.0));

        tracker.pointer_down(&touch(2, 500.0, 100.0, t0));
        assert_eq!(tracker.look_touch(), Some(PointerId(2)));
    }

    #[test]
    fn test_other_pointer_up_does_not_consume_tap() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 100.0, 100.0, t0));
        assert_eq!(tracker.pointer_up(&touch(9, 300.0, 300.0, ms(t0, 50))), None);
        assert!(tracker.has_tap_candidate());
        assert!(tracker.pointer_up(&touch(1, 100.0, 100.0, ms(t0, 100))).is_some());
    }

    #[test]
    fn test_cancel_clears_without_select() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        tracker.pointer_down(&touch(1, 600.0, 100.0, t0));
        tracker.pointer_cancel(&touch(1, 600.0, 100.0, ms(t0, 50)));

        assert_eq!(tracker.look_touch(), None);
        assert!(!tracker.has_tap_candidate());
    }

    #[test]
    fn test_mouse_primary_selects_on_press() {
        let mut tracker = PointerTracker::new(WIDTH);
        let t0 = Instant::now();

        assert_eq!(
            tracker.pointer_down(&PointerEvent::mouse(40.0, 50.0, true, t0)),
            Some(Vec2::new(40.0, 50.0))
        );
        assert_eq!(tracker.pointer_down(&PointerEvent::mouse(40.0, 50.0, false, t0)), None);
        assert!(!tracker.has_tap_candidate());
    }
}
