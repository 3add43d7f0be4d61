//! Pointer input for the swirl interaction.
//!
//! [`PointerTracker`] merges mouse and touch into the single
//! [`PointerState`] the simulation consumes. An active touch always takes
//! precedence over the mouse; otherwise the left mouse button drives the
//! pointer.
//!
//! # Usage
//!
//! ```ignore
//! // In the window event handler
//! tracker.handle_event(&event);
//!
//! // At the top of each frame
//! let pointer = tracker.state();
//! ```

use crate::force::PointerState;
use glam::DVec2;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

/// Touch currently driving the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveTouch {
    id: u64,
    position: DVec2,
}

/// Combined mouse and touch pointer state.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    mouse_held: bool,
    cursor: DVec2,
    touch: Option<ActiveTouch>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot to hand to the simulation for this frame.
    pub fn state(&self) -> PointerState {
        if let Some(touch) = self.touch {
            return PointerState::pressed(touch.position);
        }
        if self.mouse_held {
            PointerState::pressed(self.cursor)
        } else {
            PointerState::released()
        }
    }

    // ========== Mouse ==========

    pub fn mouse_pressed(&mut self, position: DVec2) {
        self.mouse_held = true;
        self.cursor = position;
    }

    /// Cursor movement. Updates the drag position whether or not a button is held.
    pub fn mouse_moved(&mut self, position: DVec2) {
        self.cursor = position;
    }

    pub fn mouse_released(&mut self) {
        self.mouse_held = false;
    }

    // ========== Touch ==========

    /// A finger went down. The newest touch drives the pointer.
    pub fn touch_started(&mut self, id: u64, position: DVec2) {
        self.touch = Some(ActiveTouch { id, position });
    }

    /// Movement of a finger. Ignored unless it is the driving touch.
    pub fn touch_moved(&mut self, id: u64, position: DVec2) {
        if let Some(touch) = self.touch.as_mut() {
            if touch.id == id {
                touch.position = position;
            }
        }
    }

    /// A finger lifted or the touch was cancelled.
    pub fn touch_ended(&mut self, id: u64) {
        if self.touch.map(|t| t.id) == Some(id) {
            self.touch = None;
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.mouse_held = false;
        self.touch = None;
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.mouse_pressed(self.cursor),
                ElementState::Released => self.mouse_released(),
            },

            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_moved(DVec2::new(position.x, position.y));
            }

            WindowEvent::Touch(touch) => {
                let position = DVec2::new(touch.location.x, touch.location.y);
                match touch.phase {
                    TouchPhase::Started => self.touch_started(touch.id, position),
                    TouchPhase::Moved => self.touch_moved(touch.id, position),
                    TouchPhase::Ended | TouchPhase::Cancelled => self.touch_ended(touch.id),
                }
            }

            WindowEvent::Focused(false) | WindowEvent::CursorLeft { .. } => {
                if self.touch.is_none() {
                    self.mouse_released();
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_is_released() {
        let tracker = PointerTracker::new();
        assert!(!tracker.state().active);
    }

    #[test]
    fn test_mouse_drag_lifecycle() {
        let mut tracker = PointerTracker::new();
        tracker.mouse_moved(DVec2::new(10.0, 20.0));
        assert!(!tracker.state().active);

        tracker.mouse_pressed(DVec2::new(10.0, 20.0));
        assert_eq!(tracker.state(), PointerState::pressed(DVec2::new(10.0, 20.0)));

        tracker.mouse_moved(DVec2::new(30.0, 40.0));
        assert_eq!(tracker.state().position, DVec2::new(30.0, 40.0));

        tracker.mouse_released();
        assert!(!tracker.state().active);
    }

    #[test]
    fn test_touch_takes_precedence() {
        let mut tracker = PointerTracker::new();
        tracker.mouse_pressed(DVec2::new(1.0, 1.0));
        tracker.touch_started(7, DVec2::new(200.0, 300.0));
        assert_eq!(tracker.state().position, DVec2::new(200.0, 300.0));

        // Mouse movement does not steal the pointer from the touch.
        tracker.mouse_moved(DVec2::new(5.0, 5.0));
        assert_eq!(tracker.state().position, DVec2::new(200.0, 300.0));

        tracker.touch_ended(7);
        assert_eq!(tracker.state().position, DVec2::new(5.0, 5.0));
        assert!(tracker.state().active);
    }

    #[test]
    fn test_other_finger_does_not_move_pointer() {
        let mut tracker = PointerTracker::new();
        tracker.touch_started(1, DVec2::new(10.0, 10.0));
        tracker.touch_moved(2, DVec2::new(90.0, 90.0));
        assert_eq!(tracker.state().position, DVec2::new(10.0, 10.0));
        tracker.touch_ended(2);
        assert!(tracker.state().active);
        tracker.touch_ended(1);
        assert!(!tracker.state().active);
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut tracker = PointerTracker::new();
        tracker.mouse_pressed(DVec2::ZERO);
        tracker.touch_started(3, DVec2::ONE);
        tracker.reset();
        assert!(!tracker.state().active);
    }
}
