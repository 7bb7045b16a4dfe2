//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into scene-space taps.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent::Tap → InputBuffer
//
// Stateful cursor tracking: Caches the last cursor position and the
// window size, so a button press can be turned into a tap at the right
// spot. Window pixels are y-down; scene space is y-up and always spans
// the viewport, whatever the window size.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, TouchPhase},
};

//=== Internal Dependencies ===============================================

use crate::core::InputEvent;

//=== InputProcessor ======================================================

/// Converts Winit pointer events to taps with stateful cursor tracking.
pub(crate) struct InputProcessor {
    viewport: Vec2,
    window_size: Vec2,
    cursor: Option<Vec2>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    /// Starts out assuming the window matches the viewport one to one.
    pub(crate) fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            window_size: viewport,
            cursor: None,
        }
    }

    //--- Window State -----------------------------------------------------

    pub(crate) fn resize(&mut self, size: PhysicalSize<u32>) {
        self.window_size = Vec2::new(size.width as f32, size.height as f32);
    }

    pub(crate) fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(Vec2::new(position.x as f32, position.y as f32));
    }

    pub(crate) fn cursor_left(&mut self) {
        self.cursor = None;
    }

    //--- Event Processing -------------------------------------------------

    /// Left presses become a tap at the cursor; everything else is ignored.
    pub(crate) fn process_mouse_button(
        &self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<InputEvent> {
        if button != MouseButton::Left || state != ElementState::Pressed {
            return None;
        }
        self.tap_at(self.cursor?)
    }

    /// Touch starts become taps; moves, ends and cancels are ignored.
    pub(crate) fn process_touch(
        &self,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
    ) -> Option<InputEvent> {
        if phase != TouchPhase::Started {
            return None;
        }
        self.tap_at(Vec2::new(location.x as f32, location.y as f32))
    }

    //--- Internal Helpers -------------------------------------------------

    fn tap_at(&self, window_point: Vec2) -> Option<InputEvent> {
        let scene = self.to_scene(window_point)?;
        Some(InputEvent::Tap {
            x: scene.x,
            y: scene.y,
        })
    }

    /// Window pixels (y-down) to scene space (y-up). `None` while the
    /// window is minimized.
    fn to_scene(&self, window_point: Vec2) -> Option<Vec2> {
        if self.window_size.x <= 0.0 || self.window_size.y <= 0.0 {
            return None;
        }
        let scaled = window_point / self.window_size * self.viewport;
        Some(Vec2::new(scaled.x, self.viewport.y - scaled.y))
    }
}

//=========================================================================
// Tests
//=========================================================================
