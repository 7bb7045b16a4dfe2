//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the scene thread via a bounded
// crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  InputProcessor          │    │  EventCollector  │
//  │   ├─ Tracks cursor       │    │  ↓               │
//  │   └─ Window → scene      │    │  SceneManager    │
//  │   ↓                      │    │  ↓               │
//  │  InputBuffer             │    │  Current Scene   │
//  │   └─ taps: Vec<>         │    │                  │
//  │   ↓                      │    └──────────────────┘
//  │  RedrawRequested         │             ↑
//  │   ↓ (flush)              │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
//
//  Frame Boundary: RedrawRequested
//    → All buffered taps sent atomically
//    → Core processes at fixed TPS (independent of refresh rate)
//    → Empty buffers NOT sent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: Batches taps so their order is
//   kept even with high event rates
// - **Graceful channel disconnect**: If core thread dies, platform logs
//   warning but continues running to allow window closure
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use glam::Vec2;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Initial window attributes.
#[derive(Debug, Clone)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub viewport: Vec2,
}

//=== Platform ============================================================

/// Window manager and tap aggregator.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends
/// batched taps to the core thread.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(sender, config)`
/// 2. **Execution**: `platform.run()` - starts event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: User closes window → sends `WindowClosed` → exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    config: WindowConfig,

    /// Buffers taps until frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet - that happens lazily in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(config.viewport),
            config,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends this frame's taps to the core thread.
    ///
    /// If the channel is disconnected (core thread panicked or exited
    /// early), logs a warning and drops the taps so the window can still
    /// be closed.
    fn flush_input_buffer(&mut self) {
        if let Some(taps) = self.buffer.drain() {
            let count = taps.len();
            trace!(target: "platform::input", "Flushing {} taps", count);

            if self.event_sender.send(PlatformEvent::Inputs(taps)).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} taps",
                    count
                );
            }
        }
    }

    fn buffer_tap(&mut self, tap: Option<crate::core::InputEvent>) {
        if let Some(tap) = tap {
            trace!(target: "platform::input", "Tap buffered: {:?}", tap);
            self.buffer.push(tap);
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.viewport.x as f64,
                self.config.viewport.y as f64,
            ));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.input_processor.resize(window.inner_size());
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Window resized to {}x{}", size.width, size.height);
                self.input_processor.resize(size);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input_processor.cursor_moved(position);
            }

            WindowEvent::CursorLeft { .. } => {
                self.input_processor.cursor_left();
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let tap = self.input_processor.process_mouse_button(button, state);
                self.buffer_tap(tap);
            }

            WindowEvent::Touch(touch) => {
                let tap = self.input_processor.process_touch(touch.phase, touch.location);
                self.buffer_tap(tap);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered taps
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InputEvent;
    use crossbeam_channel::unbounded;

    fn config() -> WindowConfig {
        WindowConfig {
            title: "The Last Stop".into(),
            viewport: Vec2::new(1024.0, 768.0),
        }
    }

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(tx, config());
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, config());

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_taps() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, config());

        platform.buffer_tap(Some(InputEvent::Tap { x: 1.0, y: 2.0 }));
        platform.buffer_tap(None);
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs(taps)) => {
                assert_eq!(taps, vec![InputEvent::Tap { x: 1.0, y: 2.0 }]);
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, config());
        platform.buffer_tap(Some(InputEvent::Tap { x: 0.0, y: 0.0 }));

        drop(rx);

        // Should not panic, just log warning
        platform.flush_input_buffer();
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, config());
        platform.buffer_tap(Some(InputEvent::Tap { x: 0.0, y: 0.0 }));

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }
}
