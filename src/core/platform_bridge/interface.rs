//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract for communication between platform and core threads.
// Coordinates are already in scene space when they cross the channel.
//
//=========================================================================

//=== InputEvent ==========================================================

/// Pointer input the scenes react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Press or touch start at a scene-space point (y-up, origin
    /// bottom-left of the viewport).
    Tap { x: f32, y: f32 },
}

//=== PlatformEvent =======================================================

/// Events sent from platform to core via the bounded channel.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Taps collected during one frame, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================
