//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the winit platform layer with the scene thread.
//
// This module defines the contract between the platform and core logic,
// so the window layer can change without touching scenes.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::InputEvent;
pub(crate) use interface::{PlatformError, PlatformEvent};
