//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use last_stop::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Input
pub use crate::core::InputEvent;

// Stage and animation
pub use crate::core::animation::{Action, Animator, Cue};
pub use crate::core::stage::{Color, LabelStyle, Node, NodeId, Stage};

// Rendering
pub use crate::core::render::{AssetMetrics, HeadlessBackend, RenderBackend, TransitionEffect};

// Scene system
pub use crate::core::scene::{
    Phase, PhasedScene, Scene, SceneContext, SceneKey, SceneManager, SceneStatus, ScriptStep,
    Storyboard, TerminalTap, TransitionSender,
};

// Message bus
pub use crate::core::message_bus::MessageBus;

// Narrative
pub use crate::scenes::SceneKind;
