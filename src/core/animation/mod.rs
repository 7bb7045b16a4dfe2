//=========================================================================
// Animation System
//=========================================================================
//
// Timed, chained node animations driven by the host tick.
//
// Flow:
//   Scene builds Action ──> Animator::run(node, action)
//   Tick ──> Animator::advance(stage, dt) ──> Vec<Cue>
//   SceneManager delivers cues (transition requests, scene signals)
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod timeline;

//=== Public API ==========================================================

pub use action::{Action, Cue};
pub use timeline::Animator;
