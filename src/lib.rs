//=========================================================================
// The Last Stop — Library Root
//
// A touch-driven narrative about an old train that ends its service as
// an artificial reef.
//
// Responsibilities:
// - Expose the scene framework (`core`) and the narrative (`scenes`)
// - Keep the window layer (`platform`) hidden from end users
// - Provide the `Engine` facade that wires both together
//
// Typical usage:
// ```no_run
// use last_stop::scenes::SceneKind;
// use last_stop::EngineBuilder;
//
// fn main() {
//     EngineBuilder::<SceneKind>::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene framework: stages, animations, the scene
// manager and the phase state machine.
//
// `scenes` is the narrative built on top of it.
//
pub mod core;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window and event loop and is kept
// private, as it is not part of the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
