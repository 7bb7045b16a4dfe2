//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle, single-slot hand-off and per-scene phase machines.
//
// Architecture:
//   SceneManager
//     ├─ current: ActiveScene { scene, stage, animator, generation }
//     ├─ pending: queued hand-offs (FIFO)
//     └─ bus: TransitionRequest<K> posted by scenes
//
// Flow:
//   tap(point) → Stage::name_at → Scene::on_tap → (request)
//   update(dt) → Animator::advance → cues → (request | Scene::on_cue)
//   process_transitions() → construct → swap → on_enter → present
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::animation::{Action, Animator, Cue};
use crate::core::message_bus::MessageBus;
use crate::core::render::{AssetMetrics, TransitionEffect};
use crate::core::stage::{NodeId, Stage};

//=== Module Declarations =================================================

mod phase;
mod scene_manager;
pub mod script_ui;

//=== Public API ==========================================================

pub use phase::{Phase, PhasedScene, Storyboard, TerminalTap};
pub use scene_manager::{SceneManager, SceneStatus, TransitionSender};
pub use script_ui::ScriptStep;

//=== Scene Key Trait =====================================================

/// Identifier of a scene variant.
///
/// Typically implemented by a game-specific enum. The key doubles as the
/// scene factory and the per-kind presentation table.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {
    /// Scene presented when the manager starts.
    fn initial() -> Self;

    /// Effect used when this scene is handed off to the display.
    fn transition_effect(self) -> Option<TransitionEffect>;

    /// Builds a fresh, not yet presented scene.
    fn create(self) -> Box<dyn Scene<Self>>;
}

//=== Transition Request ==================================================

/// Request to replace the current scene, as posted on the message bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest<K: SceneKey> {
    pub target: K,

    /// Generation of the requesting scene. Requests from a scene that is
    /// no longer current are dropped.
    pub generation: u64,
}

//=== Scene Context =======================================================

/// Everything a scene may touch while handling a lifecycle call.
///
/// The context borrows the scene's own stage and animator plus the
/// manager's mailbox. It never exposes the manager itself, so a scene
/// can only ask for a transition, not perform one.
pub struct SceneContext<'a, K: SceneKey> {
    pub stage: &'a mut Stage,
    pub animator: &'a mut Animator<K>,
    pub metrics: &'a dyn AssetMetrics,
    pub(crate) bus: &'a mut MessageBus,
    pub(crate) generation: u64,
}

impl<'a, K: SceneKey> SceneContext<'a, K> {
    /// Viewport size in scene units.
    pub fn viewport(&self) -> glam::Vec2 {
        self.stage.size()
    }

    /// Shorthand for `animator.run`.
    pub fn run(&mut self, node: NodeId, action: Action<K>) {
        self.animator.run(node, action);
    }

    /// Asks the manager to move on to `target` at the next hand-off.
    pub fn request_transition(&mut self, target: K) {
        self.bus.push(TransitionRequest {
            target,
            generation: self.generation,
        });
    }
}

//=== Scene Trait =========================================================

/// Behavior of one scene variant.
///
/// A scene is constructed by [`SceneKey::create`], receives `on_enter`
/// once it has been installed as the current scene, and from then on
/// only reacts to taps and animation cues.
pub trait Scene<K: SceneKey>: Send {
    /// Builds actors and the first script. Runs after the previous scene
    /// has been released.
    fn on_enter(&mut self, ctx: &mut SceneContext<'_, K>);

    /// Handles a tap. `hit` is the name of the node under the tap, if
    /// any.
    fn on_tap(&mut self, hit: Option<&str>, ctx: &mut SceneContext<'_, K>);

    /// Handles a scene-local signal fired by one of its animations.
    fn on_cue(&mut self, _signal: &'static str, _ctx: &mut SceneContext<'_, K>) {}

    /// Name of the current phase, for scenes that have phases.
    fn phase_name(&self) -> Option<&'static str> {
        None
    }

    /// Nodes of the script currently on display.
    fn script_nodes(&self) -> &[NodeId] {
        &[]
    }
}

//=== Cue Delivery ========================================================

/// Routes animation cues fired during a tick: transitions become requests
/// tagged with the context's generation, signals go to the scene.
pub(crate) fn dispatch_cues<K: SceneKey>(
    scene: &mut dyn Scene<K>,
    cues: Vec<Cue<K>>,
    ctx: &mut SceneContext<'_, K>,
) {
    for cue in cues {
        match cue {
            Cue::Transition(target) => ctx.request_transition(target),
            Cue::Signal(signal) => scene.on_cue(signal, ctx),
        }
    }
}

//=========================================================================
// Test Support
//=========================================================================
