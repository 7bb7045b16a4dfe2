//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the single current-scene slot and performs every hand-off.
//
// A scene never swaps itself out. It posts a `TransitionRequest` on the
// bus (directly or through an animation cue) and the manager acts on it
// at the next `process_transitions` call, once no scene is borrowed.
// Requests from other threads arrive through a `TransitionSender`.
//
// Each hand-off bumps a generation counter. Requests carry the
// generation of the scene that posted them, so a request from a scene
// that has already been replaced is dropped instead of replayed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Vec2;
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{dispatch_cues, Scene, SceneContext, SceneKey, TransitionRequest};
use crate::core::animation::Animator;
use crate::core::message_bus::MessageBus;
use crate::core::render::{AssetMetrics, RenderBackend, TransitionEffect};
use crate::core::stage::{NodeId, Stage};

//=== TransitionSender ====================================================

/// Cloneable handle for requesting transitions from any thread.
///
/// Requests are queued and performed on the scene thread at the next
/// [`SceneManager::process_transitions`] call.
#[derive(Debug, Clone)]
pub struct TransitionSender<K: SceneKey> {
    tx: Sender<K>,
}

impl<K: SceneKey> TransitionSender<K> {
    /// Queues a transition to `target`. Returns `false` if the manager is
    /// gone.
    pub fn request(&self, target: K) -> bool {
        match self.tx.send(target) {
            Ok(()) => true,
            Err(_) => {
                warn!("Scene manager dropped, discarding request for {:?}", target);
                false
            }
        }
    }
}

//=== SceneStatus =========================================================

/// Snapshot of the current scene for hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneStatus<K: SceneKey> {
    pub kind: K,
    pub generation: u64,
    pub phase: Option<&'static str>,
    pub script_nodes: Vec<NodeId>,
}

//=== Internal Slots ======================================================

/// A scene together with everything it owns. Dropped as one unit.
struct ActiveScene<K: SceneKey> {
    kind: K,
    generation: u64,
    scene: Box<dyn Scene<K>>,
    stage: Stage,
    animator: Animator<K>,
}

impl<K: SceneKey> ActiveScene<K> {
    fn split<'a>(
        &'a mut self,
        metrics: &'a dyn AssetMetrics,
        bus: &'a mut MessageBus,
    ) -> (&'a mut Box<dyn Scene<K>>, SceneContext<'a, K>) {
        let ctx = SceneContext {
            stage: &mut self.stage,
            animator: &mut self.animator,
            metrics,
            bus,
            generation: self.generation,
        };
        (&mut self.scene, ctx)
    }
}

/// A constructed scene waiting for its hand-off.
struct PendingScene<K: SceneKey> {
    kind: K,
    generation: u64,
    effect: Option<TransitionEffect>,
    scene: Box<dyn Scene<K>>,
}

//=== SceneManager ========================================================

/// Single-slot scene state machine.
///
/// Created with [`SceneManager::new`] and brought up with
/// [`SceneManager::start`], which performs the first transition to
/// [`SceneKey::initial`]. Between the two calls there is no current
/// scene.
pub struct SceneManager<K: SceneKey> {
    backend: Box<dyn RenderBackend>,
    viewport: Vec2,
    current: Option<ActiveScene<K>>,
    pending: VecDeque<PendingScene<K>>,
    bus: MessageBus,
    generation: u64,
    remote_tx: Sender<K>,
    remote_rx: Receiver<K>,
}

impl<K: SceneKey> SceneManager<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager presenting to `backend`.
    ///
    /// # Panics
    ///
    /// Panics if either viewport dimension is not positive.
    pub fn new(backend: Box<dyn RenderBackend>, viewport: Vec2) -> Self {
        assert!(
            viewport.x > 0.0 && viewport.y > 0.0,
            "Viewport must be positive, got {viewport}"
        );

        let (remote_tx, remote_rx) = unbounded();

        Self {
            backend,
            viewport,
            current: None,
            pending: VecDeque::new(),
            bus: MessageBus::new(),
            generation: 0,
            remote_tx,
            remote_rx,
        }
    }

    /// Performs the first transition and hands it off immediately.
    pub fn start(&mut self) {
        if self.current.is_some() {
            warn!("Scene manager already started, ignoring start()");
            return;
        }

        info!("Starting scene manager with {:?}", K::initial());
        self.transition(K::initial());
        self.process_transitions();
    }

    //--- Transitions ------------------------------------------------------

    /// Constructs `kind` and queues its hand-off.
    ///
    /// The swap happens at the next [`process_transitions`] call, after
    /// every hand-off queued before it.
    ///
    /// [`process_transitions`]: SceneManager::process_transitions
    pub fn transition(&mut self, kind: K) {
        self.generation += 1;

        let pending = PendingScene {
            kind,
            generation: self.generation,
            effect: kind.transition_effect(),
            scene: kind.create(),
        };

        debug!(
            "Queued hand-off to {:?} (generation {}, effect {:?})",
            kind, pending.generation, pending.effect
        );
        self.pending.push_back(pending);
    }

    /// Collects posted requests and performs queued hand-offs in FIFO
    /// order.
    ///
    /// Only the first request of the current scene is honoured; later ones
    /// and requests from replaced scenes are dropped. Requests from
    /// [`TransitionSender`]s are always honoured.
    pub fn process_transitions(&mut self) {
        if !self.bus.has_messages::<TransitionRequest<K>>()
            && self.remote_rx.is_empty()
            && self.pending.is_empty()
        {
            return;
        }

        let current = self.current.as_ref().map(|active| active.generation);
        let mut accepted = false;

        for request in self.bus.drain::<TransitionRequest<K>>() {
            if Some(request.generation) != current {
                warn!(
                    "Dropping stale request for {:?} from generation {}",
                    request.target, request.generation
                );
            } else if accepted {
                warn!("Dropping duplicate request for {:?}", request.target);
            } else if !self.pending.is_empty() {
                warn!(
                    "Dropping request for {:?}, a hand-off is already queued",
                    request.target
                );
            } else {
                accepted = true;
                self.transition(request.target);
            }
        }

        while let Ok(target) = self.remote_rx.try_recv() {
            debug!("Remote request for {:?}", target);
            self.transition(target);
        }

        while let Some(next) = self.pending.pop_front() {
            self.hand_off(next);
        }
    }

    /// Sender for requesting transitions from other threads.
    pub fn remote(&self) -> TransitionSender<K> {
        TransitionSender {
            tx: self.remote_tx.clone(),
        }
    }

    //--- Input and Time ---------------------------------------------------

    /// Forwards a tap at `point` (scene space) to the current scene.
    pub fn tap(&mut self, point: Vec2) {
        let Some(active) = self.current.as_mut() else {
            trace!("Tap at {point} before start, ignored");
            return;
        };

        let hit = active.stage.name_at(point).map(str::to_owned);
        trace!("Tap at {point} hit {:?} in {:?}", hit, active.kind);

        let (scene, mut ctx) = active.split(self.backend.metrics(), &mut self.bus);
        scene.on_tap(hit.as_deref(), &mut ctx);
    }

    /// Advances the current scene's animations and delivers fired cues.
    pub fn update(&mut self, dt: Duration) {
        let Some(active) = self.current.as_mut() else {
            return;
        };

        let cues = active.animator.advance(&mut active.stage, dt);
        if !cues.is_empty() {
            let (scene, mut ctx) = active.split(self.backend.metrics(), &mut self.bus);
            dispatch_cues(scene.as_mut(), cues, &mut ctx);
        }

        self.backend.draw(&active.stage);
    }

    /// One host tick: [`update`](SceneManager::update) followed by
    /// [`process_transitions`](SceneManager::process_transitions).
    pub fn tick(&mut self, dt: Duration) {
        self.update(dt);
        self.process_transitions();
    }

    //--- Queries ----------------------------------------------------------

    pub fn current_kind(&self) -> Option<K> {
        self.current.as_ref().map(|active| active.kind)
    }

    pub fn current(&self) -> Option<&dyn Scene<K>> {
        self.current.as_ref().map(|active| active.scene.as_ref())
    }

    pub fn status(&self) -> Option<SceneStatus<K>> {
        self.current.as_ref().map(|active| SceneStatus {
            kind: active.kind,
            generation: active.generation,
            phase: active.scene.phase_name(),
            script_nodes: active.scene.script_nodes().to_vec(),
        })
    }

    /// Stage of the current scene.
    pub fn stage(&self) -> Option<&Stage> {
        self.current.as_ref().map(|active| &active.stage)
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Number of hand-offs waiting for `process_transitions`.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn hand_off(&mut self, next: PendingScene<K>) {
        let PendingScene {
            kind,
            generation,
            effect,
            scene,
        } = next;

        if let Some(old) = self.current.take() {
            debug!("Releasing {:?} (generation {})", old.kind, old.generation);
        }

        let active = self.current.insert(ActiveScene {
            kind,
            generation,
            scene,
            stage: Stage::new(self.viewport),
            animator: Animator::new(),
        });

        {
            let (scene, mut ctx) = active.split(self.backend.metrics(), &mut self.bus);
            scene.on_enter(&mut ctx);
        }

        info!("Presenting {:?} (generation {})", kind, generation);
        self.backend.present(&active.stage, effect);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
