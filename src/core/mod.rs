//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the scene systems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the scene manager and everything it drives (stages, animators)
// - Receive taps from the platform via the bounded channel
// - Maintain deterministic pacing using a fixed tick rate (TPS)
//
// Notes:
// The orchestrator runs independently from the platform layer. Scenes
// never leave the logic thread; the platform only ever sees
// `PlatformEvent`s.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod animation;
pub mod message_bus;
pub(crate) mod platform_bridge;
pub mod render;
pub mod scene;
pub mod stage;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use glam::Vec2;
use log::{debug, info};

//=== Internal Modules ====================================================

use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use render::RenderBackend;
use scene::{SceneKey, SceneManager, TransitionSender};

pub use platform_bridge::InputEvent;

//=== CoreSystemsOrchestrator =============================================
//
// Owns the scene manager until the logic thread takes it over.
//
pub(crate) struct CoreSystemsOrchestrator<K: SceneKey> {
    manager: SceneManager<K>,
}

impl<K: SceneKey> CoreSystemsOrchestrator<K> {
    //--- Construction -----------------------------------------------------
    //
    // Builds the manager but does not start it. The first scene is
    // entered on the logic thread.
    //
    pub fn new(backend: Box<dyn RenderBackend>, viewport: Vec2) -> Self {
        Self {
            manager: SceneManager::new(backend, viewport),
        }
    }

    pub fn remote(&self) -> TransitionSender<K> {
        self.manager.remote()
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread ticking the scene manager at a fixed
    // update frequency (TPS - ticks per second).
    //
    // Each tick:
    //  1. Collects taps from the platform
    //  2. Forwards them to the current scene
    //  3. Advances animations and performs queued hand-offs
    //  4. Sleeps to maintain fixed pacing
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut manager = self.manager;
            let mut collector = EventCollector::new(receiver);

            manager.start();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }

                //--- Step 2: Route taps -----------------------------------
                Self::route_inputs(&mut manager, collector.take_inputs());

                //--- Step 3: Animate and hand off -------------------------
                manager.tick(frame_duration);

                //--- Step 4: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            debug!("Last scene was {:?}", manager.current_kind());
        })
    }

    fn route_inputs(manager: &mut SceneManager<K>, inputs: Vec<InputEvent>) {
        for input in inputs {
            match input {
                InputEvent::Tap { x, y } => manager.tap(Vec2::new(x, y)),
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
