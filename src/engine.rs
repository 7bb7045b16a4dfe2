//=========================================================================
// The Last Stop Engine
//
// Main entry point and coordinator for the runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              └─ spawns scene thread
//         ├─ with_channel_capacity()    runs platform
//         ├─ with_viewport()            blocks until exit
//         ├─ with_title()
//         └─ with_backend()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use glam::Vec2;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformEvent;
use crate::core::render::{HeadlessBackend, RenderBackend};
use crate::core::scene::{SceneKey, TransitionSender};
use crate::core::CoreSystemsOrchestrator;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (scene updates per second)
/// - **Channel capacity**: 128 events
/// - **Viewport**: 1024 × 768 scene units
/// - **Title**: "The Last Stop"
/// - **Backend**: [`HeadlessBackend`]
///
/// # Examples
///
/// ```no_run
/// use last_stop::scenes::SceneKind;
/// use last_stop::EngineBuilder;
///
/// EngineBuilder::<SceneKind>::new()
///     .with_tps(120.0)
///     .with_channel_capacity(256)
///     .build()
///     .run();
/// ```
pub struct EngineBuilder<K: SceneKey> {
    tps: f64,
    channel_capacity: usize,
    viewport: Vec2,
    title: String,
    backend: Option<Box<dyn RenderBackend>>,
    _phantom: std::marker::PhantomData<K>,
}

impl<K: SceneKey> EngineBuilder<K> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            viewport: Vec2::new(1024.0, 768.0),
            title: "The Last Stop".to_owned(),
            backend: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target ticks per second for the scene thread.
    ///
    /// Animations advance by exactly `1 / tps` seconds per tick.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the scene-space size every stage is laid out in. The window
    /// opens at this logical size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "Viewport must be positive, got {}x{}",
            width,
            height
        );
        self.viewport = Vec2::new(width, height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the default [`HeadlessBackend`].
    pub fn with_backend(mut self, backend: impl RenderBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine<K> {
        info!(
            "Building engine (TPS: {}, channel: {}, viewport: {})",
            self.tps, self.channel_capacity, self.viewport
        );

        let backend = self
            .backend
            .unwrap_or_else(|| Box::new(HeadlessBackend::new()));

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(backend, self.viewport),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: WindowConfig {
                title: self.title,
                viewport: self.viewport,
            },
        }
    }
}

impl<K: SceneKey> Default for EngineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// The Last Stop runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Scene Thread @ TPS)
///   │     └─► SceneManager → current scene
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Tap Polling
///
/// Communication: bounded channel (PlatformEvent)
/// ```
pub struct Engine<K: SceneKey> {
    orchestrator: CoreSystemsOrchestrator<K>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<K: SceneKey> Engine<K> {
    /// Sender for requesting scene changes from outside the scene thread.
    pub fn remote(&self) -> TransitionSender<K> {
        self.orchestrator.remote()
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded channel for platform → core communication
    /// 2. Spawns the scene thread running at configured TPS
    /// 3. Runs platform event loop (blocks here)
    /// 4. On window close: platform exits → channel disconnects → scene
    ///    thread terminates
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the scene thread ------------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.window);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for scene thread to terminate --------------
        match core_handle.join() {
            Ok(()) => {
                info!("Core thread terminated cleanly");
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
            }
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
