//=========================================================================
// Phase State Machine
//=========================================================================
//
// Generic scene driven by an ordered phase table.
//
// A `Storyboard` supplies the per-kind content: the phase order, the
// script step for each phase, and the side effects that run on entry.
// `PhasedScene` supplies the shared behavior every storyboard follows:
//
//   advance tap ──> terminal? ──yes──> ignore | refresh script
//                      │no
//                      ↓
//                 phase = next ──> Storyboard::enter ──> rebuild script
//
// Phases only move forward along `Phase::ORDER`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::script_ui::{self, ScriptStep};
use super::{Scene, SceneContext, SceneKey};
use crate::core::stage::NodeId;

//=== Phase Trait =========================================================

/// Scene-local phase enumeration.
///
/// `ORDER` lists every phase in the order they are entered. The last
/// entry is the terminal phase; it must not be empty.
pub trait Phase: Copy + Eq + Debug + Send + 'static {
    const ORDER: &'static [Self];

    /// Stable name used in logs and status reports.
    fn name(self) -> &'static str;

    fn initial() -> Self {
        Self::ORDER[0]
    }

    /// Phase entered by the next advance tap, `None` when terminal.
    fn next(self) -> Option<Self> {
        let index = Self::ORDER.iter().position(|phase| *phase == self)?;
        Self::ORDER.get(index + 1).copied()
    }

    fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

//=== TerminalTap =========================================================

/// What an advance tap does once the terminal phase is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalTap {
    /// Nothing happens.
    Ignore,

    /// The terminal phase's script is cleared and built again. The
    /// phase itself does not change and no transition is requested.
    Refresh,
}

//=== Storyboard Trait ====================================================

/// Per-kind content of a [`PhasedScene`].
pub trait Storyboard: Send + 'static {
    type Key: SceneKey;
    type Phase: Phase;

    const TERMINAL_TAP: TerminalTap = TerminalTap::Ignore;

    /// Creates the persistent actors. Runs once, before the first script
    /// is built.
    fn setup(&mut self, ctx: &mut SceneContext<'_, Self::Key>);

    /// Script shown while `phase` is current.
    fn script(&self, phase: Self::Phase) -> ScriptStep;

    /// Side effects of entering `phase` through an advance tap. Runs
    /// before the new script is built.
    fn enter(&mut self, _phase: Self::Phase, _ctx: &mut SceneContext<'_, Self::Key>) {}

    /// Handles a signal fired by one of the storyboard's animations.
    fn on_cue(&mut self, _signal: &'static str, _ctx: &mut SceneContext<'_, Self::Key>) {}
}

//=== PhasedScene =========================================================

/// Scene that walks a [`Storyboard`]'s phases on advance taps.
pub struct PhasedScene<B: Storyboard> {
    board: B,
    phase: B::Phase,
    script: Vec<NodeId>,
}

impl<B: Storyboard> PhasedScene<B> {
    pub fn new(board: B) -> Self {
        Self {
            board,
            phase: B::Phase::initial(),
            script: Vec::new(),
        }
    }

    pub fn phase(&self) -> B::Phase {
        self.phase
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    //--- Internal Helpers -------------------------------------------------

    fn refresh_script(&mut self, ctx: &mut SceneContext<'_, B::Key>) {
        script_ui::clear_script(ctx.stage, &mut self.script);

        let step = self.board.script(self.phase);
        self.script = script_ui::build_script(ctx.stage, ctx.metrics, &step);
    }

    fn advance(&mut self, ctx: &mut SceneContext<'_, B::Key>) {
        let Some(next) = self.phase.next() else {
            match B::TERMINAL_TAP {
                TerminalTap::Ignore => {
                    trace!("Advance tap ignored in terminal phase {}", self.phase.name());
                }
                TerminalTap::Refresh => {
                    debug!("Refreshing script of terminal phase {}", self.phase.name());
                    self.refresh_script(ctx);
                }
            }
            return;
        };

        debug!("Phase {} -> {}", self.phase.name(), next.name());
        self.phase = next;
        self.board.enter(next, ctx);
        self.refresh_script(ctx);
    }
}

impl<B: Storyboard> Scene<B::Key> for PhasedScene<B> {
    fn on_enter(&mut self, ctx: &mut SceneContext<'_, B::Key>) {
        self.board.setup(ctx);
        self.refresh_script(ctx);
    }

    fn on_tap(&mut self, hit: Option<&str>, ctx: &mut SceneContext<'_, B::Key>) {
        match hit {
            Some(name) if script_ui::is_advance(name) => self.advance(ctx),
            _ => trace!("Inert tap on {:?}", hit),
        }
    }

    fn on_cue(&mut self, signal: &'static str, ctx: &mut SceneContext<'_, B::Key>) {
        self.board.on_cue(signal, ctx);
    }

    fn phase_name(&self) -> Option<&'static str> {
        Some(self.phase.name())
    }

    fn script_nodes(&self) -> &[NodeId] {
        &self.script
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
