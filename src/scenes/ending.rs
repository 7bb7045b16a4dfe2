//=========================================================================
// Ending Scene
//=========================================================================
//
// Closing card. Its "Replay" control starts the story over.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::{backdrop, caption, center, SceneKind, GRAY};
use crate::core::scene::script_ui::{self, ScriptStep};
use crate::core::scene::{Scene, SceneContext};
use crate::core::stage::NodeId;

//=== Ending ==============================================================

#[derive(Debug, Default)]
pub struct Ending {
    script: Vec<NodeId>,
}

impl Scene<SceneKind> for Ending {
    fn on_enter(&mut self, ctx: &mut SceneContext<'_, SceneKind>) {
        backdrop(ctx.stage, GRAY);
        let at = center(ctx.stage);
        ctx.stage
            .spawn(caption(ctx.metrics, "The Last Stop: Ocean").named("title").at(at));

        self.script =
            script_ui::build_script(ctx.stage, ctx.metrics, &ScriptStep::advance("Replay"));
    }

    fn on_tap(&mut self, hit: Option<&str>, ctx: &mut SceneContext<'_, SceneKind>) {
        if hit.is_some_and(script_ui::is_advance) {
            info!("Replaying from the start");
            ctx.request_transition(SceneKind::Onboarding);
        }
    }

    fn script_nodes(&self) -> &[NodeId] {
        &self.script
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::scene::test_support::Harness;

    #[test]
    fn replay_requests_onboarding() {
        let mut harness = Harness::new();
        let mut ending = Ending::default();
        ending.on_enter(&mut harness.ctx());

        ending.on_tap(Some("nextLabel"), &mut harness.ctx());

        assert_eq!(harness.requests(), vec![SceneKind::Onboarding]);
    }

    #[test]
    fn other_taps_are_inert() {
        let mut harness = Harness::new();
        let mut ending = Ending::default();
        ending.on_enter(&mut harness.ctx());

        ending.on_tap(Some("title"), &mut harness.ctx());
        ending.on_tap(None, &mut harness.ctx());

        assert!(harness.requests().is_empty());
        assert_eq!(ending.script_nodes().len(), 1);
    }
}
