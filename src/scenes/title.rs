//=========================================================================
// Title Scene
//=========================================================================
//
// Title card between onboarding and the factory. Any tap moves on.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{backdrop, caption, center, SceneKind, GRAY};
use crate::core::scene::script_ui::{self, ScriptStep};
use crate::core::scene::{Scene, SceneContext};
use crate::core::stage::NodeId;

//=== Title ===============================================================

#[derive(Debug, Default)]
pub struct Title {
    script: Vec<NodeId>,
}

impl Scene<SceneKind> for Title {
    fn on_enter(&mut self, ctx: &mut SceneContext<'_, SceneKind>) {
        backdrop(ctx.stage, GRAY);
        let at = center(ctx.stage);
        ctx.stage.spawn(caption(ctx.metrics, "Ocean").named("title").at(at));

        self.script = script_ui::build_script(ctx.stage, ctx.metrics, &ScriptStep::advance("Next"));
    }

    fn on_tap(&mut self, hit: Option<&str>, ctx: &mut SceneContext<'_, SceneKind>) {
        debug!("Title tapped on {:?}", hit);
        ctx.request_transition(SceneKind::Factory);
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
    fn shows_caption_and_advance_control() {
        let mut harness = Harness::new();
        let mut title = Title::default();
        title.on_enter(&mut harness.ctx());

        assert!(harness.stage.find("title").is_some());
        assert!(harness.stage.find("nextButton").is_some());
        assert_eq!(title.script_nodes().len(), 1);
        assert_eq!(title.phase_name(), None);
    }

    #[test]
    fn any_tap_requests_factory() {
        let mut harness = Harness::new();
        let mut title = Title::default();
        title.on_enter(&mut harness.ctx());

        title.on_tap(None, &mut harness.ctx());
        assert_eq!(harness.requests(), vec![SceneKind::Factory]);

        title.on_tap(Some("backdrop"), &mut harness.ctx());
        assert_eq!(harness.requests(), vec![SceneKind::Factory]);
    }
}
