//=========================================================================
// Aging Scene
//=========================================================================
//
// The sunken frame becomes a reef. Each of the first advances swaps the
// ocean backdrop for a more crowded one: seaweed, then fish.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{center, SceneKind};
use crate::core::scene::{Phase, SceneContext, ScriptStep, Storyboard};
use crate::core::stage::{Node, NodeId};

//=== AgingPhase ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgingPhase {
    Intro,
    Seaweed,
    Fish,
    Finish,
    NextScene,
    InTransition,
}

impl AgingPhase {
    /// Ocean texture shown from this phase on, if entering it swaps the
    /// backdrop.
    pub fn ocean_texture(self) -> Option<&'static str> {
        match self {
            AgingPhase::Intro => Some("OceanWithTrainFrame"),
            AgingPhase::Seaweed => Some("OceanWithTrainFrameAndSeaweed"),
            AgingPhase::Fish => Some("OceanWithTrainFrameAndSeaweedAndFishes"),
            AgingPhase::Finish | AgingPhase::NextScene | AgingPhase::InTransition => None,
        }
    }
}

impl Phase for AgingPhase {
    const ORDER: &'static [Self] = &[
        AgingPhase::Intro,
        AgingPhase::Seaweed,
        AgingPhase::Fish,
        AgingPhase::Finish,
        AgingPhase::NextScene,
        AgingPhase::InTransition,
    ];

    fn name(self) -> &'static str {
        match self {
            AgingPhase::Intro => "intro",
            AgingPhase::Seaweed => "seaweed",
            AgingPhase::Fish => "fish",
            AgingPhase::Finish => "finish",
            AgingPhase::NextScene => "nextScene",
            AgingPhase::InTransition => "inTransition",
        }
    }
}

//=== AgingBoard ==========================================================

#[derive(Default)]
pub struct AgingBoard {
    ocean: Option<NodeId>,
}

impl AgingBoard {
    /// Spawns the ocean for `texture` stretched over the viewport, then
    /// drops the previous one.
    fn show_ocean(&mut self, texture: &str, ctx: &mut SceneContext<'_, SceneKind>) {
        let at = center(ctx.stage);
        let size = ctx.viewport();
        let next = ctx
            .stage
            .spawn(Node::sprite(texture, size).named("ocean").at(at));

        if let Some(previous) = self.ocean.replace(next) {
            ctx.stage.remove(previous);
        }
        debug!("Ocean backdrop is now {texture}");
    }
}

impl Storyboard for AgingBoard {
    type Key = SceneKind;
    type Phase = AgingPhase;

    fn setup(&mut self, ctx: &mut SceneContext<'_, SceneKind>) {
        if let Some(texture) = AgingPhase::initial().ocean_texture() {
            self.show_ocean(texture, ctx);
        }
    }

    fn script(&self, phase: AgingPhase) -> ScriptStep {
        match phase {
            AgingPhase::Intro => {
                ScriptStep::narrate("The new appearance of the train makes two major changes.")
            }
            AgingPhase::Seaweed => ScriptStep::narrate(
                "First of all, it allows seaweeds floating in the sea to settle.",
            ),
            AgingPhase::Fish => ScriptStep::narrate(
                "After that, fish attracted by seaweed become a haven to hide from natural enemies.",
            ),
            AgingPhase::Finish => ScriptStep::narrate(
                "Recycling these unusable trains can reduce environmental pollution and help marine life.",
            ),
            AgingPhase::NextScene => ScriptStep::advance("Next for the end"),
            AgingPhase::InTransition => ScriptStep::EMPTY,
        }
    }

    fn enter(&mut self, phase: AgingPhase, ctx: &mut SceneContext<'_, SceneKind>) {
        if let Some(texture) = phase.ocean_texture() {
            self.show_ocean(texture, ctx);
        }
        if phase == AgingPhase::InTransition {
            ctx.request_transition(SceneKind::Ending);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::test_support::Harness;
    use crate::core::scene::{PhasedScene, Scene};

    fn entered(harness: &mut Harness<SceneKind>) -> PhasedScene<AgingBoard> {
        let mut scene = PhasedScene::new(AgingBoard::default());
        scene.on_enter(&mut harness.ctx());
        scene
    }

    fn ocean_texture(harness: &Harness<SceneKind>) -> Option<String> {
        let id = harness.stage.find("ocean")?;
        harness.stage.get(id)?.texture().map(str::to_owned)
    }

    #[test]
    fn ocean_grows_seaweed_then_fish() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        assert_eq!(ocean_texture(&harness).as_deref(), Some("OceanWithTrainFrame"));

        scene.on_tap(Some("nextButton"), &mut harness.ctx());
        assert_eq!(
            ocean_texture(&harness).as_deref(),
            Some("OceanWithTrainFrameAndSeaweed")
        );

        scene.on_tap(Some("nextButton"), &mut harness.ctx());
        assert_eq!(
            ocean_texture(&harness).as_deref(),
            Some("OceanWithTrainFrameAndSeaweedAndFishes")
        );

        // Root, one ocean, narration panel and label, button and label.
        assert_eq!(harness.stage.len(), 6);
    }

    #[test]
    fn next_scene_shows_custom_advance_label() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        for _ in 0..4 {
            scene.on_tap(Some("nextButton"), &mut harness.ctx());
        }

        assert_eq!(scene.phase(), AgingPhase::NextScene);
        assert_eq!(scene.script_nodes().len(), 1);
        let label = harness.stage.find("nextLabel").unwrap();
        assert_eq!(harness.stage.get(label).unwrap().text(), Some("Next for the end"));
    }

    #[test]
    fn final_advance_requests_ending_once() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        for _ in 0..5 {
            scene.on_tap(Some("nextButton"), &mut harness.ctx());
        }
        assert_eq!(harness.requests(), vec![SceneKind::Ending]);

        scene.on_tap(Some("nextButton"), &mut harness.ctx());
        assert!(harness.requests().is_empty());
        assert_eq!(scene.phase(), AgingPhase::InTransition);
    }

    #[test]
    fn finish_keeps_the_fish_backdrop() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        for _ in 0..3 {
            scene.on_tap(Some("nextButton"), &mut harness.ctx());
        }

        assert_eq!(scene.phase(), AgingPhase::Finish);
        assert_eq!(
            ocean_texture(&harness).as_deref(),
            Some("OceanWithTrainFrameAndSeaweedAndFishes")
        );
    }
}
