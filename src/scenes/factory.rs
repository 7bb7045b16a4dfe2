//=========================================================================
// Factory Scene
//=========================================================================
//
// The train is stripped of parts that would pollute the ocean, one
// group per phase: windows, doors, chair, wheels.
//
// Every part except the frame is a component. Entering a removal phase
// lifts and fades each matching component, then detaches it. Components
// leave the list as soon as their removal starts and are never added
// back.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{backdrop, center, sprite, SceneKind, GRAY};
use crate::core::animation::Action;
use crate::core::scene::{Phase, SceneContext, ScriptStep, Storyboard, TerminalTap};
use crate::core::stage::NodeId;

//=== Constants ===========================================================

const FRAME: &str = "TrainFrame";

const COMPONENTS: [&str; 8] = [
    "LeftWheel",
    "RightWheel",
    "CenterWindow",
    "LeftDoor",
    "RightDoor",
    "Chair",
    "LeftWindow",
    "RightWindow",
];

/// Lift applied while a component fades out.
const REMOVAL_LIFT: f32 = 100.0;
const REMOVAL_SECONDS: f32 = 1.0;

//=== FactoryPhase ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryPhase {
    Intro1,
    Intro2,
    Window,
    Door,
    Chair,
    Wheel,
    NextScene,
    InTransition,
}

impl FactoryPhase {
    /// Component name fragment removed when this phase is entered.
    pub fn removal_target(self) -> Option<&'static str> {
        match self {
            FactoryPhase::Door => Some("Window"),
            FactoryPhase::Chair => Some("Door"),
            FactoryPhase::Wheel => Some("Chair"),
            FactoryPhase::NextScene => Some("Wheel"),
            _ => None,
        }
    }
}

impl Phase for FactoryPhase {
    const ORDER: &'static [Self] = &[
        FactoryPhase::Intro1,
        FactoryPhase::Intro2,
        FactoryPhase::Window,
        FactoryPhase::Door,
        FactoryPhase::Chair,
        FactoryPhase::Wheel,
        FactoryPhase::NextScene,
        FactoryPhase::InTransition,
    ];

    fn name(self) -> &'static str {
        match self {
            FactoryPhase::Intro1 => "intro1",
            FactoryPhase::Intro2 => "intro2",
            FactoryPhase::Window => "window",
            FactoryPhase::Door => "door",
            FactoryPhase::Chair => "chair",
            FactoryPhase::Wheel => "wheel",
            FactoryPhase::NextScene => "nextScene",
            FactoryPhase::InTransition => "inTransition",
        }
    }
}

//=== FactoryBoard ========================================================

#[derive(Default)]
pub struct FactoryBoard {
    components: Vec<(NodeId, &'static str)>,
}

impl FactoryBoard {
    /// Names of the components still attached to the train.
    pub fn components(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.iter().map(|(_, name)| *name)
    }

    fn remove_components(&mut self, target: &str, ctx: &mut SceneContext<'_, SceneKind>) {
        let before = self.components.len();

        self.components.retain(|&(id, name)| {
            if !name.contains(target) {
                return true;
            }
            ctx.animator.run(
                id,
                Action::sequence([
                    Action::group([
                        Action::move_by(0.0, REMOVAL_LIFT, REMOVAL_SECONDS),
                        Action::fade_out(REMOVAL_SECONDS),
                    ]),
                    Action::remove_from_parent(),
                ]),
            );
            false
        });

        debug!(
            "Removing {} component(s) matching {target}",
            before - self.components.len()
        );
    }
}

impl Storyboard for FactoryBoard {
    type Key = SceneKind;
    type Phase = FactoryPhase;

    const TERMINAL_TAP: TerminalTap = TerminalTap::Refresh;

    fn setup(&mut self, ctx: &mut SceneContext<'_, SceneKind>) {
        backdrop(ctx.stage, GRAY);
        let at = center(ctx.stage);

        ctx.stage.spawn(sprite(ctx.metrics, FRAME).named(FRAME).at(at));

        for name in COMPONENTS {
            let id = ctx.stage.spawn(sprite(ctx.metrics, name).named(name).at(at));
            self.components.push((id, name));
        }
    }

    fn script(&self, phase: FactoryPhase) -> ScriptStep {
        match phase {
            FactoryPhase::Intro1 => ScriptStep::narrate(
                "From now on, we're going to do some work for the new home of marine life.",
            ),
            FactoryPhase::Intro2 => ScriptStep::narrate(
                "That is to remove components that can pollute the ocean from the inside of the train.",
            ),
            FactoryPhase::Window => {
                ScriptStep::narrate("First of all, let's remove fragile items such as glass.")
            }
            FactoryPhase::Door => ScriptStep::narrate(
                "Please remove the door so that even large enough marine life can enter and exit this time.",
            ),
            FactoryPhase::Chair => ScriptStep::narrate(
                "Next, remove the chair so that several marine creatures can settle down.",
            ),
            FactoryPhase::Wheel => {
                ScriptStep::narrate("Finally, remove unnecessary wheels and it's over.")
            }
            FactoryPhase::NextScene => {
                ScriptStep::narrate("Now we're moving the new home of marine life into the ocean.")
            }
            FactoryPhase::InTransition => ScriptStep::EMPTY,
        }
    }

    fn enter(&mut self, phase: FactoryPhase, ctx: &mut SceneContext<'_, SceneKind>) {
        if let Some(target) = phase.removal_target() {
            self.remove_components(target, ctx);
        }
        if phase == FactoryPhase::InTransition {
            ctx.request_transition(SceneKind::Crane);
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

    fn entered(harness: &mut Harness<SceneKind>) -> PhasedScene<FactoryBoard> {
        let mut scene = PhasedScene::new(FactoryBoard::default());
        scene.on_enter(&mut harness.ctx());
        scene
    }

    fn tap_next(scene: &mut PhasedScene<FactoryBoard>, harness: &mut Harness<SceneKind>) {
        scene.on_tap(Some("nextButton"), &mut harness.ctx());
    }

    #[test]
    fn setup_completes_before_first_tap() {
        let mut harness = Harness::new();
        let scene = entered(&mut harness);

        assert_eq!(scene.board().components().count(), 8);
        assert!(harness.stage.find(FRAME).is_some());
        assert!(scene.board().components().all(|name| name != FRAME));
    }

    #[test]
    fn window_phase_tap_removes_windows_then_doors() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        tap_next(&mut scene, &mut harness);
        tap_next(&mut scene, &mut harness);
        assert_eq!(scene.phase(), FactoryPhase::Window);

        tap_next(&mut scene, &mut harness);
        assert_eq!(scene.phase(), FactoryPhase::Door);
        assert!(scene.board().components().all(|name| !name.contains("Window")));
        assert_eq!(scene.board().components().count(), 5);

        tap_next(&mut scene, &mut harness);
        assert_eq!(scene.phase(), FactoryPhase::Chair);
        assert!(scene.board().components().all(|name| !name.contains("Door")));
        assert_eq!(scene.board().components().count(), 3);
    }

    #[test]
    fn removed_components_lift_fade_and_detach() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        for _ in 0..3 {
            tap_next(&mut scene, &mut harness);
        }
        let window = harness.stage.find("CenterWindow").unwrap();
        let start = harness.stage.get(window).unwrap().position;

        harness.advance(&mut scene, 0.5);
        let node = harness.stage.get(window).unwrap();
        assert!(node.position.y > start.y);
        assert!(node.alpha < 1.0);

        harness.advance(&mut scene, 0.6);
        assert!(!harness.stage.contains(window));
        assert!(harness.stage.find("LeftWheel").is_some());
    }

    #[test]
    fn components_only_shrink_to_empty() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        let mut counts = vec![scene.board().components().count()];

        for _ in 0..6 {
            tap_next(&mut scene, &mut harness);
            counts.push(scene.board().components().count());
        }

        assert_eq!(scene.phase(), FactoryPhase::NextScene);
        assert_eq!(counts, vec![8, 8, 8, 5, 3, 2, 0]);
        assert!(harness.requests().is_empty());
    }

    #[test]
    fn last_advance_requests_crane_immediately() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        for _ in 0..7 {
            tap_next(&mut scene, &mut harness);
        }

        assert_eq!(scene.phase(), FactoryPhase::InTransition);
        assert_eq!(harness.requests(), vec![SceneKind::Crane]);
        assert!(scene.script_nodes().is_empty());
    }

    #[test]
    fn terminal_tap_refreshes_without_requesting() {
        let mut harness = Harness::new();
        let mut scene = entered(&mut harness);
        for _ in 0..7 {
            tap_next(&mut scene, &mut harness);
        }
        harness.requests();

        tap_next(&mut scene, &mut harness);

        assert_eq!(scene.phase(), FactoryPhase::InTransition);
        assert!(harness.requests().is_empty());
        assert!(scene.script_nodes().is_empty());
    }
}
