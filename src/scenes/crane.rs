//=========================================================================
// Crane Scene
//=========================================================================
//
// A crane lowers onto the stripped frame, lifts it, and the backdrop
// pans over to open sky before handing over to the drop.
//
// Timeline after the advance tap (seconds):
//
//   crane       ├─ lower 2 ─┤ wait ├─ raise 2 ─┤
//   trainFrame  ├── wait 3 ──────────┤─ raise 2 ─┤
//   background  ├── wait 5 ────────────────────────┤── pan 3 ──┤
//   sky         ├── wait 5 ────────────────────────┤── pan 3 ──┤ → drop
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{caption, center, sprite, SceneKind, GRAY, SKY};
use crate::core::animation::Action;
use crate::core::scene::{Phase, SceneContext, ScriptStep, Storyboard};
use crate::core::stage::{Node, NodeId};

//=== Constants ===========================================================

const FRAME: &str = "TrainFrame";
const CRANE: &str = "Crane";

/// Depth of the grab below the viewport's vertical center, as a share of
/// the viewport height.
const GRAB_DEPTH: f32 = 0.15;
const RAISE: f32 = 0.2;

//=== CranePhase ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CranePhase {
    Grab,
    InTransition,
}

impl Phase for CranePhase {
    const ORDER: &'static [Self] = &[CranePhase::Grab, CranePhase::InTransition];

    fn name(self) -> &'static str {
        match self {
            CranePhase::Grab => "grab",
            CranePhase::InTransition => "inTransition",
        }
    }
}

//=== CraneBoard ==========================================================

#[derive(Default)]
pub struct CraneBoard {
    actors: Option<Actors>,
}

struct Actors {
    background: NodeId,
    sky: NodeId,
    frame: NodeId,
    crane: NodeId,
}

impl CraneBoard {
    fn launch(actors: &Actors, ctx: &mut SceneContext<'_, SceneKind>) {
        let viewport = ctx.viewport();
        let raise = || Action::move_by(0.0, viewport.y * RAISE, 2.0);
        let pan = || Action::move_by(-viewport.x, 0.0, 3.0);
        let waits = |n: usize| (0..n).map(|_| Action::wait(1.0));

        debug!("Crane grabbing the train frame");
        ctx.run(
            actors.crane,
            Action::sequence([
                Action::move_by(0.0, -viewport.y / 2.0 - viewport.y * GRAB_DEPTH, 2.0),
                Action::wait(1.0),
                raise(),
            ]),
        );
        ctx.run(actors.frame, Action::sequence(waits(3).chain([raise()])));
        ctx.run(actors.background, Action::sequence(waits(5).chain([pan()])));
        ctx.run(
            actors.sky,
            Action::sequence(waits(5).chain([pan(), Action::transition(SceneKind::Drop)])),
        );
    }
}

impl Storyboard for CraneBoard {
    type Key = SceneKind;
    type Phase = CranePhase;

    fn setup(&mut self, ctx: &mut SceneContext<'_, SceneKind>) {
        let viewport = ctx.viewport();
        let at = center(ctx.stage);

        let background = ctx
            .stage
            .spawn(Node::solid(GRAY, viewport).named("background").at(at));
        ctx.stage.spawn_child(background, caption(ctx.metrics, "Ocean"));

        let sky = ctx.stage.spawn(
            Node::solid(SKY, viewport)
                .named("sky")
                .at(at + Vec2::new(viewport.x, 0.0)),
        );
        let frame = ctx.stage.spawn(sprite(ctx.metrics, FRAME).named("trainFrame").at(at));
        let crane = ctx.stage.spawn(
            sprite(ctx.metrics, CRANE)
                .named("crane")
                .at(Vec2::new(viewport.x / 2.0, viewport.y * 1.5)),
        );

        self.actors = Some(Actors {
            background,
            sky,
            frame,
            crane,
        });
    }

    fn script(&self, phase: CranePhase) -> ScriptStep {
        match phase {
            CranePhase::Grab => ScriptStep::advance("Next"),
            CranePhase::InTransition => ScriptStep::EMPTY,
        }
    }

    fn enter(&mut self, phase: CranePhase, ctx: &mut SceneContext<'_, SceneKind>) {
        if let (CranePhase::InTransition, Some(actors)) = (phase, &self.actors) {
            Self::launch(actors, ctx);
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

    fn grabbed(harness: &mut Harness<SceneKind>) -> PhasedScene<CraneBoard> {
        let mut scene = PhasedScene::new(CraneBoard::default());
        scene.on_enter(&mut harness.ctx());
        scene.on_tap(Some("nextButton"), &mut harness.ctx());
        scene
    }

    #[test]
    fn grab_shows_only_advance_control() {
        let mut harness = Harness::new();
        let mut scene = PhasedScene::new(CraneBoard::default());
        scene.on_enter(&mut harness.ctx());

        assert_eq!(scene.phase(), CranePhase::Grab);
        assert_eq!(scene.script_nodes().len(), 1);
        assert!(harness.animator.is_idle());
    }

    #[test]
    fn advance_launches_four_timelines() {
        let mut harness = Harness::new();
        let scene = grabbed(&mut harness);

        assert_eq!(scene.phase(), CranePhase::InTransition);
        assert!(scene.script_nodes().is_empty());
        assert_eq!(harness.animator.len(), 4);
    }

    #[test]
    fn drop_is_requested_after_sky_pans() {
        let mut harness = Harness::new();
        let mut scene = grabbed(&mut harness);

        harness.advance(&mut scene, 7.9);
        assert!(harness.requests().is_empty());

        harness.advance(&mut scene, 0.2);
        assert_eq!(harness.requests(), vec![SceneKind::Drop]);

        let sky = harness.stage.find("sky").unwrap();
        assert!((harness.stage.get(sky).unwrap().position.x - 512.0).abs() < 1e-2);
    }

    #[test]
    fn crane_ends_above_its_grab_point() {
        let mut harness = Harness::new();
        let mut scene = grabbed(&mut harness);

        harness.advance(&mut scene, 5.1);

        let crane = harness.stage.find("crane").unwrap();
        let expected = 768.0 * 1.5 - 384.0 - 768.0 * 0.15 + 768.0 * 0.2;
        assert!((harness.stage.get(crane).unwrap().position.y - expected).abs() < 1e-2);
    }
}
