//=========================================================================
// Drop Scene
//=========================================================================
//
// The crane lets go and the frame sinks while the ocean rises around
// it. The ocean floor arrives last and hands over to the aging scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{sprite, SceneKind, OCEAN, OCEAN_GROUND, SKY};
use crate::core::animation::Action;
use crate::core::scene::{Phase, SceneContext, ScriptStep, Storyboard};
use crate::core::stage::{Node, NodeId};

//=== Constants ===========================================================

const FRAME: &str = "TrainFrame";
const CRANE: &str = "Crane";

/// Height of the frame above center when the scene opens, as a share of
/// the viewport height. Matches where the crane scene left it.
const HANG: f32 = 0.2;
const GRAB_DEPTH: f32 = 0.15;

//=== DropPhase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPhase {
    Drop,
    InTransition,
}

impl Phase for DropPhase {
    const ORDER: &'static [Self] = &[DropPhase::Drop, DropPhase::InTransition];

    fn name(self) -> &'static str {
        match self {
            DropPhase::Drop => "drop",
            DropPhase::InTransition => "inTransition",
        }
    }
}

//=== DropBoard ===========================================================

#[derive(Default)]
pub struct DropBoard {
    actors: Option<Actors>,
}

struct Actors {
    sky: NodeId,
    ocean: NodeId,
    ground: NodeId,
    frame: NodeId,
    frame_height: f32,
    crane: NodeId,
}

impl DropBoard {
    fn launch(actors: &Actors, ctx: &mut SceneContext<'_, SceneKind>) {
        let viewport = ctx.viewport();
        let settle = || Action::move_to_y(viewport.y / 2.0, 1.0);

        debug!("Dropping the train frame into the ocean");
        ctx.run(actors.frame, settle());
        ctx.run(actors.crane, Action::move_by(0.0, viewport.y / 2.0, 1.0));
        ctx.run(actors.ocean, Action::sequence([Action::wait(1.0), settle()]));
        ctx.run(
            actors.ground,
            Action::sequence([
                Action::wait(1.0),
                Action::wait(1.0),
                Action::move_by(0.0, viewport.y * 2.0 + actors.frame_height / 2.0, 1.0),
                Action::transition(SceneKind::Aging),
            ]),
        );
        ctx.run(actors.sky, Action::move_by(0.0, viewport.y, 1.0));
    }
}

impl Storyboard for DropBoard {
    type Key = SceneKind;
    type Phase = DropPhase;

    fn setup(&mut self, ctx: &mut SceneContext<'_, SceneKind>) {
        let viewport = ctx.viewport();
        let mid_x = viewport.x / 2.0;
        let sunk = Vec2::new(mid_x, -viewport.y * 2.0);

        let sky = ctx.stage.spawn(
            Node::solid(SKY, viewport * Vec2::new(1.0, 3.0))
                .named("sky")
                .at(viewport * 0.5),
        );
        let ocean = ctx
            .stage
            .spawn(Node::solid(OCEAN, viewport).named("ocean").at(sunk).with_z(0.0));
        let ground = ctx.stage.spawn(
            Node::solid(OCEAN_GROUND, viewport * Vec2::new(1.0, 0.5))
                .named("oceanGround")
                .at(sunk)
                .with_z(0.1),
        );

        let frame_node = sprite(ctx.metrics, FRAME)
            .named("trainFrame")
            .at(Vec2::new(mid_x, viewport.y / 2.0 + viewport.y * HANG));
        let frame_height = frame_node.size.y;
        let frame = ctx.stage.spawn(frame_node);

        let crane = ctx.stage.spawn(
            sprite(ctx.metrics, CRANE).named("crane").at(Vec2::new(
                mid_x,
                viewport.y - viewport.y * GRAB_DEPTH + viewport.y * HANG,
            )),
        );

        self.actors = Some(Actors {
            sky,
            ocean,
            ground,
            frame,
            frame_height,
            crane,
        });
    }

    fn script(&self, phase: DropPhase) -> ScriptStep {
        match phase {
            DropPhase::Drop => ScriptStep::advance("Next"),
            DropPhase::InTransition => ScriptStep::EMPTY,
        }
    }

    fn enter(&mut self, phase: DropPhase, ctx: &mut SceneContext<'_, SceneKind>) {
        if let (DropPhase::InTransition, Some(actors)) = (phase, &self.actors) {
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

    fn dropped(harness: &mut Harness<SceneKind>) -> PhasedScene<DropBoard> {
        let mut scene = PhasedScene::new(DropBoard::default());
        scene.on_enter(&mut harness.ctx());
        scene.on_tap(Some("nextLabel"), &mut harness.ctx());
        scene
    }

    fn y_of(harness: &Harness<SceneKind>, name: &str) -> f32 {
        let id = harness.stage.find(name).unwrap();
        harness.stage.get(id).unwrap().position.y
    }

    #[test]
    fn ocean_starts_below_the_viewport() {
        let mut harness = Harness::new();
        let mut scene = PhasedScene::new(DropBoard::default());
        scene.on_enter(&mut harness.ctx());

        assert_eq!(y_of(&harness, "ocean"), -768.0 * 2.0);
        assert_eq!(y_of(&harness, "oceanGround"), -768.0 * 2.0);
        assert_eq!(scene.phase(), DropPhase::Drop);
    }

    #[test]
    fn frame_settles_and_ocean_rises() {
        let mut harness = Harness::new();
        let mut scene = dropped(&mut harness);

        harness.advance(&mut scene, 2.05);

        assert!((y_of(&harness, "trainFrame") - 384.0).abs() < 1e-2);
        assert!((y_of(&harness, "ocean") - 384.0).abs() < 1e-2);
        assert!(harness.requests().is_empty());
    }

    #[test]
    fn ground_arrival_requests_aging() {
        let mut harness = Harness::new();
        let mut scene = dropped(&mut harness);

        harness.advance(&mut scene, 2.9);
        assert!(harness.requests().is_empty());

        harness.advance(&mut scene, 0.2);
        assert_eq!(harness.requests(), vec![SceneKind::Aging]);
    }

    #[test]
    fn terminal_tap_launches_nothing_more() {
        let mut harness = Harness::new();
        let mut scene = dropped(&mut harness);
        let timelines = harness.animator.len();

        scene.on_tap(Some("nextLabel"), &mut harness.ctx());

        assert_eq!(harness.animator.len(), timelines);
        assert_eq!(timelines, 5);
    }
}
