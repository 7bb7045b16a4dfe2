//=========================================================================
// Onboarding Scene
//=========================================================================
//
// The old train idles on an endless rail while the narration introduces
// it. The last advance rolls the train back and forth, slides the
// factory in, and hands over to the title card.
//
// Rails scroll left continuously. Each rail fires `RAIL_WRAP` once per
// loop and the front rail is moved back behind the others.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{sprite, SceneKind, OCEAN_GROUND, SKY};
use crate::core::animation::Action;
use crate::core::scene::{Phase, SceneContext, ScriptStep, Storyboard};
use crate::core::stage::{LabelStyle, Node, NodeId};

//=== Constants ===========================================================

const TRAIN: &str = "Train";
const FACTORY: &str = "Factory";
const RAIL: &str = "Rail";

const RAIL_COUNT: usize = 60;
const RAIL_ORIGIN_X: f32 = 1500.0;

/// Rail widths covered by one scroll loop.
const RAIL_SCROLL: f32 = 3.0;

const RAIL_WRAP: &str = "rail_wrap";

//=== OnboardingPhase =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingPhase {
    AboutOldTrain,
    ChangeOfOldTrain,
    NextScene,
    InTransition,
}

impl Phase for OnboardingPhase {
    const ORDER: &'static [Self] = &[
        OnboardingPhase::AboutOldTrain,
        OnboardingPhase::ChangeOfOldTrain,
        OnboardingPhase::NextScene,
        OnboardingPhase::InTransition,
    ];

    fn name(self) -> &'static str {
        match self {
            OnboardingPhase::AboutOldTrain => "aboutOldTrain",
            OnboardingPhase::ChangeOfOldTrain => "changeOfOldTrain",
            OnboardingPhase::NextScene => "nextScene",
            OnboardingPhase::InTransition => "inTransition",
        }
    }
}

//=== OnboardingBoard =====================================================

#[derive(Default)]
pub struct OnboardingBoard {
    train: Option<NodeId>,
    factory: Option<NodeId>,

    /// Rails from front (leftmost after the next wrap) to back.
    rails: VecDeque<NodeId>,
    rail_width: f32,
}

impl OnboardingBoard {
    /// Rails in wrap order.
    pub fn rails(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rails.iter().copied()
    }

    fn launch(&self, ctx: &mut SceneContext<'_, SceneKind>) {
        let (Some(train), Some(factory)) = (self.train, self.factory) else {
            return;
        };
        let half_width = ctx.viewport().x / 2.0;

        debug!("Rolling the train out to the factory");
        ctx.run(
            train,
            Action::sequence([
                Action::move_by(-half_width, 0.0, 1.0),
                Action::wait(1.0),
                Action::wait(1.0),
                Action::move_by(half_width, 0.0, 2.0),
                Action::wait(1.0),
                Action::transition(SceneKind::Title),
            ]),
        );
        ctx.run(
            factory,
            Action::sequence([Action::wait(1.0), Action::move_to_x(half_width, 2.0)]),
        );
    }
}

impl Storyboard for OnboardingBoard {
    type Key = SceneKind;
    type Phase = OnboardingPhase;

    fn setup(&mut self, ctx: &mut SceneContext<'_, SceneKind>) {
        let viewport = ctx.viewport();
        let train_size = ctx.metrics.texture_size(TRAIN);

        ctx.stage.spawn(
            Node::solid(OCEAN_GROUND, viewport)
                .named("ground")
                .at(viewport * 0.5),
        );
        ctx.stage.spawn(
            Node::solid(SKY, viewport)
                .named("sky")
                .at(Vec2::new(viewport.x / 2.0, viewport.y - train_size.y / 2.0)),
        );

        self.train = Some(ctx.stage.spawn(
            sprite(ctx.metrics, TRAIN)
                .named("train")
                .at(viewport * Vec2::new(0.1, 0.5)),
        ));

        let factory = ctx.stage.spawn(
            sprite(ctx.metrics, FACTORY)
                .named("factory")
                .at(viewport * Vec2::new(1.5, 0.5))
                .with_z(1.0),
        );
        let sign = ctx.metrics.measure_text("Ocean", 40.0, None);
        ctx.stage
            .spawn_child(factory, Node::label(LabelStyle::new("Ocean", 40.0), sign));
        self.factory = Some(factory);

        //--- Rails ---
        self.rail_width = ctx.metrics.texture_size(RAIL).x;
        let rail_y = viewport.y / 2.0 - train_size.y / 2.0;

        for i in 1..=RAIL_COUNT {
            let x = RAIL_ORIGIN_X - i as f32 * self.rail_width;
            let rail = ctx.stage.spawn(
                sprite(ctx.metrics, RAIL)
                    .named(format!("rail{i}"))
                    .at(Vec2::new(x, rail_y)),
            );
            ctx.run(
                rail,
                Action::repeat_forever(Action::sequence([
                    Action::move_by(-self.rail_width * RAIL_SCROLL, 0.0, 1.0),
                    Action::signal(RAIL_WRAP),
                ])),
            );
            self.rails.push_back(rail);
        }
    }

    fn script(&self, phase: OnboardingPhase) -> ScriptStep {
        match phase {
            OnboardingPhase::AboutOldTrain => {
                ScriptStep::narrate("Here is an old train.\nA very, very old train.")
            }
            OnboardingPhase::ChangeOfOldTrain => ScriptStep::narrate(
                "Now let's see what changes the train will face\nwhen it can no longer run on the rail.",
            ),
            OnboardingPhase::NextScene => ScriptStep::advance("Next"),
            OnboardingPhase::InTransition => ScriptStep::EMPTY,
        }
    }

    fn enter(&mut self, phase: OnboardingPhase, ctx: &mut SceneContext<'_, SceneKind>) {
        if phase == OnboardingPhase::InTransition {
            self.launch(ctx);
        }
    }

    fn on_cue(&mut self, signal: &'static str, ctx: &mut SceneContext<'_, SceneKind>) {
        if signal != RAIL_WRAP {
            return;
        }
        let Some(front) = self.rails.pop_front() else {
            return;
        };
        if let Some(rail) = ctx.stage.get_mut(front) {
            rail.position.x += self.rail_width * RAIL_SCROLL;
        }
        self.rails.push_back(front);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
