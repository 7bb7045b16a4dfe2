//=========================================================================
// The Last Stop Scenes
//=========================================================================
//
// Scene catalogue of the narrative and its presentation table.
//
//   onboarding ─> title ─> factory ─> crane ─> drop ─> aging ─> ending
//       ↑                                                         │
//       └─────────────────────────── replay ──────────────────────┘
//
// `underwater` is kept as a catalogue entry and builds the crane scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::render::{AssetMetrics, TransitionEffect};
use crate::core::scene::{PhasedScene, Scene, SceneKey};
use crate::core::stage::{Color, LabelStyle, Node, NodeId, Stage};

//=== Module Declarations =================================================

mod aging;
mod crane;
mod drop;
mod ending;
mod factory;
mod onboarding;
mod title;

//=== Public API ==========================================================

pub use aging::{AgingBoard, AgingPhase};
pub use crane::{CraneBoard, CranePhase};
pub use drop::{DropBoard, DropPhase};
pub use ending::Ending;
pub use factory::{FactoryBoard, FactoryPhase};
pub use onboarding::{OnboardingBoard, OnboardingPhase};
pub use title::Title;

//=== Palette =============================================================

pub(crate) const GRAY: Color = Color::rgb(0.42, 0.45, 0.48);
pub(crate) const SKY: Color = Color::rgb(0.53, 0.78, 0.92);
pub(crate) const OCEAN: Color = Color::rgb(0.07, 0.33, 0.55);
pub(crate) const OCEAN_GROUND: Color = Color::rgb(0.76, 0.66, 0.47);

const CROSSFADE: Duration = Duration::from_secs(1);
const TITLE_FONT_SIZE: f32 = 40.0;

//=== SceneKind ===========================================================

/// Every scene of the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Onboarding,
    Title,
    Factory,
    Crane,
    Drop,
    Underwater,
    Aging,
    Ending,
}

impl SceneKind {
    pub const ALL: [SceneKind; 8] = [
        SceneKind::Onboarding,
        SceneKind::Title,
        SceneKind::Factory,
        SceneKind::Crane,
        SceneKind::Drop,
        SceneKind::Underwater,
        SceneKind::Aging,
        SceneKind::Ending,
    ];
}

impl SceneKey for SceneKind {
    fn initial() -> Self {
        SceneKind::Onboarding
    }

    fn transition_effect(self) -> Option<TransitionEffect> {
        match self {
            SceneKind::Onboarding | SceneKind::Title | SceneKind::Factory | SceneKind::Ending => {
                Some(TransitionEffect::CrossFade(CROSSFADE))
            }
            SceneKind::Crane | SceneKind::Drop | SceneKind::Underwater | SceneKind::Aging => None,
        }
    }

    fn create(self) -> Box<dyn Scene<Self>> {
        match self {
            SceneKind::Onboarding => Box::new(PhasedScene::new(OnboardingBoard::default())),
            SceneKind::Title => Box::new(Title::default()),
            SceneKind::Factory => Box::new(PhasedScene::new(FactoryBoard::default())),
            SceneKind::Crane | SceneKind::Underwater => {
                Box::new(PhasedScene::new(CraneBoard::default()))
            }
            SceneKind::Drop => Box::new(PhasedScene::new(DropBoard::default())),
            SceneKind::Aging => Box::new(PhasedScene::new(AgingBoard::default())),
            SceneKind::Ending => Box::new(Ending::default()),
        }
    }
}

//=== Shared Actors =======================================================

/// Sprite at its texture's natural size.
pub(crate) fn sprite(metrics: &dyn AssetMetrics, texture: &str) -> Node {
    Node::sprite(texture, metrics.texture_size(texture))
}

/// Solid rectangle covering the whole viewport.
pub(crate) fn backdrop(stage: &mut Stage, color: Color) -> NodeId {
    let size = stage.size();
    stage.spawn(Node::solid(color, size).named("backdrop").at(size * 0.5))
}

/// Centered white caption, as used by the title cards.
pub(crate) fn caption(metrics: &dyn AssetMetrics, text: &str) -> Node {
    let size = metrics.measure_text(text, TITLE_FONT_SIZE, None);
    Node::label(LabelStyle::new(text, TITLE_FONT_SIZE), size)
}

/// Viewport center.
pub(crate) fn center(stage: &Stage) -> Vec2 {
    stage.size() * 0.5
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::HeadlessBackend;
    use crate::core::scene::test_support::{TICK, VIEWPORT};
    use crate::core::scene::SceneManager;

    //--- Helpers ----------------------------------------------------------

    fn manager() -> SceneManager<SceneKind> {
        let mut manager = SceneManager::new(Box::new(HeadlessBackend::new()), VIEWPORT);
        manager.start();
        manager
    }

    fn tap_named(manager: &mut SceneManager<SceneKind>, name: &str) {
        let point = manager
            .stage()
            .and_then(|stage| stage.find(name).and_then(|id| stage.world_position(id)))
            .unwrap_or_else(|| panic!("No node named {name} on stage"));
        manager.tap(point);
    }

    fn advance(manager: &mut SceneManager<SceneKind>) {
        tap_named(manager, "nextButton");
        manager.process_transitions();
    }

    fn run_for(manager: &mut SceneManager<SceneKind>, seconds: f32) {
        let ticks = (seconds / TICK.as_secs_f32()).ceil() as usize;
        for _ in 0..ticks {
            manager.tick(TICK);
        }
    }

    fn phase(manager: &SceneManager<SceneKind>) -> Option<&'static str> {
        manager.status().and_then(|status| status.phase)
    }

    //--- Presentation Table -----------------------------------------------

    #[test]
    fn crossfade_table_matches_catalogue() {
        let faded: Vec<_> = SceneKind::ALL
            .into_iter()
            .filter(|kind| kind.transition_effect().is_some())
            .collect();

        assert_eq!(
            faded,
            vec![SceneKind::Onboarding, SceneKind::Title, SceneKind::Factory, SceneKind::Ending]
        );
        assert_eq!(
            SceneKind::Title.transition_effect(),
            Some(TransitionEffect::CrossFade(Duration::from_secs(1)))
        );
    }

    #[test]
    fn underwater_builds_crane_scene() {
        let mut manager = manager();
        manager.transition(SceneKind::Underwater);
        manager.process_transitions();

        assert_eq!(manager.current_kind(), Some(SceneKind::Underwater));
        assert_eq!(phase(&manager), Some("grab"));
        assert!(manager.stage().and_then(|s| s.find("crane")).is_some());
    }

    //--- Scenarios --------------------------------------------------------

    #[test]
    fn onboarding_walks_to_title() {
        let mut manager = manager();
        assert_eq!(manager.current_kind(), Some(SceneKind::Onboarding));
        assert_eq!(phase(&manager), Some("aboutOldTrain"));

        advance(&mut manager);
        assert_eq!(phase(&manager), Some("changeOfOldTrain"));
        advance(&mut manager);
        assert_eq!(phase(&manager), Some("nextScene"));
        advance(&mut manager);
        assert_eq!(phase(&manager), Some("inTransition"));
        assert_eq!(manager.status().map(|s| s.script_nodes.len()), Some(0));

        run_for(&mut manager, 5.5);
        assert_eq!(manager.current_kind(), Some(SceneKind::Onboarding));

        run_for(&mut manager, 0.6);
        assert_eq!(manager.current_kind(), Some(SceneKind::Title));
    }

    #[test]
    fn factory_removes_components_by_phase() {
        let mut manager = manager();
        manager.transition(SceneKind::Factory);
        manager.process_transitions();

        advance(&mut manager);
        advance(&mut manager);
        assert_eq!(phase(&manager), Some("window"));

        advance(&mut manager);
        assert_eq!(phase(&manager), Some("door"));
        run_for(&mut manager, 1.1);
        let stage = manager.stage().unwrap();
        assert!(stage.find("CenterWindow").is_none());
        assert!(stage.find("LeftDoor").is_some());

        advance(&mut manager);
        assert_eq!(phase(&manager), Some("chair"));
        run_for(&mut manager, 1.1);
        let stage = manager.stage().unwrap();
        assert!(stage.find("LeftDoor").is_none());
        assert!(stage.find("RightDoor").is_none());
        assert!(stage.find("Chair").is_some());
    }

    #[test]
    fn crane_grab_hands_off_to_drop() {
        let mut manager = manager();
        manager.transition(SceneKind::Crane);
        manager.process_transitions();

        advance(&mut manager);
        assert_eq!(phase(&manager), Some("inTransition"));

        run_for(&mut manager, 7.9);
        assert_eq!(manager.current_kind(), Some(SceneKind::Crane));

        run_for(&mut manager, 0.2);
        assert_eq!(manager.current_kind(), Some(SceneKind::Drop));
    }

    #[test]
    fn full_playthrough_returns_to_onboarding() {
        let mut manager = manager();

        for _ in 0..3 {
            advance(&mut manager);
        }
        run_for(&mut manager, 6.1);
        assert_eq!(manager.current_kind(), Some(SceneKind::Title));

        manager.tap(Vec2::new(10.0, 10.0));
        manager.process_transitions();
        assert_eq!(manager.current_kind(), Some(SceneKind::Factory));

        for _ in 0..7 {
            advance(&mut manager);
        }
        assert_eq!(manager.current_kind(), Some(SceneKind::Crane));

        advance(&mut manager);
        run_for(&mut manager, 8.1);
        assert_eq!(manager.current_kind(), Some(SceneKind::Drop));

        advance(&mut manager);
        run_for(&mut manager, 3.1);
        assert_eq!(manager.current_kind(), Some(SceneKind::Aging));

        for _ in 0..5 {
            advance(&mut manager);
        }
        assert_eq!(manager.current_kind(), Some(SceneKind::Ending));

        advance(&mut manager);
        assert_eq!(manager.current_kind(), Some(SceneKind::Onboarding));
        assert_eq!(phase(&manager), Some("aboutOldTrain"));
    }

    #[test]
    fn terminal_taps_do_not_double_transition() {
        let mut manager = manager();
        manager.transition(SceneKind::Drop);
        manager.process_transitions();

        advance(&mut manager);
        let generation = manager.status().map(|s| s.generation);

        manager.tap(VIEWPORT * Vec2::new(0.5, 0.2));
        manager.process_transitions();

        assert_eq!(manager.status().map(|s| s.generation), generation);
        assert_eq!(phase(&manager), Some("inTransition"));
    }
}
