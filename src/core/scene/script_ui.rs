//=========================================================================
// Script UI
//=========================================================================
//
// Shared builder for the narration panel and the advance control.
//
// Layout (y-up, anchored at 20% of the viewport height):
//
//   ┌──────────── scriptArea ────────────┐  ┌ nextButton ┐
//   │   narration, wrapped at 65% width  │  │    Next    │
//   └────────────────────────────────────┘  └────────────┘
//
// Without narration the advance control sits alone at the anchor.
// The builder is a pure function of the step, viewport and metrics.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::render::AssetMetrics;
use crate::core::stage::{Color, LabelStyle, Node, NodeId, Stage};

//=== Constants ===========================================================

/// Substring that marks a node as the advance control.
pub const ADVANCE_MARKER: &str = "next";

pub const ADVANCE_BUTTON: &str = "nextButton";
pub const ADVANCE_LABEL: &str = "nextLabel";
pub const NARRATION_PANEL: &str = "scriptArea";
pub const NARRATION_LABEL: &str = "scriptLabel";

const NARRATION_FONT_SIZE: f32 = 40.0;
const ADVANCE_FONT_SIZE: f32 = 30.0;
const WRAP_RATIO: f32 = 0.65;
const PANEL_PADDING: f32 = 40.0;
const ANCHOR_HEIGHT_RATIO: f32 = 0.2;
const ADVANCE_GAP: f32 = 10.0;
const PANEL_COLOR: Color = Color::BLACK.with_alpha(0.5);

//=== ScriptStep ==========================================================

/// What a phase shows: optional narration and optional advance control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptStep {
    pub narration: Option<&'static str>,

    /// Label of the advance control. `None` hides the control.
    pub advance: Option<&'static str>,
}

impl ScriptStep {
    /// Nothing on screen.
    pub const EMPTY: ScriptStep = ScriptStep {
        narration: None,
        advance: None,
    };

    /// Narration followed by the default "Next" control.
    pub const fn narrate(text: &'static str) -> Self {
        Self {
            narration: Some(text),
            advance: Some("Next"),
        }
    }

    /// Advance control only, with a custom label.
    pub const fn advance(label: &'static str) -> Self {
        Self {
            narration: None,
            advance: Some(label),
        }
    }

    /// Number of top-level nodes [`build_script`] creates for this step.
    pub fn node_count(&self) -> usize {
        usize::from(self.narration.is_some()) + usize::from(self.advance.is_some())
    }
}

//=== Builder =============================================================

/// Returns `true` if a hit node name designates the advance control.
pub fn is_advance(name: &str) -> bool {
    name.contains(ADVANCE_MARKER)
}

/// Spawns the nodes for `step` and returns their handles.
///
/// Only top-level panels are returned; their labels are children and go
/// away with them.
pub fn build_script(
    stage: &mut Stage,
    metrics: &dyn AssetMetrics,
    step: &ScriptStep,
) -> Vec<NodeId> {
    let viewport = stage.size();
    let anchor = Vec2::new(viewport.x / 2.0, viewport.y * ANCHOR_HEIGHT_RATIO);
    let mut nodes = Vec::with_capacity(step.node_count());
    let mut narration_size = None;

    if let Some(text) = step.narration {
        let wrap = viewport.x * WRAP_RATIO;
        let text_size = metrics.measure_text(text, NARRATION_FONT_SIZE, Some(wrap));
        let panel_size = Vec2::new(wrap + PANEL_PADDING, text_size.y + PANEL_PADDING);

        let panel = stage.spawn(
            Node::solid(PANEL_COLOR, panel_size)
                .named(NARRATION_PANEL)
                .at(anchor),
        );
        stage.spawn_child(
            panel,
            Node::label(LabelStyle::new(text, NARRATION_FONT_SIZE).wrapped(wrap), text_size)
                .named(NARRATION_LABEL),
        );

        nodes.push(panel);
        narration_size = Some(panel_size);
    }

    if let Some(label) = step.advance {
        let label_size = metrics.measure_text(label, ADVANCE_FONT_SIZE, None);
        let button_size = Vec2::new(label_size.x * 2.0, label_size.y * 3.0);

        let position = match narration_size {
            Some(panel) => Vec2::new(
                anchor.x + panel.x / 2.0 + button_size.x / 2.0 + ADVANCE_GAP,
                anchor.y,
            ),
            None => anchor,
        };

        let button = stage.spawn(
            Node::solid(PANEL_COLOR, button_size)
                .named(ADVANCE_BUTTON)
                .at(position),
        );
        stage.spawn_child(
            button,
            Node::label(LabelStyle::new(label, ADVANCE_FONT_SIZE), label_size).named(ADVANCE_LABEL),
        );

        nodes.push(button);
    }

    nodes
}

/// Removes every node in `nodes` from the stage and empties the list.
pub fn clear_script(stage: &mut Stage, nodes: &mut Vec<NodeId>) {
    for id in nodes.drain(..) {
        stage.remove(id);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::HeadlessBackend;

    fn stage() -> Stage {
        Stage::new(Vec2::new(1024.0, 768.0))
    }

    #[test]
    fn empty_step_builds_nothing() {
        let mut stage = stage();
        let nodes = build_script(&mut stage, &HeadlessBackend::new(), &ScriptStep::EMPTY);

        assert!(nodes.is_empty());
        assert!(stage.is_empty());
    }

    #[test]
    fn advance_only_sits_at_anchor() {
        let mut stage = stage();
        let nodes = build_script(&mut stage, &HeadlessBackend::new(), &ScriptStep::advance("Next"));

        assert_eq!(nodes.len(), 1);
        let button = stage.get(nodes[0]).unwrap();
        assert_eq!(button.name.as_deref(), Some(ADVANCE_BUTTON));
        let anchor = Vec2::new(512.0, 768.0 * 0.2);
        assert!(button.position.distance(anchor) < 1e-3);
        assert_eq!(stage.name_at(anchor), Some(ADVANCE_LABEL));
    }

    #[test]
    fn narration_places_advance_beside_panel() {
        let mut stage = stage();
        let nodes = build_script(
            &mut stage,
            &HeadlessBackend::new(),
            &ScriptStep::narrate("Here is an old train.\nA very, very old train."),
        );

        assert_eq!(nodes.len(), 2);
        let panel = stage.get(nodes[0]).unwrap();
        let button = stage.get(nodes[1]).unwrap();

        assert_eq!(panel.name.as_deref(), Some(NARRATION_PANEL));
        assert!((panel.size.x - (1024.0 * 0.65 + 40.0)).abs() < 1e-3);

        let expected_x = panel.position.x + panel.size.x / 2.0 + button.size.x / 2.0 + 10.0;
        assert!((button.position.x - expected_x).abs() < 1e-3);
        assert_eq!(button.position.y, panel.position.y);
    }

    #[test]
    fn narration_text_is_not_an_advance_target() {
        let mut stage = stage();
        let nodes = build_script(
            &mut stage,
            &HeadlessBackend::new(),
            &ScriptStep::narrate("Hello"),
        );
        let panel_center = stage.world_position(nodes[0]).unwrap();

        let hit = stage.name_at(panel_center).unwrap();
        assert!(!is_advance(hit), "Narration hit {hit} must be inert");
    }

    #[test]
    fn repeated_build_then_clear_leaves_no_nodes() {
        let mut stage = stage();
        let backend = HeadlessBackend::new();
        let step = ScriptStep::narrate("Again");

        let mut nodes = build_script(&mut stage, &backend, &step);
        clear_script(&mut stage, &mut nodes);
        nodes = build_script(&mut stage, &backend, &step);
        clear_script(&mut stage, &mut nodes);

        assert!(nodes.is_empty());
        assert!(stage.is_empty(), "Lingering nodes: {}", stage.len() - 1);
    }

    #[test]
    fn advance_marker_matches_button_and_label() {
        assert!(is_advance(ADVANCE_BUTTON));
        assert!(is_advance(ADVANCE_LABEL));
        assert!(!is_advance(NARRATION_PANEL));
        assert!(!is_advance("train"));
    }
}
