//=========================================================================
// Render Backend Contract
//=========================================================================
//
// Boundary between the scene core and whatever actually draws pixels.
//
// The core never rasterizes. It hands a `Stage` (declarative node tree)
// to the backend and asks it for the two facts layout depends on:
// natural texture sizes and measured text extents.
//
// Components:
// - `AssetMetrics`: read-only sizing queries used during scene setup
// - `RenderBackend`: presentation of stages, with optional transition
// - `HeadlessBackend`: deterministic stand-in used by the host binary
//   and by tests
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::Duration;

use glam::Vec2;
use log::{info, trace};

//=== Internal Dependencies ===============================================

use crate::core::stage::Stage;

//=== TransitionEffect ====================================================

/// Visual effect used when a new stage replaces the presented one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Blend from the old stage into the new one.
    CrossFade(Duration),
}

//=== AssetMetrics ========================================================

/// Sizing queries answered by the rendering collaborator.
pub trait AssetMetrics {
    /// Natural size of a texture in scene units.
    fn texture_size(&self, key: &str) -> Vec2;

    /// Extent of `text` at `font_size`, word-wrapped at `wrap_width`
    /// when given.
    fn measure_text(&self, text: &str, font_size: f32, wrap_width: Option<f32>) -> Vec2;
}

//=== RenderBackend =======================================================

/// Presentation surface the scene manager hands stages to.
///
/// Lives on the scene thread. Backends that draw elsewhere are
/// responsible for marshalling the stage description themselves.
pub trait RenderBackend: AssetMetrics + Send {
    /// The backend viewed as its sizing half, handed to scenes during
    /// setup.
    fn metrics(&self) -> &dyn AssetMetrics;

    /// Replaces the presented stage, optionally through `effect`.
    fn present(&mut self, stage: &Stage, effect: Option<TransitionEffect>);

    /// Called once per tick with the current stage after animations have
    /// advanced.
    fn draw(&mut self, _stage: &Stage) {}
}

//=== HeadlessBackend =====================================================

/// Backend without a display.
///
/// Texture sizes come from a registered table (falling back to
/// [`HeadlessBackend::DEFAULT_TEXTURE_SIZE`]); text is measured with a
/// fixed-advance approximation. Presentations are counted and logged.
pub struct HeadlessBackend {
    textures: HashMap<String, Vec2>,
    presentations: usize,
}

impl HeadlessBackend {
    pub const DEFAULT_TEXTURE_SIZE: Vec2 = Vec2::new(256.0, 128.0);

    /// Horizontal advance per character, as a fraction of font size.
    const GLYPH_ADVANCE: f32 = 0.5;

    /// Line height as a multiple of font size.
    const LINE_HEIGHT: f32 = 1.2;

    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            presentations: 0,
        }
    }

    /// Registers the natural size of a texture.
    pub fn with_texture(mut self, key: impl Into<String>, size: Vec2) -> Self {
        self.textures.insert(key.into(), size);
        self
    }

    /// Number of stages presented so far.
    pub fn presentations(&self) -> usize {
        self.presentations
    }

    fn wrap_lines(text: &str, glyph: f32, wrap_width: Option<f32>) -> Vec<f32> {
        let mut widths = Vec::new();

        for paragraph in text.split('\n') {
            let Some(limit) = wrap_width else {
                widths.push(paragraph.chars().count() as f32 * glyph);
                continue;
            };

            let mut line = 0.0_f32;
            for word in paragraph.split_whitespace() {
                let word_width = word.chars().count() as f32 * glyph;
                let candidate = if line > 0.0 { line + glyph + word_width } else { word_width };

                if candidate > limit && line > 0.0 {
                    widths.push(line);
                    line = word_width;
                } else {
                    line = candidate;
                }
            }
            widths.push(line.min(limit));
        }

        widths
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetMetrics for HeadlessBackend {
    fn texture_size(&self, key: &str) -> Vec2 {
        self.textures
            .get(key)
            .copied()
            .unwrap_or(Self::DEFAULT_TEXTURE_SIZE)
    }

    fn measure_text(&self, text: &str, font_size: f32, wrap_width: Option<f32>) -> Vec2 {
        let glyph = font_size * Self::GLYPH_ADVANCE;
        let lines = Self::wrap_lines(text, glyph, wrap_width);
        let width = lines.iter().copied().fold(0.0_f32, f32::max);

        Vec2::new(width, lines.len() as f32 * font_size * Self::LINE_HEIGHT)
    }
}

impl RenderBackend for HeadlessBackend {
    fn metrics(&self) -> &dyn AssetMetrics {
        self
    }

    fn present(&mut self, stage: &Stage, effect: Option<TransitionEffect>) {
        self.presentations += 1;
        info!(
            "Presenting stage #{} ({} nodes, effect: {:?})",
            self.presentations,
            stage.len(),
            effect
        );
    }

    fn draw(&mut self, stage: &Stage) {
        trace!("Drawing stage with {} nodes", stage.len());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_texture_sizes_win_over_default() {
        let backend = HeadlessBackend::new().with_texture("Crane", Vec2::new(300.0, 600.0));

        assert_eq!(backend.texture_size("Crane"), Vec2::new(300.0, 600.0));
        assert_eq!(backend.texture_size("Unknown"), HeadlessBackend::DEFAULT_TEXTURE_SIZE);
    }

    #[test]
    fn single_line_text_is_not_wrapped() {
        let backend = HeadlessBackend::new();
        let size = backend.measure_text("Next", 30.0, None);

        assert_eq!(size, Vec2::new(60.0, 36.0));
    }

    #[test]
    fn explicit_newlines_start_new_lines() {
        let backend = HeadlessBackend::new();
        let size = backend.measure_text("ab\nabcd", 10.0, None);

        assert_eq!(size, Vec2::new(20.0, 24.0));
    }

    #[test]
    fn long_text_wraps_within_limit() {
        let backend = HeadlessBackend::new();
        let text = "From now on, we're going to do some work for the new home of marine life.";
        let size = backend.measure_text(text, 40.0, Some(665.6));

        assert!(size.x <= 665.6);
        assert!(size.y > 40.0 * 1.2, "Expected more than one line, got {:?}", size);
    }

    #[test]
    fn present_counts_presentations() {
        let mut backend = HeadlessBackend::new();
        let stage = Stage::new(Vec2::new(1024.0, 768.0));

        backend.present(&stage, None);
        backend.present(&stage, Some(TransitionEffect::CrossFade(Duration::from_secs(1))));

        assert_eq!(backend.presentations(), 2);
    }
}
