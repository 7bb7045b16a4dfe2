//=========================================================================
// Stage Nodes
//=========================================================================
//
// Declarative node descriptions consumed by the rendering backend.
//
// A node never draws itself. It only records what should be drawn
// (texture key, solid color or text) and where, relative to its parent.
// All nodes are anchored at their center in a y-up scene space.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== NodeId ==============================================================

/// Stable handle to a node inside a [`super::Stage`].
///
/// Handles are never reused within one stage, so a handle to a removed
/// node simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

//=== Color ===============================================================

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

//=== LabelStyle ==========================================================

/// Text content and typography of a label node.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub text: String,
    pub font_size: f32,
    pub color: Color,

    /// Maximum line width before word wrapping. `None` keeps one line.
    pub wrap_width: Option<f32>,
}

impl LabelStyle {
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            color: Color::WHITE,
            wrap_width: None,
        }
    }

    pub fn wrapped(mut self, width: f32) -> Self {
        self.wrap_width = Some(width);
        self
    }
}

//=== NodeKind ============================================================

/// What a node shows.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The scene itself. Exactly one per stage.
    Root,

    /// Textured sprite. The key is opaque and resolved by the backend.
    Sprite { texture: String },

    /// Flat colored rectangle (backgrounds, translucent panels).
    Solid { color: Color },

    /// Text label.
    Label(LabelStyle),
}

//=== Node ================================================================

/// A single element of the stage tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: Option<String>,
    pub kind: NodeKind,

    /// Center position relative to the parent's center.
    pub position: Vec2,
    pub size: Vec2,

    /// Draw order relative to the parent. Accumulates down the tree.
    pub z: f32,
    pub alpha: f32,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    //--- Construction -----------------------------------------------------

    fn new(kind: NodeKind, size: Vec2) -> Self {
        Self {
            name: None,
            kind,
            position: Vec2::ZERO,
            size,
            z: 0.0,
            alpha: 1.0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn root(size: Vec2) -> Self {
        Self::new(NodeKind::Root, size)
    }

    pub fn sprite(texture: impl Into<String>, size: Vec2) -> Self {
        Self::new(NodeKind::Sprite { texture: texture.into() }, size)
    }

    pub fn solid(color: Color, size: Vec2) -> Self {
        Self::new(NodeKind::Solid { color }, size)
    }

    pub fn label(style: LabelStyle, size: Vec2) -> Self {
        Self::new(NodeKind::Label(style), size)
    }

    //--- Builder Helpers --------------------------------------------------

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    //--- Queries ----------------------------------------------------------

    /// Texture key for sprite nodes.
    pub fn texture(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Sprite { texture } => Some(texture),
            _ => None,
        }
    }

    /// Text for label nodes.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Label(style) => Some(&style.text),
            _ => None,
        }
    }
}
