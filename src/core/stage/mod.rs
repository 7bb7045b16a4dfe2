//=========================================================================
// Stage
//=========================================================================
//
// Retained node tree of a single scene.
//
// Architecture:
//   Stage
//     ├─ nodes: HashMap<NodeId, Node>
//     └─ root ─┬─ actor ── child label
//              ├─ actor
//              └─ script panel ── child label
//
// The stage is the only thing the rendering backend ever sees. Scenes
// spawn and mutate nodes; animations move and fade them; hit-testing
// resolves taps back to node names.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec2;
use log::trace;

//=== Module Declarations =================================================

mod node;

//=== Public API ==========================================================

pub use node::{Color, LabelStyle, Node, NodeId, NodeKind};

//=== Stage ===============================================================

/// Node tree owned by one scene for its whole lifetime.
///
/// Dropping the stage drops every node, which is how a released scene
/// disappears from the display.
pub struct Stage {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u32,
    size: Vec2,
}

impl Stage {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stage covering a viewport of `size`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive. A scene without a
    /// viewport cannot lay anything out.
    pub fn new(size: Vec2) -> Self {
        assert!(
            size.x > 0.0 && size.y > 0.0,
            "Stage size must be positive, got {}x{}",
            size.x,
            size.y
        );

        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::root(size));

        Self {
            nodes,
            root,
            next_id: 1,
            size,
        }
    }

    //--- Tree Editing -----------------------------------------------------

    /// Adds a node under the scene root.
    pub fn spawn(&mut self, node: Node) -> NodeId {
        self.spawn_child(self.root, node)
    }

    /// Adds a node under `parent`. Positions are relative to the parent.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not on this stage.
    pub fn spawn_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        assert!(
            self.nodes.contains_key(&parent),
            "Parent node {:?} is not on the stage",
            parent
        );

        let id = NodeId(self.next_id);
        self.next_id += 1;

        node.parent = Some(parent);
        node.children.clear();
        self.nodes.insert(id, node);

        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.push(id);
        }

        id
    }

    /// Detaches a node and its whole subtree from the stage.
    ///
    /// Returns `false` if the node was already gone. The root is never
    /// removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root {
            return false;
        }

        let Some(node) = self.nodes.remove(&id) else {
            return false;
        };

        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|&child| child != id);
        }

        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&child) {
                pending.extend(removed.children);
            }
        }

        trace!("Removed node {:?} ({:?})", id, node.name);
        true
    }

    //--- Queries ----------------------------------------------------------

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// First node in draw order with exactly this name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.draw_order()
            .into_iter()
            .map(|entry| entry.id)
            .find(|id| self.nodes[id].name.as_deref() == Some(name))
    }

    /// Absolute center position of a node in scene space.
    pub fn world_position(&self, id: NodeId) -> Option<Vec2> {
        let mut node = self.nodes.get(&id)?;
        let mut position = node.position;

        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            position += node.position;
        }

        Some(position)
    }

    //--- Hit Testing ------------------------------------------------------

    /// Topmost visible node whose frame contains `point`.
    ///
    /// Nodes are ranked by accumulated z, then by draw order (later
    /// siblings and children above earlier ones). The root never hits.
    pub fn node_at(&self, point: Vec2) -> Option<NodeId> {
        self.draw_order()
            .into_iter()
            .filter(|entry| entry.id != self.root && entry.alpha > 0.0)
            .filter(|entry| {
                let half = self.nodes[&entry.id].size * 0.5;
                (point - entry.center).abs().cmple(half).all()
            })
            .max_by(|a, b| {
                a.z.total_cmp(&b.z).then(a.order.cmp(&b.order))
            })
            .map(|entry| entry.id)
    }

    /// Name of the node under `point`, if it has one.
    pub fn name_at(&self, point: Vec2) -> Option<&str> {
        self.node_at(point)
            .and_then(|id| self.nodes[&id].name.as_deref())
    }

    //--- Internal Helpers -------------------------------------------------

    fn draw_order(&self) -> Vec<DrawEntry> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, Vec2::ZERO, 0.0_f32, 1.0_f32)];

        while let Some((id, offset, z, alpha)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };

            let center = offset + node.position;
            let z = z + node.z;
            let alpha = alpha * node.alpha;

            order.push(DrawEntry {
                id,
                center,
                z,
                alpha,
                order: order.len(),
            });

            // Reverse so the first child is visited first.
            for &child in node.children.iter().rev() {
                stack.push((child, center, z, alpha));
            }
        }

        order
    }
}

//--- DrawEntry -----------------------------------------------------------

struct DrawEntry {
    id: NodeId,
    center: Vec2,
    z: f32,
    alpha: f32,
    order: usize,
}

//=========================================================================
// Unit Tests
//=========================================================================
