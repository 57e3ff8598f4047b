// Skill tree layout.
//
// Turns a tree plus the set of expanded node ids into node positions and
// parent/child edge segments.
//
// Properties:
// - Pure: the result depends only on (tree, expanded, config)
// - Recomputed wholesale, never patched
// - Children of a collapsed node are not laid out, not drawn and not counted
//
// Strategies (see `algorithms`):
// - quadrant: direction quadrants near the root, straight chains deeper down
// - spoke: full-circle spokes around every parent, no directions needed

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::{Node, NodeId, SkillTree};

pub mod algorithms;

pub use algorithms::{QuadrantLayout, SpokeLayout, quadrant_angles};

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point `dist` away from `self` along `angle` (radians).
    pub fn offset(self, angle: f64, dist: f64) -> PointF {
        PointF {
            x: self.x + dist * angle.cos(),
            y: self.y + dist * angle.sin(),
        }
    }

    pub fn distance(self, other: PointF) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Where the root sits. Moved by `resize`.
    pub center: PointF,
    /// Ring radius before any per-level growth.
    pub base_radius: f64,
    pub node_radius: f64,
    /// Parent-to-child distance in chain mode.
    pub chain_spacing: f64,
    /// Arc shared by the siblings of one quadrant, radians.
    pub arc_width: f64,
    /// Deepest level placed on rings; deeper levels chain.
    pub chain_threshold: usize,
    /// Spoke strategy: distance at level 0 and growth per level.
    pub spoke_base: f64,
    pub spoke_step: f64,
    /// Strategy used when the tree does not name one.
    pub strategy: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center: PointF::new(600.0, 600.0),
            base_radius: 200.0,
            node_radius: 25.0,
            chain_spacing: 80.0,
            arc_width: PI / 2.0,
            chain_threshold: 1,
            spoke_base: 100.0,
            spoke_step: 50.0,
            strategy: QUADRANT.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Ring radius for `level`; each level moves out by one node diameter.
    pub fn ring_radius(&self, level: usize) -> f64 {
        self.base_radius + level as f64 * self.node_radius * 2.0
    }

    /// Distance between neighbouring chain lanes: one node diameter.
    pub fn lane_spacing(&self) -> f64 {
        self.node_radius * 2.0
    }
}

pub const QUADRANT: &str = "quadrant";
pub const SPOKE: &str = "spoke";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("node '{node}' has no direction and no ancestor with one")]
    MissingDirection { node: NodeId },
    #[error("unknown layout strategy '{0}' (expected 'quadrant' or 'spoke')")]
    UnknownStrategy(String),
}

/// A laid out node, with what the renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPosition {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub level: usize,
    pub label: String,
    pub glyph: String,
    pub has_children: bool,
    pub expanded: bool,
}

impl LayoutPosition {
    pub fn point(&self) -> PointF {
        PointF::new(self.x, self.y)
    }
}

/// Straight segment between a parent center and a child center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub parent: NodeId,
    pub child: NodeId,
    pub from: PointF,
    pub to: PointF,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    /// Pre-order, parents before children (also draw order).
    pub positions: Vec<LayoutPosition>,
    pub edges: Vec<LayoutEdge>,
    /// Radius the nodes were spaced for; drawing and hit testing use it too.
    pub node_radius: f64,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

impl LayoutResult {
    pub fn new(node_radius: f64) -> Self {
        Self {
            node_radius,
            ..Self::default()
        }
    }

    pub fn get(&self, id: &NodeId) -> Option<&LayoutPosition> {
        self.index.get(id).map(|&i| &self.positions[i])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub(crate) fn push_node(&mut self, node: &Node, at: PointF, level: usize, expanded: bool) {
        // First occurrence wins for lookups when ids repeat
        self.index.entry(node.id.clone()).or_insert(self.positions.len());
        self.positions.push(LayoutPosition {
            id: node.id.clone(),
            x: at.x,
            y: at.y,
            level,
            label: node.label.clone(),
            glyph: node.display_glyph(),
            has_children: node.has_children(),
            expanded,
        });
    }

    pub(crate) fn push_edge(&mut self, parent: &NodeId, child: &NodeId, from: PointF, to: PointF) {
        self.edges.push(LayoutEdge {
            parent: parent.clone(),
            child: child.clone(),
            from,
            to,
        });
    }
}

/// Common interface of the layout algorithms.
pub trait LayoutStrategy {
    fn layout(
        &self,
        root: &Node,
        expanded: &HashSet<NodeId>,
        cfg: &LayoutConfig,
    ) -> Result<LayoutResult, LayoutError>;
}

pub fn strategy_by_name(name: &str) -> Result<Box<dyn LayoutStrategy>, LayoutError> {
    match name {
        QUADRANT => Ok(Box::new(QuadrantLayout)),
        SPOKE => Ok(Box::new(SpokeLayout)),
        other => Err(LayoutError::UnknownStrategy(other.to_string())),
    }
}

/// Quadrant/chain layout of `root`.
pub fn compute_layout(
    root: &Node,
    expanded: &HashSet<NodeId>,
    cfg: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    QuadrantLayout.layout(root, expanded, cfg)
}

/// Lays out a whole tree with the strategy it names, or the configured default.
pub fn layout_tree(
    tree: &SkillTree,
    expanded: &HashSet<NodeId>,
    cfg: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    let name = tree.layout.as_deref().unwrap_or(&cfg.strategy);
    let strategy = strategy_by_name(name)?;
    let result = strategy.layout(&tree.root, expanded, cfg)?;
    log::debug!(
        "{} layout: {} nodes, {} edges ({} expanded)",
        name,
        result.positions.len(),
        result.edges.len(),
        expanded.len()
    );
    Ok(result)
}

/// Children that are laid out under `node`: all of them when expanded, none otherwise.
pub(crate) fn visible_children<'a>(node: &'a Node, expanded: &HashSet<NodeId>) -> &'a [Node] {
    if expanded.contains(&node.id) {
        &node.children
    } else {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Direction, Node};

    fn expanded(ids: &[&str]) -> HashSet<NodeId> {
        ids.iter().map(|s| NodeId::from(*s)).collect()
    }

    #[test]
    fn test_ring_radius_grows_by_diameter() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.ring_radius(0), 200.0);
        assert_eq!(cfg.ring_radius(1), 250.0);
        assert_eq!(cfg.ring_radius(2), 300.0);
    }

    #[test]
    fn test_point_offset() {
        let p = PointF::new(10.0, 10.0).offset(0.0, 5.0);
        assert_eq!(p, PointF::new(15.0, 10.0));
        let q = PointF::new(0.0, 0.0).offset(PI / 2.0, 2.0);
        assert!(q.x.abs() < 1e-9);
        assert!((q.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_strategy_dispatch() {
        assert!(strategy_by_name("quadrant").is_ok());
        assert!(strategy_by_name("spoke").is_ok());
        assert!(matches!(
            strategy_by_name("force"),
            Err(LayoutError::UnknownStrategy(name)) if name == "force"
        ));
    }

    #[test]
    fn test_layout_tree_uses_tree_strategy() {
        // No directions: quadrant would fail, spoke succeeds
        let mut tree = SkillTree::new(Node::new("Start").with_children(vec![Node::new("A")]));
        let cfg = LayoutConfig::default();
        assert!(layout_tree(&tree, &expanded(&["Start"]), &cfg).is_err());

        tree.layout = Some(SPOKE.to_string());
        let result = layout_tree(&tree, &expanded(&["Start"]), &cfg).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_config_from_partial_json() {
        let cfg: LayoutConfig = serde_json::from_str(r#"{ "chain_spacing": 60.0, "center": { "x": 1.0, "y": 2.0 } }"#).unwrap();
        assert_eq!(cfg.chain_spacing, 60.0);
        assert_eq!(cfg.center, PointF::new(1.0, 2.0));
        assert_eq!(cfg.base_radius, 200.0);
        assert_eq!(cfg.strategy, QUADRANT);
    }

    #[test]
    fn test_result_lookup_and_render_fields() {
        let root = Node::new("Start").with_children(vec![
            Node::new("Health").with_glyph("💪").with_direction(Direction::Right).with_children(vec![Node::new("Run")]),
        ]);
        let result = compute_layout(&root, &expanded(&["Start"]), &LayoutConfig::default()).unwrap();

        let start = result.get(&"Start".into()).unwrap();
        assert!(start.has_children && start.expanded);
        let health = result.get(&"Health".into()).unwrap();
        assert_eq!(health.glyph, "💪");
        assert!(health.has_children && !health.expanded);
        assert!(!result.contains(&"Run".into()));
        assert_eq!(result.node_radius, 25.0);
    }
}
