//! Spoke layout.
//!
//! Every expanded node fans its children out over the full circle around
//! itself: `step = 2π / child_count`, starting a quarter turn before the
//! parent's own angle. Distance from the parent grows with depth
//! (`spoke_base + level * spoke_step`). Directions are ignored, so this works
//! for plain text sources that carry none.

use std::collections::HashSet;
use std::f64::consts::{PI, TAU};

use crate::layout::{LayoutConfig, LayoutError, LayoutResult, LayoutStrategy, PointF, visible_children};
use crate::tree::{Node, NodeId};

pub struct SpokeLayout;

impl LayoutStrategy for SpokeLayout {
    fn layout(
        &self,
        root: &Node,
        expanded: &HashSet<NodeId>,
        cfg: &LayoutConfig,
    ) -> Result<LayoutResult, LayoutError> {
        Ok(layout_spoke(root, expanded, cfg))
    }
}

pub fn layout_spoke(root: &Node, expanded: &HashSet<NodeId>, cfg: &LayoutConfig) -> LayoutResult {
    let mut out = LayoutResult::new(cfg.node_radius);
    out.push_node(root, cfg.center, 0, expanded.contains(&root.id));
    place_children(root, cfg.center, 0.0, 0, expanded, cfg, &mut out);
    out
}

fn place_children(
    parent: &Node,
    parent_pos: PointF,
    parent_angle: f64,
    parent_level: usize,
    expanded: &HashSet<NodeId>,
    cfg: &LayoutConfig,
    out: &mut LayoutResult,
) {
    let children = visible_children(parent, expanded);
    if children.is_empty() {
        return;
    }

    let level = parent_level + 1;
    let step = TAU / children.len() as f64;
    let dist = cfg.spoke_base + level as f64 * cfg.spoke_step;

    let mut angle = parent_angle - PI / 2.0;
    for child in children {
        let point = parent_pos.offset(angle, dist);
        out.push_node(child, point, level, expanded.contains(&child.id));
        out.push_edge(&parent.id, &child.id, parent_pos, point);
        place_children(child, point, angle, level, expanded, cfg, out);
        angle += step;
    }
}
