//! Quadrant layout with chain mode.
//!
//! Near the root (levels up to `chain_threshold`) every node sits on a ring
//! around the center. Its angle comes from its direction quadrant:
//! the siblings sharing a quadrant split the quadrant's arc evenly, leaving
//! half a step of margin at both ends.
//!
//! Deeper nodes switch to chain mode: each child sits `chain_spacing` away
//! from its own parent, straight along the quadrant direction. This keeps
//! long progressions readable without shrinking arcs at every level.
//!
//! Chain-mode siblings sharing a direction get side-by-side lanes across that
//! direction, one node diameter apart. A lane is as wide as the number of
//! leaves in the child's whole subtree, so an only child stays on the axis and
//! expanding or collapsing a node never moves anything else.
//!
//! A node's direction is its own, or the nearest ancestor's. A visible node
//! without either is an error rather than a silent angle 0.

use std::collections::HashSet;
use std::f64::consts::PI;

use crate::layout::{LayoutConfig, LayoutError, LayoutResult, LayoutStrategy, PointF, visible_children};
use crate::tree::{Direction, Node, NodeId};

pub struct QuadrantLayout;

impl LayoutStrategy for QuadrantLayout {
    fn layout(
        &self,
        root: &Node,
        expanded: &HashSet<NodeId>,
        cfg: &LayoutConfig,
    ) -> Result<LayoutResult, LayoutError> {
        layout_quadrant(root, expanded, cfg)
    }
}

pub fn layout_quadrant(
    root: &Node,
    expanded: &HashSet<NodeId>,
    cfg: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    let mut out = LayoutResult::new(cfg.node_radius);
    out.push_node(root, cfg.center, 0, expanded.contains(&root.id));
    place_children(root, cfg.center, 0, root.direction, expanded, cfg, &mut out)?;
    Ok(out)
}

/// Angles of `n` siblings sharing one quadrant, in sibling order.
///
/// `step = arc / (n + 1)`; sibling `i` sits at `base - arc/2 + step * (i + 1)`.
/// Empty for `n == 0`.
pub fn quadrant_angles(base_angle: f64, arc_width: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let step = arc_width / (n as f64 + 1.0);
    (0..n)
        .map(|i| base_angle - arc_width / 2.0 + step * (i as f64 + 1.0))
        .collect()
}

fn place_children(
    parent: &Node,
    parent_pos: PointF,
    parent_level: usize,
    inherited: Option<Direction>,
    expanded: &HashSet<NodeId>,
    cfg: &LayoutConfig,
    out: &mut LayoutResult,
) -> Result<(), LayoutError> {
    let children = visible_children(parent, expanded);
    if children.is_empty() {
        return Ok(());
    }
    let level = parent_level + 1;

    let directions = children
        .iter()
        .map(|c| {
            c.direction
                .or(inherited)
                .ok_or_else(|| LayoutError::MissingDirection { node: c.id.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let points = if level <= cfg.chain_threshold {
        ring_points(&directions, level, cfg)
    } else {
        chain_points(children, &directions, parent_pos, cfg)
    };

    for ((child, &direction), &point) in children.iter().zip(&directions).zip(&points) {
        out.push_node(child, point, level, expanded.contains(&child.id));
        out.push_edge(&parent.id, &child.id, parent_pos, point);
        place_children(child, point, level, Some(direction), expanded, cfg, out)?;
    }
    Ok(())
}

/// Ring positions for one sibling group, grouped per quadrant.
fn ring_points(directions: &[Direction], level: usize, cfg: &LayoutConfig) -> Vec<PointF> {
    let radius = cfg.ring_radius(level);
    let mut points = vec![cfg.center; directions.len()];

    for quadrant in Direction::ALL {
        let members: Vec<usize> = directions
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == quadrant)
            .map(|(i, _)| i)
            .collect();
        let angles = quadrant_angles(quadrant.base_angle(), cfg.arc_width, members.len());
        for (i, angle) in members.into_iter().zip(angles) {
            points[i] = cfg.center.offset(angle, radius);
        }
    }
    points
}

/// Chain positions for one sibling group, one lane band per child.
fn chain_points(children: &[Node], directions: &[Direction], parent_pos: PointF, cfg: &LayoutConfig) -> Vec<PointF> {
    let mut points = vec![parent_pos; children.len()];

    for quadrant in Direction::ALL {
        let members: Vec<usize> = directions
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == quadrant)
            .map(|(i, _)| i)
            .collect();
        if members.is_empty() {
            continue;
        }

        let widths: Vec<f64> = members.iter().map(|&i| lane_width(&children[i])).collect();
        let total: f64 = widths.iter().sum();
        let angle = quadrant.base_angle();
        let across = angle + PI / 2.0;

        let mut used = 0.0;
        for (&i, w) in members.iter().zip(widths) {
            let lane = used + w / 2.0 - total / 2.0;
            used += w;
            points[i] = parent_pos
                .offset(angle, cfg.chain_spacing)
                .offset(across, lane * cfg.lane_spacing());
        }
    }
    points
}

/// Leaves under `node`, counting collapsed subtrees too.
fn lane_width(node: &Node) -> f64 {
    if node.children.is_empty() {
        1.0
    } else {
        node.children.iter().map(lane_width).sum()
    }
}
