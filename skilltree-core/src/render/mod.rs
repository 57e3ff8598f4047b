// Skill tree renderer.
//
// Draws a `LayoutResult` onto any `Surface`: edges first, then one filled
// circle per node with its glyph, plus a small expand toggle for nodes that
// have children. Pan/zoom is a single surface transform; layout coordinates
// are never touched.
//
// Backends:
// - scene: records primitives (tests, SVG export)
// - svg_export: scene -> SVG document
// - canvas: browser 2D canvas (wasm32 only)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::interaction::ViewState;
use crate::layout::{LayoutResult, PointF};
use crate::tree::NodeId;

#[cfg(target_arch = "wasm32")]
mod canvas;
mod scene;
mod svg_export;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{Primitive, SceneSurface};
pub use svg_export::{scene_to_svg, svg_string};

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

/// Minimal 2D drawing target.
pub trait Surface {
    /// Drops everything drawn so far.
    fn clear(&mut self);
    /// Applies `translate(pan)` then `scale(zoom)` to everything drawn after.
    fn set_transform(&mut self, translate: PointF, scale: f64);
    fn line(&mut self, from: PointF, to: PointF, stroke: &Stroke);
    fn circle(&mut self, center: PointF, radius: f64, fill: &str, stroke: &Stroke);
    /// Text centered on `at`.
    fn text(&mut self, at: PointF, text: &str, size: f64, color: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub done_color: String,
    pub hover_color: String,
    pub default_color: String,
    pub toggle_expanded_color: String,
    pub toggle_collapsed_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub text_color: String,
    pub error_color: String,
    /// Toggle center offset, as a fraction of the node radius (right and up).
    pub toggle_offset: f64,
    /// Toggle radius, as a fraction of the node radius.
    pub toggle_scale: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            done_color: "#4CAF50".to_string(),
            hover_color: "#FFA500".to_string(),
            default_color: "#2196F3".to_string(),
            toggle_expanded_color: "#FFA500".to_string(),
            toggle_collapsed_color: "#2196F3".to_string(),
            stroke_color: "#333".to_string(),
            stroke_width: 2.0,
            text_color: "white".to_string(),
            error_color: "#D32F2F".to_string(),
            toggle_offset: 0.7,
            toggle_scale: 1.0 / 3.0,
        }
    }
}

impl RenderStyle {
    pub fn stroke(&self) -> Stroke {
        Stroke {
            color: self.stroke_color.clone(),
            width: self.stroke_width,
        }
    }

    /// Fill priority: completed, then hovered, then default.
    pub fn node_fill(&self, id: &NodeId, completed: &HashSet<NodeId>, hovered: Option<&NodeId>) -> &str {
        if completed.contains(id) {
            &self.done_color
        } else if hovered == Some(id) {
            &self.hover_color
        } else {
            &self.default_color
        }
    }

    pub fn toggle_fill(&self, expanded: bool) -> &str {
        if expanded {
            &self.toggle_expanded_color
        } else {
            &self.toggle_collapsed_color
        }
    }

    /// Toggle indicator center for a node of radius `node_radius`.
    pub fn toggle_center(&self, node_center: PointF, node_radius: f64) -> PointF {
        let d = node_radius * self.toggle_offset;
        PointF::new(node_center.x + d, node_center.y - d)
    }

    pub fn toggle_radius(&self, node_radius: f64) -> f64 {
        node_radius * self.toggle_scale
    }

    pub fn font_size(&self, node_radius: f64) -> f64 {
        node_radius / 2.0
    }
}

pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &LayoutResult,
    view: &ViewState,
    completed: &HashSet<NodeId>,
    hovered: Option<&NodeId>,
    style: &RenderStyle,
) {
    surface.clear();
    surface.set_transform(view.pan, view.zoom);

    let stroke = style.stroke();
    let r = layout.node_radius;
    for edge in &layout.edges {
        surface.line(edge.from, edge.to, &stroke);
    }

    for pos in &layout.positions {
        let center = pos.point();
        surface.circle(center, r, style.node_fill(&pos.id, completed, hovered), &stroke);
        surface.text(center, &pos.glyph, style.font_size(r), &style.text_color);
        if pos.has_children {
            surface.circle(
                style.toggle_center(center, r),
                style.toggle_radius(r),
                style.toggle_fill(pos.expanded),
                &stroke,
            );
        }
    }
}

const ERROR_FONT_SIZE: f64 = 16.0;

/// Replaces the drawing with a single error message centered on `at`.
pub fn render_error<S: Surface + ?Sized>(surface: &mut S, message: &str, at: PointF, style: &RenderStyle) {
    surface.clear();
    surface.set_transform(PointF::default(), 1.0);
    surface.text(at, message, ERROR_FONT_SIZE, &style.error_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutConfig, compute_layout};
    use crate::tree::{Direction, Node};

    fn small_layout() -> LayoutResult {
        let root = Node::new("Start").with_children(vec![
            Node::new("Health")
                .with_glyph("💪")
                .with_direction(Direction::Right)
                .with_children(vec![Node::new("Run 1km")]),
            Node::new("Wealth").with_direction(Direction::Top),
        ]);
        let expanded: HashSet<NodeId> = ["Start".into()].into_iter().collect();
        compute_layout(&root, &expanded, &LayoutConfig::default()).unwrap()
    }

    fn circles(scene: &SceneSurface) -> Vec<(PointF, f64, String)> {
        scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle { center, radius, fill, .. } => Some((*center, *radius, fill.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fill_priority() {
        let style = RenderStyle::default();
        let id = NodeId::from("A");
        let mut completed = HashSet::new();

        assert_eq!(style.node_fill(&id, &completed, None), "#2196F3");
        assert_eq!(style.node_fill(&id, &completed, Some(&id)), "#FFA500");
        completed.insert(id.clone());
        assert_eq!(style.node_fill(&id, &completed, Some(&id)), "#4CAF50");
        assert_eq!(style.node_fill(&id, &completed, None), "#4CAF50");
    }

    #[test]
    fn test_render_draws_edges_before_nodes() {
        let layout = small_layout();
        let mut scene = SceneSurface::default();
        render(&mut scene, &layout, &ViewState::default(), &HashSet::new(), None, &RenderStyle::default());

        let first_circle = scene
            .primitives
            .iter()
            .position(|p| matches!(p, Primitive::Circle { .. }))
            .unwrap();
        let lines: Vec<usize> = scene
            .primitives
            .iter()
            .enumerate()
            .filter(|(_, p)| matches!(p, Primitive::Line { .. }))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|&i| i < first_circle));
    }

    #[test]
    fn test_toggle_only_for_nodes_with_children() {
        let layout = small_layout();
        let style = RenderStyle::default();
        let mut scene = SceneSurface::default();
        render(&mut scene, &layout, &ViewState::default(), &HashSet::new(), None, &style);

        let toggles: Vec<_> = circles(&scene)
            .into_iter()
            .filter(|(_, r, _)| (*r - style.toggle_radius(layout.node_radius)).abs() < 1e-9)
            .collect();
        // Start (expanded) and Health (collapsed); Wealth is a leaf
        assert_eq!(toggles.len(), 2);

        let start = layout.get(&"Start".into()).unwrap().point();
        let start_toggle = toggles.iter().find(|(c, _, _)| *c == style.toggle_center(start, layout.node_radius)).unwrap();
        assert_eq!(start_toggle.2, style.toggle_expanded_color);

        let health = layout.get(&"Health".into()).unwrap().point();
        let health_toggle = toggles.iter().find(|(c, _, _)| *c == style.toggle_center(health, layout.node_radius)).unwrap();
        assert_eq!(health_toggle.2, style.toggle_collapsed_color);
    }

    #[test]
    fn test_glyph_text_centered() {
        let layout = small_layout();
        let mut scene = SceneSurface::default();
        render(&mut scene, &layout, &ViewState::default(), &HashSet::new(), None, &RenderStyle::default());

        let health = layout.get(&"Health".into()).unwrap().point();
        assert!(scene.primitives.iter().any(|p| matches!(
            p,
            Primitive::Text { at, text, .. } if *at == health && text == "💪"
        )));
        assert!(scene.primitives.iter().any(|p| matches!(
            p,
            Primitive::Text { text, .. } if text == "We"
        )));
    }

    #[test]
    fn test_view_transform_does_not_move_geometry() {
        let layout = small_layout();
        let style = RenderStyle::default();
        let mut plain = SceneSurface::default();
        render(&mut plain, &layout, &ViewState::default(), &HashSet::new(), None, &style);

        let view = ViewState {
            pan: PointF::new(40.0, -15.0),
            zoom: 2.5,
        };
        let mut moved = SceneSurface::default();
        render(&mut moved, &layout, &view, &HashSet::new(), None, &style);

        assert_eq!(plain.primitives, moved.primitives);
        assert_eq!(moved.transform, (PointF::new(40.0, -15.0), 2.5));
    }

    #[test]
    fn test_render_replaces_previous_frame() {
        let layout = small_layout();
        let style = RenderStyle::default();
        let mut scene = SceneSurface::default();
        render(&mut scene, &layout, &ViewState::default(), &HashSet::new(), None, &style);
        let count = scene.primitives.len();
        render(&mut scene, &layout, &ViewState::default(), &HashSet::new(), None, &style);
        assert_eq!(scene.primitives.len(), count);
    }

    #[test]
    fn test_circles_use_layout_radius() {
        let root = Node::new("Start").with_children(vec![Node::new("Health").with_direction(Direction::Right)]);
        let cfg = LayoutConfig {
            node_radius: 60.0,
            ..LayoutConfig::default()
        };
        let expanded: HashSet<NodeId> = ["Start".into()].into_iter().collect();
        let layout = compute_layout(&root, &expanded, &cfg).unwrap();
        let style = RenderStyle::default();
        let mut scene = SceneSurface::default();
        render(&mut scene, &layout, &ViewState::default(), &HashSet::new(), None, &style);

        let radii: Vec<f64> = circles(&scene).into_iter().map(|(_, r, _)| r).collect();
        // two bodies and the root's toggle
        assert_eq!(radii.len(), 3);
        assert_eq!(radii.iter().filter(|r| **r == 60.0).count(), 2);
        assert!(radii.iter().any(|r| (r - 20.0).abs() < 1e-9));
    }

    #[test]
    fn test_render_error() {
        let mut scene = SceneSurface::default();
        let style = RenderStyle::default();
        render_error(&mut scene, "boom", PointF::new(10.0, 20.0), &style);
        assert_eq!(scene.primitives.len(), 1);
        assert!(matches!(
            &scene.primitives[0],
            Primitive::Text { text, color, .. } if text == "boom" && *color == style.error_color
        ));
    }
}
