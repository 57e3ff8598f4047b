//! Output types for the JavaScript page.
//!
//! These structs are serialized to JSON and handed to the page, which can
//! draw from them directly or use them to inspect controller state.

use std::collections::HashSet;

use serde::Serialize;

use crate::interaction::{Controller, ViewState};
use crate::layout::{LayoutConfig, LayoutResult, layout_tree};
use crate::tree::{NodeId, ParseWarning, load_source};

/// A laid out node with its interaction state
#[derive(Debug, Clone, Serialize)]
pub struct NodeOutput {
    pub id: String,
    pub label: String,
    /// Text drawn inside the circle
    pub glyph: String,
    pub x: f64,
    pub y: f64,
    pub level: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub completed: bool,
    pub hovered: bool,
}

/// A straight edge between a parent and a child center
#[derive(Debug, Clone, Serialize)]
pub struct EdgeOutput {
    pub from: String,
    pub to: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewOutput {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

/// Error information for editor markers
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub line: usize,       // 1-based, 0 when the error has no source position
    pub column: usize,     // 1-based
    pub end_line: usize,
    pub end_column: usize,
}

/// The combined output sent to the page
#[derive(Debug, Clone, Serialize)]
pub struct DiagramOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl DiagramOutput {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("failed to serialize diagram output: {}", e);
            r#"{"error":{"message":"serialization failed","line":0,"column":0,"end_line":0,"end_column":0}}"#
                .to_string()
        })
    }
}

pub fn build_output(
    layout: &LayoutResult,
    view: Option<&ViewState>,
    completed: &HashSet<NodeId>,
    hovered: Option<&NodeId>,
    warnings: &[ParseWarning],
) -> DiagramOutput {
    let nodes = layout
        .positions
        .iter()
        .map(|p| NodeOutput {
            id: p.id.to_string(),
            label: p.label.clone(),
            glyph: p.glyph.clone(),
            x: p.x,
            y: p.y,
            level: p.level,
            has_children: p.has_children,
            expanded: p.expanded,
            completed: completed.contains(&p.id),
            hovered: hovered == Some(&p.id),
        })
        .collect();

    let edges = layout
        .edges
        .iter()
        .map(|e| EdgeOutput {
            from: e.parent.to_string(),
            to: e.child.to_string(),
            x1: e.from.x,
            y1: e.from.y,
            x2: e.to.x,
            y2: e.to.y,
        })
        .collect();

    DiagramOutput {
        nodes,
        edges,
        view: view.map(|v| ViewOutput {
            pan_x: v.pan.x,
            pan_y: v.pan.y,
            zoom: v.zoom,
        }),
        warnings: warnings.to_vec(),
        error: None,
    }
}

/// Output carrying only an error. `line` is 0 when there is no source position.
pub fn error_output(message: impl Into<String>, line: usize) -> DiagramOutput {
    let column = if line == 0 { 0 } else { 1 };
    DiagramOutput {
        nodes: vec![],
        edges: vec![],
        view: None,
        warnings: vec![],
        error: Some(ErrorInfo {
            message: message.into(),
            line,
            column,
            end_line: line,
            end_column: if line == 0 { 0 } else { 1000 }, // Highlight the whole line
        }),
    }
}

/// Current controller state, or its layout error.
pub fn snapshot(controller: &Controller, warnings: &[ParseWarning]) -> DiagramOutput {
    match controller.layout() {
        Ok(layout) => build_output(
            layout,
            Some(&controller.view()),
            controller.completed(),
            controller.hovered(),
            warnings,
        ),
        Err(e) => {
            let mut out = error_output(e.to_string(), 0);
            out.warnings = warnings.to_vec();
            out
        }
    }
}

/// Expanded set for a one-shot render. An empty list means root only;
/// anything else is taken as the complete set, root included or not.
pub fn expanded_set(root: &NodeId, ids: &[NodeId]) -> HashSet<NodeId> {
    if ids.is_empty() {
        std::iter::once(root.clone()).collect()
    } else {
        ids.iter().cloned().collect()
    }
}

/// One-shot: source text + expanded ids -> laid out diagram.
///
/// An empty `expanded` list means "root only", like a freshly loaded page.
pub fn compile_source(source: &str, expanded: &[NodeId], cfg: &LayoutConfig) -> DiagramOutput {
    let parsed = match load_source(source) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("Error loading tree: {}", e);
            return error_output(e.to_string(), json_line(&e));
        }
    };

    let expanded = expanded_set(&parsed.tree.root.id, expanded);
    match layout_tree(&parsed.tree, &expanded, cfg) {
        Ok(layout) => build_output(&layout, None, &HashSet::new(), None, &parsed.warnings),
        Err(e) => {
            log::error!("Error laying out tree: {}", e);
            let mut out = error_output(e.to_string(), 0);
            out.warnings = parsed.warnings;
            out
        }
    }
}

fn json_line(e: &crate::tree::TreeError) -> usize {
    match e {
        crate::tree::TreeError::Json(json) => json.line(),
        crate::tree::TreeError::EmptyLabel { .. } => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{InputEvent, SkillTreeConfig};
    use crate::tree::sample::life_goals;

    const SOURCE: &str = "1. Health 💪 @right\n  1. Run 1km\n1. Wealth 💰 @top\n";

    #[test]
    fn test_compile_root_only_by_default() {
        let out = compile_source(SOURCE, &[], &LayoutConfig::default());
        assert!(out.error.is_none());
        assert_eq!(out.nodes.len(), 3);
        assert_eq!(out.edges.len(), 2);

        let health = out.nodes.iter().find(|n| n.id == "Health 💪").unwrap();
        assert_eq!(health.glyph, "💪");
        assert!(health.has_children && !health.expanded);
        assert!((health.x - 850.0).abs() < 1e-9);
    }

    #[test]
    fn test_compile_with_expanded_ids() {
        let expanded = vec![NodeId::from("Start"), NodeId::from("Health 💪")];
        let out = compile_source(SOURCE, &expanded, &LayoutConfig::default());
        assert_eq!(out.nodes.len(), 4);
        let run = out.nodes.iter().find(|n| n.id == "Run 1km").unwrap();
        assert_eq!(run.level, 2);
        assert!((run.x - 930.0).abs() < 1e-9);
    }

    #[test]
    fn test_expanded_list_without_root_collapses_root() {
        let expanded = vec![NodeId::from("Health 💪")];
        let out = compile_source(SOURCE, &expanded, &LayoutConfig::default());
        assert_eq!(out.nodes.len(), 1);
        assert_eq!(out.nodes[0].id, "Start");

        // the controller path agrees
        let parsed = load_source(SOURCE).unwrap();
        let root = parsed.tree.root.id.clone();
        let mut c = Controller::new(parsed.tree, SkillTreeConfig::default());
        c.set_expanded(expanded_set(&root, &expanded));
        let snap = snapshot(&c, &[]);
        let ids = |o: &DiagramOutput| o.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&snap), ids(&out));
    }

    #[test]
    fn test_compile_reports_layout_error_with_warnings() {
        let out = compile_source("1. Lost\nnot numbered\n", &[], &LayoutConfig::default());
        let err = out.error.unwrap();
        assert!(err.message.contains("Lost"));
        assert_eq!(err.line, 0);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 2);
    }

    #[test]
    fn test_compile_reports_literal_error_line() {
        let out = compile_source("{\n  \"name\": \"Start\",\n  oops\n}", &[], &LayoutConfig::default());
        let err = out.error.unwrap();
        assert_eq!(err.line, 3);
        assert!(out.nodes.is_empty());
    }

    #[test]
    fn test_snapshot_carries_interaction_state() {
        let mut c = Controller::new(life_goals(), SkillTreeConfig::default());
        c.handle(InputEvent::NodeClicked("Wealth".into()));
        c.handle(InputEvent::PointerEnter("Wisdom".into()));
        c.handle(InputEvent::Wheel { delta_y: -500.0 });

        let out = snapshot(&c, &[]);
        let wealth = out.nodes.iter().find(|n| n.id == "Wealth").unwrap();
        assert!(wealth.completed && !wealth.hovered);
        let wisdom = out.nodes.iter().find(|n| n.id == "Wisdom").unwrap();
        assert!(wisdom.hovered && !wisdom.completed);
        assert!((out.view.unwrap().zoom - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_json_skips_empty_fields() {
        let json = error_output("boom", 0).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"]["message"], "boom");
        assert!(value.get("nodes").is_none());
        assert!(value.get("view").is_none());
    }
}
