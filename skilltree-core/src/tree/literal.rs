//! Nested literal tree source.
//!
//! The page can hand over a JSON object shaped like the hardcoded trees:
//!
//! ```json
//! { "name": "Start", "children": [
//!     { "name": "Health", "emoji": "🏋️", "direction": "right",
//!       "children": [ { "name": "Run 1km" } ] } ] }
//! ```
//!
//! `id` is optional and defaults to `name`. `glyph` is accepted as an alias of
//! `emoji`.

use serde::Deserialize;
use thiserror::Error;

use crate::tree::types::{Direction, Node, NodeId, SkillTree};

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("invalid tree literal: {0}")]
    Json(#[from] serde_json::Error),
    #[error("node at {path} has an empty name")]
    EmptyLabel { path: String },
}

#[derive(Debug, Deserialize)]
struct NodeLiteral {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default, alias = "glyph")]
    emoji: Option<String>,
    #[serde(default)]
    direction: Option<Direction>,
    #[serde(default)]
    children: Vec<NodeLiteral>,
}

#[derive(Debug, Deserialize)]
struct TreeLiteral {
    #[serde(flatten)]
    root: NodeLiteral,
    #[serde(default)]
    layout: Option<String>,
}

pub fn parse_literal(input: &str) -> Result<SkillTree, TreeError> {
    let lit: TreeLiteral = serde_json::from_str(input)?;
    let root = convert(lit.root, "root")?;
    let tree = SkillTree {
        root,
        layout: lit.layout,
    };
    for dup in tree.duplicate_ids() {
        log::warn!("tree literal repeats node id '{}'", dup);
    }
    Ok(tree)
}

fn convert(lit: NodeLiteral, path: &str) -> Result<Node, TreeError> {
    if lit.name.trim().is_empty() && lit.id.is_none() {
        return Err(TreeError::EmptyLabel {
            path: path.to_string(),
        });
    }

    let children = lit
        .children
        .into_iter()
        .enumerate()
        .map(|(i, c)| convert(c, &format!("{}/{}", path, i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Node {
        id: NodeId(lit.id.unwrap_or_else(|| lit.name.clone())),
        label: lit.name,
        glyph: lit.emoji.filter(|g| !g.is_empty()),
        direction: lit.direction,
        children,
    })
}
