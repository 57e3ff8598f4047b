use std::collections::HashSet;
use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node key. Built from the node name unless the source gives one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

/// Angular quadrant a top-level branch grows into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Top,
    Left,
    Bottom,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Top,
        Direction::Left,
        Direction::Bottom,
    ];

    /// Center angle of the quadrant, in radians.
    pub fn base_angle(self) -> f64 {
        match self {
            Direction::Right => 0.0,
            Direction::Top => PI / 2.0,
            Direction::Left => PI,
            Direction::Bottom => 3.0 * PI / 2.0,
        }
    }

    pub fn from_keyword(s: &str) -> Option<Direction> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Some(Direction::Right),
            "top" => Some(Direction::Top),
            "left" => Some(Direction::Left),
            "bottom" => Some(Direction::Bottom),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Top => "top",
            Direction::Left => "left",
            Direction::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    /// Short marker drawn inside the circle (usually an emoji)
    pub glyph: Option<String>,
    pub direction: Option<Direction>,
    /// Order matters: it decides angular order among siblings
    pub children: Vec<Node>,
}

impl Node {
    /// A node whose id is its label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: NodeId(label.clone()),
            label,
            glyph: None,
            direction: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = NodeId(id.into());
        self
    }

    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = Some(glyph.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Text drawn inside the node: the glyph, or the first two label characters.
    pub fn display_glyph(&self) -> String {
        match &self.glyph {
            Some(g) if !g.is_empty() => g.clone(),
            _ => self.label.chars().take(2).collect(),
        }
    }
}

/// An immutable rooted tree plus the layout strategy it asks for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillTree {
    pub root: Node,
    /// Layout strategy named by the source (`@layout spoke`), if any
    pub layout: Option<String>,
}

impl SkillTree {
    pub fn new(root: Node) -> Self {
        Self { root, layout: None }
    }

    /// Pre-order walk, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.iter().find(|n| &n.id == id)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Ids that occur more than once. Set operations on those are ambiguous.
    pub fn duplicate_ids(&self) -> Vec<NodeId> {
        let mut seen: HashSet<&NodeId> = HashSet::new();
        let mut dups: Vec<NodeId> = Vec::new();
        for node in self.iter() {
            if !seen.insert(&node.id) && !dups.contains(&node.id) {
                dups.push(node.id.clone());
            }
        }
        dups
    }
}

/// First emoji-like character in `s`, if any.
pub fn first_emoji(s: &str) -> Option<String> {
    s.chars().find(|&c| is_emoji(c)).map(|c| c.to_string())
}

fn is_emoji(c: char) -> bool {
    matches!(c as u32,
        0x1F300..=0x1F6FF   // symbols, pictographs, transport
        | 0x1F900..=0x1FAFF // supplemental symbols
        | 0x2600..=0x27BF   // misc symbols, dingbats
    )
}
