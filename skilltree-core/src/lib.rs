//! Interactive skill tree diagrams.
//!
//! A tree of goals is built from indented text or a nested JSON literal
//! ([`tree`]), laid out around a center ([`layout`]), drawn onto an abstract
//! 2D surface ([`render`]) and driven by pointer and wheel input
//! ([`interaction`]). On wasm32 the `wasm` module binds all of it to a
//! browser canvas.

pub mod interaction;
pub mod layout;
pub mod output;
pub mod render;
pub mod tree;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use interaction::{Controller, Effect, Hit, InputEvent, SkillTreeConfig, ViewConfig, ViewState};
pub use layout::{LayoutConfig, LayoutError, LayoutResult, PointF, compute_layout, layout_tree};
pub use render::{RenderStyle, SceneSurface, Surface, render};
pub use tree::{Direction, Node, NodeId, SkillTree, load_source, parse_literal, parse_tree};
