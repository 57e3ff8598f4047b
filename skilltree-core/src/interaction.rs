//! Interaction controller.
//!
//! Owns everything that changes while the diagram is on screen: the view
//! transform, the drag anchor, the expanded/completed/hovered sets and the
//! current layout. Input arrives as [`InputEvent`]s; every handler returns an
//! [`Effect`] telling the page whether to redraw or whether the layout was
//! recomputed.
//!
//! Pan and zoom only ever touch [`ViewState`]. Layout coordinates change only
//! on expand/collapse and resize.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutConfig, LayoutError, LayoutResult, PointF, layout_tree};
use crate::render::{RenderStyle, Surface, render, render_error};
use crate::tree::{NodeId, SkillTree};

/// Render transform: `translate(pan)` then `scale(zoom)`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub pan: PointF,
    pub zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan: PointF::default(),
            zoom: 1.0,
        }
    }
}

impl ViewState {
    /// Screen point -> layout point.
    pub fn to_world(&self, screen: PointF) -> PointF {
        PointF::new((screen.x - self.pan.x) / self.zoom, (screen.y - self.pan.y) / self.zoom)
    }

    /// Layout point -> screen point.
    pub fn to_screen(&self, world: PointF) -> PointF {
        PointF::new(world.x * self.zoom + self.pan.x, world.y * self.zoom + self.pan.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom change per unit of wheel delta.
    pub wheel_sensitivity: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 3.0,
            wheel_sensitivity: 0.001,
        }
    }
}

impl ViewConfig {
    /// Usable copy of this config: non-finite or non-positive zoom bounds
    /// fall back to the defaults, inverted bounds are swapped.
    pub fn sanitized(&self) -> ViewConfig {
        let defaults = ViewConfig::default();
        let usable = |z: f64| z.is_finite() && z > 0.0;

        let (mut min_zoom, mut max_zoom) = (self.min_zoom, self.max_zoom);
        if !usable(min_zoom) || !usable(max_zoom) {
            log::warn!(
                "zoom bounds [{}, {}] unusable, falling back to [{}, {}]",
                min_zoom,
                max_zoom,
                defaults.min_zoom,
                defaults.max_zoom
            );
            min_zoom = defaults.min_zoom;
            max_zoom = defaults.max_zoom;
        } else if min_zoom > max_zoom {
            log::warn!("min_zoom {} exceeds max_zoom {}, swapping", min_zoom, max_zoom);
            std::mem::swap(&mut min_zoom, &mut max_zoom);
        }

        let wheel_sensitivity = if self.wheel_sensitivity.is_finite() {
            self.wheel_sensitivity
        } else {
            log::warn!("wheel_sensitivity {} unusable, using {}", self.wheel_sensitivity, defaults.wheel_sensitivity);
            defaults.wheel_sensitivity
        };

        ViewConfig {
            min_zoom,
            max_zoom,
            wheel_sensitivity,
        }
    }
}

/// Everything the page can configure, as one partial-JSON-friendly object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillTreeConfig {
    pub layout: LayoutConfig,
    pub view: ViewConfig,
    pub style: RenderStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    Wheel { delta_y: f64 },
    Reset,
    NodeClicked(NodeId),
    ToggleClicked(NodeId),
    PointerEnter(NodeId),
    PointerLeave(NodeId),
    Resize { width: f64, height: f64 },
}

/// What the page has to do after an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    /// Positions changed; redraw too.
    Relayout,
}

impl Effect {
    pub fn needs_redraw(self) -> bool {
        self != Effect::None
    }

    fn merge(self, other: Effect) -> Effect {
        match (self, other) {
            (Effect::Relayout, _) | (_, Effect::Relayout) => Effect::Relayout,
            (Effect::Redraw, _) | (_, Effect::Redraw) => Effect::Redraw,
            _ => Effect::None,
        }
    }
}

/// What sits under a screen point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Body(NodeId),
    Toggle(NodeId),
}

impl Hit {
    pub fn id(&self) -> &NodeId {
        match self {
            Hit::Body(id) | Hit::Toggle(id) => id,
        }
    }
}

pub struct Controller {
    tree: SkillTree,
    layout_cfg: LayoutConfig,
    view_cfg: ViewConfig,
    style: RenderStyle,

    view: ViewState,
    dragging: bool,
    anchor: PointF,

    expanded: HashSet<NodeId>,
    completed: HashSet<NodeId>,
    hovered: Option<NodeId>,

    layout: Result<LayoutResult, LayoutError>,
}

impl Controller {
    /// Root expanded, nothing completed, identity view. Lays out immediately.
    pub fn new(tree: SkillTree, config: SkillTreeConfig) -> Self {
        let dups = tree.duplicate_ids();
        if !dups.is_empty() {
            log::warn!("duplicate node ids share expand/complete state: {:?}", dups);
        }

        let expanded: HashSet<NodeId> = std::iter::once(tree.root.id.clone()).collect();
        let mut controller = Self {
            tree,
            layout_cfg: config.layout,
            view_cfg: config.view.sanitized(),
            style: config.style,
            view: ViewState::default(),
            dragging: false,
            anchor: PointF::default(),
            expanded,
            completed: HashSet::new(),
            hovered: None,
            layout: Ok(LayoutResult::default()),
        };
        controller.relayout();
        controller
    }

    pub fn handle(&mut self, event: InputEvent) -> Effect {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.anchor = PointF::new(x - self.view.pan.x, y - self.view.pan.y);
                Effect::None
            }
            InputEvent::PointerMove { x, y } => {
                if self.dragging {
                    self.view.pan = PointF::new(x - self.anchor.x, y - self.anchor.y);
                    Effect::Redraw
                } else {
                    self.hover_at(PointF::new(x, y))
                }
            }
            InputEvent::PointerUp => {
                self.dragging = false;
                Effect::None
            }
            InputEvent::Wheel { delta_y } => {
                if !delta_y.is_finite() {
                    return Effect::None;
                }
                let zoom = self.view.zoom - delta_y * self.view_cfg.wheel_sensitivity;
                self.view.zoom = zoom.clamp(self.view_cfg.min_zoom, self.view_cfg.max_zoom);
                Effect::Redraw
            }
            InputEvent::Reset => {
                self.view = ViewState::default();
                Effect::Redraw
            }
            InputEvent::NodeClicked(id) => {
                toggle(&mut self.completed, id);
                Effect::Redraw
            }
            InputEvent::ToggleClicked(id) => {
                toggle(&mut self.expanded, id);
                self.relayout();
                Effect::Relayout
            }
            InputEvent::PointerEnter(id) => {
                if self.hovered.as_ref() == Some(&id) {
                    return Effect::None;
                }
                self.hovered = Some(id);
                Effect::Redraw
            }
            InputEvent::PointerLeave(id) => {
                if self.hovered.as_ref() != Some(&id) {
                    return Effect::None;
                }
                self.hovered = None;
                Effect::Redraw
            }
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                Effect::Relayout
            }
        }
    }

    /// Node part under `screen`, toggles first. Later (top-most) nodes win.
    pub fn hit_test(&self, screen: PointF) -> Option<Hit> {
        let layout = self.layout.as_ref().ok()?;
        let world = self.view.to_world(screen);
        let r = layout.node_radius;
        for pos in layout.positions.iter().rev() {
            let center = pos.point();
            if pos.has_children
                && world.distance(self.style.toggle_center(center, r)) <= self.style.toggle_radius(r)
            {
                return Some(Hit::Toggle(pos.id.clone()));
            }
            if world.distance(center) <= r {
                return Some(Hit::Body(pos.id.clone()));
            }
        }
        None
    }

    /// Click at a screen point: toggle expands, body completes.
    pub fn click_at(&mut self, screen: PointF) -> Effect {
        match self.hit_test(screen) {
            Some(Hit::Toggle(id)) => self.handle(InputEvent::ToggleClicked(id)),
            Some(Hit::Body(id)) => self.handle(InputEvent::NodeClicked(id)),
            None => Effect::None,
        }
    }

    /// Pointer at a screen point: leave the old node, enter the new one.
    pub fn hover_at(&mut self, screen: PointF) -> Effect {
        let target = self.hit_test(screen).map(|hit| hit.id().clone());
        if target == self.hovered {
            return Effect::None;
        }
        let mut effect = Effect::None;
        if let Some(old) = self.hovered.clone() {
            effect = effect.merge(self.handle(InputEvent::PointerLeave(old)));
        }
        if let Some(new) = target {
            effect = effect.merge(self.handle(InputEvent::PointerEnter(new)));
        }
        effect
    }

    /// Replaces the expanded set and relayouts.
    pub fn set_expanded(&mut self, expanded: HashSet<NodeId>) {
        self.expanded = expanded;
        self.relayout();
    }

    /// Recomputes the whole layout from the tree and the expanded set.
    pub fn relayout(&mut self) {
        self.layout = layout_tree(&self.tree, &self.expanded, &self.layout_cfg);
        match &self.layout {
            Ok(layout) => {
                if let Some(id) = &self.hovered {
                    if !layout.contains(id) {
                        self.hovered = None;
                    }
                }
            }
            Err(e) => log::error!("layout failed: {}", e),
        }
    }

    /// Recenters on the new viewport. The view transform is kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout_cfg.center = PointF::new(width / 2.0, height / 2.0);
        self.relayout();
    }

    pub fn render_to<S: Surface + ?Sized>(&self, surface: &mut S) {
        match &self.layout {
            Ok(layout) => render(
                surface,
                layout,
                &self.view,
                &self.completed,
                self.hovered.as_ref(),
                &self.style,
            ),
            Err(e) => render_error(surface, &e.to_string(), self.layout_cfg.center, &self.style),
        }
    }

    pub fn tree(&self) -> &SkillTree {
        &self.tree
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn expanded(&self) -> &HashSet<NodeId> {
        &self.expanded
    }

    pub fn completed(&self) -> &HashSet<NodeId> {
        &self.completed
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    pub fn layout(&self) -> Result<&LayoutResult, &LayoutError> {
        self.layout.as_ref()
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_cfg
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }
}

fn toggle(set: &mut HashSet<NodeId>, id: NodeId) {
    if !set.remove(&id) {
        set.insert(id);
    }
}
