//! WASM bindings for the skilltree-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::interaction::{Controller, Effect, InputEvent, SkillTreeConfig};
use crate::layout::PointF;
use crate::output::{compile_source, error_output, expanded_set, snapshot};
use crate::render::{CanvasSurface, SceneSurface, render_error, svg_string};
use crate::tree::{NodeId, ParseWarning, SkillTree, load_source, parse_literal, sample};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        if record.level() <= log::Level::Warn {
            console_error(&line);
        } else {
            console_log(&line);
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger. Later calls only change the level.
#[wasm_bindgen]
pub fn init_logging(verbose: bool) {
    // Err means a logger is already installed
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
}

fn parse_expanded(expanded_json: &str) -> Vec<NodeId> {
    if expanded_json.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(expanded_json).unwrap_or_else(|e| {
        console_error(&format!("Error parsing expanded ids: {}", e));
        Vec::new()
    })
}

fn parse_config(config_json: &str) -> SkillTreeConfig {
    if config_json.trim().is_empty() {
        return SkillTreeConfig::default();
    }
    serde_json::from_str(config_json).unwrap_or_else(|e| {
        console_error(&format!("Error parsing config, using defaults: {}", e));
        SkillTreeConfig::default()
    })
}

/// Lays out a text or literal source. Returns a `DiagramOutput` JSON string.
///
/// `expanded_json` is a JSON array of node ids; empty means root only.
#[wasm_bindgen]
pub fn compile_skill_tree(source: &str, expanded_json: &str) -> String {
    let expanded = parse_expanded(expanded_json);
    compile_source(source, &expanded, &SkillTreeConfig::default().layout).to_json()
}

/// Renders a source to a standalone SVG document with the default view.
///
/// `expanded_json` follows the same rule as `compile_skill_tree`.
#[wasm_bindgen]
pub fn render_skill_tree_svg(source: &str, expanded_json: &str) -> String {
    let cfg = SkillTreeConfig::default();
    let (width, height) = (cfg.layout.center.x * 2.0, cfg.layout.center.y * 2.0);
    let mut scene = SceneSurface::default();

    match load_source(source) {
        Ok(parsed) => {
            let expanded = expanded_set(&parsed.tree.root.id, &parse_expanded(expanded_json));
            let mut controller = Controller::new(parsed.tree, cfg);
            controller.set_expanded(expanded);
            controller.render_to(&mut scene);
        }
        Err(e) => {
            console_error(&format!("Error loading tree: {}", e));
            render_error(&mut scene, &e.to_string(), cfg.layout.center, &cfg.style);
        }
    }
    svg_string(&scene, width, height)
}

enum LoadState {
    Pending,
    Ready {
        controller: Controller,
        warnings: Vec<ParseWarning>,
    },
    Failed(String),
}

/// A live diagram bound to one canvas element.
///
/// Input is ignored until a tree is loaded; a failed load draws its message.
#[wasm_bindgen]
pub struct SkillTreeApp {
    surface: CanvasSurface,
    config: SkillTreeConfig,
    state: LoadState,
}

#[wasm_bindgen]
impl SkillTreeApp {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: &str) -> Result<SkillTreeApp, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas '{}' not found", canvas_id)))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let mut config = parse_config(config_json);
        config.layout.center = PointF::new(canvas.width() as f64 / 2.0, canvas.height() as f64 / 2.0);

        Ok(SkillTreeApp {
            surface: CanvasSurface::new(canvas, ctx),
            config,
            state: LoadState::Pending,
        })
    }

    /// Loads a text or literal source. Returns the snapshot JSON.
    pub fn load_source(&mut self, source: &str) -> String {
        match load_source(source) {
            Ok(parsed) => self.ready(parsed.tree, parsed.warnings),
            Err(e) => self.fail(e.to_string()),
        }
    }

    pub fn load_literal(&mut self, literal: &str) -> String {
        match parse_literal(literal) {
            Ok(tree) => self.ready(tree, Vec::new()),
            Err(e) => self.fail(e.to_string()),
        }
    }

    pub fn load_sample(&mut self) -> String {
        self.ready(sample::life_goals(), Vec::new())
    }

    /// The page could not fetch its source.
    pub fn load_failed(&mut self, message: &str) -> String {
        self.fail(format!("Failed to load skill tree: {}", message))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready { .. })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.dispatch(InputEvent::PointerDown { x, y });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.dispatch(InputEvent::PointerMove { x, y });
    }

    pub fn pointer_up(&mut self) {
        self.dispatch(InputEvent::PointerUp);
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.dispatch(InputEvent::Wheel { delta_y });
    }

    pub fn reset(&mut self) {
        self.dispatch(InputEvent::Reset);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.canvas().set_width(width.max(0.0) as u32);
        self.surface.canvas().set_height(height.max(0.0) as u32);
        self.config.layout.center = PointF::new(width / 2.0, height / 2.0);
        if !self.is_ready() {
            self.redraw();
            return;
        }
        self.dispatch(InputEvent::Resize { width, height });
    }

    /// Click at a canvas point: toggle indicator expands, body completes.
    pub fn click(&mut self, x: f64, y: f64) {
        let effect = match &mut self.state {
            LoadState::Ready { controller, .. } => controller.click_at(PointF::new(x, y)),
            _ => Effect::None,
        };
        if effect.needs_redraw() {
            self.redraw();
        }
    }

    pub fn snapshot(&self) -> String {
        match &self.state {
            LoadState::Ready { controller, warnings } => snapshot(controller, warnings).to_json(),
            LoadState::Pending => error_output("skill tree not loaded yet", 0).to_json(),
            LoadState::Failed(msg) => error_output(msg.clone(), 0).to_json(),
        }
    }

    pub fn redraw(&mut self) {
        match &self.state {
            LoadState::Ready { controller, .. } => controller.render_to(&mut self.surface),
            LoadState::Failed(msg) => {
                render_error(&mut self.surface, msg, self.config.layout.center, &self.config.style)
            }
            LoadState::Pending => {}
        }
    }
}

impl SkillTreeApp {
    fn ready(&mut self, tree: SkillTree, warnings: Vec<ParseWarning>) -> String {
        let controller = Controller::new(tree, self.config.clone());
        self.state = LoadState::Ready { controller, warnings };
        self.redraw();
        self.snapshot()
    }

    fn fail(&mut self, message: String) -> String {
        console_error(&message);
        self.state = LoadState::Failed(message);
        self.redraw();
        self.snapshot()
    }

    fn dispatch(&mut self, event: InputEvent) {
        let effect = match &mut self.state {
            LoadState::Ready { controller, .. } => controller.handle(event),
            _ => Effect::None,
        };
        if effect.needs_redraw() {
            self.redraw();
        }
    }
}
