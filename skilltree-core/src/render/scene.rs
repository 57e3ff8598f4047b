// Recording surface: keeps every draw call as a primitive.

use crate::layout::PointF;
use crate::render::{Stroke, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: PointF,
        to: PointF,
        stroke: Stroke,
    },
    Circle {
        center: PointF,
        radius: f64,
        fill: String,
        stroke: Stroke,
    },
    Text {
        at: PointF,
        text: String,
        size: f64,
        color: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSurface {
    pub primitives: Vec<Primitive>,
    /// (translate, scale) applied to the whole scene
    pub transform: (PointF, f64),
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self {
            primitives: Vec::new(),
            transform: (PointF::default(), 1.0),
        }
    }
}

impl Surface for SceneSurface {
    fn clear(&mut self) {
        self.primitives.clear();
        self.transform = (PointF::default(), 1.0);
    }

    fn set_transform(&mut self, translate: PointF, scale: f64) {
        self.transform = (translate, scale);
    }

    fn line(&mut self, from: PointF, to: PointF, stroke: &Stroke) {
        self.primitives.push(Primitive::Line {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn circle(&mut self, center: PointF, radius: f64, fill: &str, stroke: &Stroke) {
        self.primitives.push(Primitive::Circle {
            center,
            radius,
            fill: fill.to_string(),
            stroke: stroke.clone(),
        });
    }

    fn text(&mut self, at: PointF, text: &str, size: f64, color: &str) {
        self.primitives.push(Primitive::Text {
            at,
            text: text.to_string(),
            size,
            color: color.to_string(),
        });
    }
}
