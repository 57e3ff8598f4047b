// Scene -> SVG document.

use svg::Document;
use svg::node::Text as SvgText;
use svg::node::element::{Circle, Group, Line, Text};

use crate::render::{Primitive, SceneSurface};

pub fn scene_to_svg(scene: &SceneSurface, width: f64, height: f64) -> Document {
    let (translate, scale) = scene.transform;
    let mut group = Group::new().set(
        "transform",
        format!("translate({} {}) scale({})", translate.x, translate.y, scale),
    );

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Line { from, to, stroke } => {
                let node = Line::new()
                    .set("x1", from.x)
                    .set("y1", from.y)
                    .set("x2", to.x)
                    .set("y2", to.y)
                    .set("stroke", stroke.color.as_str())
                    .set("stroke-width", stroke.width);
                group = group.add(node);
            }
            Primitive::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let node = Circle::new()
                    .set("cx", center.x)
                    .set("cy", center.y)
                    .set("r", (*radius).max(0.0))
                    .set("fill", fill.as_str())
                    .set("stroke", stroke.color.as_str())
                    .set("stroke-width", stroke.width);
                group = group.add(node);
            }
            Primitive::Text { at, text, size, color } => {
                let node = Text::new("")
                    .set("x", at.x)
                    .set("y", at.y)
                    .set("font-size", *size)
                    .set("fill", color.as_str())
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .add(SvgText::new(text.clone()));
                group = group.add(node);
            }
        }
    }

    let width = width.max(1.0);
    let height = height.max(1.0);
    Document::new()
        .set("viewBox", format!("0 0 {} {}", width, height))
        .set("width", width)
        .set("height", height)
        .set("xmlns", "http://www.w3.org/2000/svg")
        .add(group)
}

pub fn svg_string(scene: &SceneSurface, width: f64, height: f64) -> String {
    scene_to_svg(scene, width, height).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PointF;
    use crate::render::{Stroke, Surface};

    #[test]
    fn test_svg_contains_transform_and_shapes() {
        let mut scene = SceneSurface::default();
        let stroke = Stroke {
            color: "#333".to_string(),
            width: 2.0,
        };
        scene.set_transform(PointF::new(10.0, 20.0), 1.5);
        scene.line(PointF::new(0.0, 0.0), PointF::new(5.0, 5.0), &stroke);
        scene.circle(PointF::new(5.0, 5.0), 25.0, "#2196F3", &stroke);
        scene.text(PointF::new(5.0, 5.0), "Run 5km", 12.5, "white");

        let out = svg_string(&scene, 1200.0, 1200.0);
        assert!(out.starts_with("<svg"));
        assert!(out.contains("translate(10 20) scale(1.5)"));
        assert!(out.contains("<line"));
        assert!(out.contains("<circle"));
        assert!(out.contains("fill=\"#2196F3\""));
        assert!(out.contains("Run 5km"));
    }
}
