//! SVG format exporter.
//!
//! Plane coordinates have y pointing up; SVG has y pointing down. Every point
//! goes through [`Viewport::map`], which flips and scales it into the canvas.

use super::ExportConfig;
use crate::scene::{Bounds, DrawItem, Glyph, Label, Scene, Segment, Shape};
use crate::types::Point;

/// Maps plane coordinates onto the SVG canvas.
struct Viewport {
    bounds: Bounds,
    margin: f64,
    scale: f64,
}

impl Viewport {
    fn new(bounds: Bounds, config: &ExportConfig) -> Self {
        let span_x = (bounds.width() + 2.0 * config.margin).max(f64::EPSILON);
        let span_y = (bounds.height() + 2.0 * config.margin).max(f64::EPSILON);
        let scale = (f64::from(config.width) / span_x).min(f64::from(config.height) / span_y);
        Self {
            bounds,
            margin: config.margin,
            scale,
        }
    }

    fn map(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.bounds.min.x + self.margin) * self.scale,
            (self.bounds.max.y - p.y + self.margin) * self.scale,
        )
    }

    fn length(&self, d: f64) -> f64 {
        d * self.scale
    }
}

/// Export a scene as a standalone SVG document.
pub fn export(scene: &Scene, config: &ExportConfig) -> String {
    let viewport = Viewport::new(scene.bounds(), config);
    let mut lines = Vec::new();

    lines.push(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));
    lines.push(r#"<rect width="100%" height="100%" fill="white"/>"#.to_string());

    lines.extend(chrome(scene, &viewport));

    for item in scene.draw_items() {
        lines.push(match item {
            DrawItem::Segment(segment) => segment_element(segment, &viewport),
            DrawItem::Glyph(glyph) => glyph_element(glyph, &viewport),
            DrawItem::Label(label) => label_element(label, &viewport),
        });
    }

    lines.push("</svg>".to_string());
    lines.join("\n")
}

fn chrome(scene: &Scene, viewport: &Viewport) -> Vec<String> {
    let chrome = &scene.chrome;
    let bounds = viewport.bounds;
    let grid = &chrome.grid;
    let dash = if grid.dashed {
        r#" stroke-dasharray="6 4""#
    } else {
        ""
    };

    let mut lines = vec![format!(
        r#"<g class="grid" stroke="{}" stroke-width="{}"{}>"#,
        grid.color.hex(),
        grid.line_width,
        dash
    )];
    for &x in &chrome.x_ticks {
        let top = viewport.map(Point::new(x, bounds.max.y));
        let bottom = viewport.map(Point::new(x, bounds.min.y));
        lines.push(line(top, bottom));
    }
    for &y in &chrome.y_ticks {
        let left = viewport.map(Point::new(bounds.min.x, y));
        let right = viewport.map(Point::new(bounds.max.x, y));
        lines.push(line(left, right));
    }
    lines.push("</g>".to_string());

    let size = chrome.tick_label_size;
    lines.push(format!(r#"<g class="ticks" font-size="{}" fill="black">"#, size));
    for &x in &chrome.x_ticks {
        let p = viewport.map(Point::new(x, bounds.min.y));
        lines.push(format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            p.x,
            p.y + size,
            x
        ));
    }
    for &y in &chrome.y_ticks {
        let p = viewport.map(Point::new(bounds.min.x, y));
        lines.push(format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            p.x - 4.0,
            p.y + size / 3.0,
            y
        ));
    }
    lines.push("</g>".to_string());
    lines
}

fn line(a: Point, b: Point) -> String {
    format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
        a.x, a.y, b.x, b.y
    )
}

fn segment_element(segment: &Segment, viewport: &Viewport) -> String {
    let a = viewport.map(segment.start);
    let b = viewport.map(segment.end);
    format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
        a.x,
        a.y,
        b.x,
        b.y,
        segment.color.hex(),
        segment.line_width
    )
}

fn glyph_element(glyph: &Glyph, viewport: &Viewport) -> String {
    let fill = glyph.fill.hex();
    match glyph.shape {
        Shape::Triangle { vertices } => {
            let points: Vec<String> = vertices
                .iter()
                .map(|v| {
                    let p = viewport.map(*v);
                    format!("{:.2},{:.2}", p.x, p.y)
                })
                .collect();
            format!(
                r#"<polygon data-node="{}" points="{}" fill="{}"/>"#,
                glyph.node_id,
                points.join(" "),
                fill
            )
        }
        Shape::Square { origin, side } => {
            // SVG rects are anchored at their top-left corner
            let top_left = viewport.map(origin.offset(0.0, side));
            let size = viewport.length(side);
            format!(
                r#"<rect data-node="{}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                glyph.node_id, top_left.x, top_left.y, size, size, fill
            )
        }
        Shape::Circle { center, radius } => {
            let c = viewport.map(center);
            format!(
                r#"<circle data-node="{}" cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                glyph.node_id,
                c.x,
                c.y,
                viewport.length(radius),
                fill
            )
        }
    }
}

fn label_element(label: &Label, viewport: &Viewport) -> String {
    let p = viewport.map(label.anchor);
    format!(
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{}">{}</text>"#,
        p.x,
        p.y,
        label.font_family,
        label.font_size,
        escape(&label.text)
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
