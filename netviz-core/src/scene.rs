//! Scene model: everything a presentation layer needs to draw a topology.
//!
//! A [`Scene`] is plain data. It knows nothing about terminals, windows or
//! file formats; exporters in [`crate::exporter`] and the CLI presenters
//! decide how it is shown.

use crate::types::Point;
use serde::Serialize;

/// Named colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Blue,
    Black,
    Gray,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Gray => "gray",
        }
    }

    /// Hex value matching the classic plotting palette.
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Green => "#008000",
            Color::Red => "#ff0000",
            Color::Blue => "#0000ff",
            Color::Black => "#000000",
            Color::Gray => "#808080",
        }
    }
}

/// Drawing layer. Higher layers are painted later and sit on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Edges
    Background,
    /// Node glyphs
    Foreground,
    /// Text labels
    Annotation,
}

impl Layer {
    pub fn z_order(&self) -> u8 {
        match self {
            Layer::Background => 0,
            Layer::Foreground => 1,
            Layer::Annotation => 2,
        }
    }
}

/// Geometry of a node glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Upward-pointing triangle, vertices in drawing order.
    Triangle { vertices: [Point; 3] },
    /// Axis-aligned square; `origin` is the lower-left corner.
    Square { origin: Point, side: f64 },
    Circle { center: Point, radius: f64 },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Triangle { .. } => "triangle",
            Shape::Square { .. } => "square",
            Shape::Circle { .. } => "circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glyph {
    /// Table position of the node
    pub node_index: usize,
    pub node_id: i64,
    pub shape: Shape,
    pub fill: Color,
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub node_index: usize,
    pub text: String,
    /// Lower-left anchor of the text
    pub anchor: Point,
    pub font_family: &'static str,
    pub font_size: f64,
    pub layer: Layer,
}

/// A straight edge between two nodes. No arrowhead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Table position of the node owning the reference
    pub from_index: usize,
    /// Table position of the resolved neighbor
    pub to_index: usize,
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub line_width: f64,
    pub layer: Layer,
}

/// A neighbor reference left out of the scene because it did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEdge {
    pub node_index: usize,
    pub reference: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStyle {
    pub color: Color,
    pub dashed: bool,
    pub line_width: f64,
}

/// Static axes and grid configuration. Never derived from data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chrome {
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    pub tick_label_size: f64,
    pub grid: GridStyle,
}

impl Default for Chrome {
    fn default() -> Self {
        let ticks: Vec<f64> = (0..=100u32).step_by(10).map(f64::from).collect();
        Self {
            x_ticks: ticks.clone(),
            y_ticks: ticks,
            tick_label_size: 15.0,
            grid: GridStyle {
                color: Color::Gray,
                dashed: true,
                line_width: 1.0,
            },
        }
    }
}

/// Axis-aligned extent of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }
}

/// One entry of the painter's-order draw list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawItem<'a> {
    Segment(&'a Segment),
    Glyph(&'a Glyph),
    Label(&'a Label),
}

impl DrawItem<'_> {
    pub fn layer(&self) -> Layer {
        match self {
            DrawItem::Segment(s) => s.layer,
            DrawItem::Glyph(g) => g.layer,
            DrawItem::Label(l) => l.layer,
        }
    }
}

/// The renderer's output.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scene {
    /// In node-table order
    pub glyphs: Vec<Glyph>,
    /// In node-table order
    pub labels: Vec<Label>,
    /// In owner order, then stored neighbor order
    pub segments: Vec<Segment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_edges: Vec<SkippedEdge>,
    pub chrome: Chrome,
}

impl Scene {
    /// Everything to paint, bottom to top.
    ///
    /// Segments come first. Each glyph is followed by its own label, so two
    /// overlapping nodes stack in table order.
    pub fn draw_items(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::with_capacity(
            self.segments.len() + self.glyphs.len() + self.labels.len(),
        );
        items.extend(self.segments.iter().map(DrawItem::Segment));

        let mut labels = self.labels.iter().peekable();
        for glyph in &self.glyphs {
            items.push(DrawItem::Glyph(glyph));
            while let Some(label) = labels.next_if(|l| l.node_index <= glyph.node_index) {
                items.push(DrawItem::Label(label));
            }
        }
        items.extend(labels.map(DrawItem::Label));
        items
    }

    pub fn glyph_for(&self, node_index: usize) -> Option<&Glyph> {
        self.glyphs.iter().find(|g| g.node_index == node_index)
    }

    pub fn label_for(&self, node_index: usize) -> Option<&Label> {
        self.labels.iter().find(|l| l.node_index == node_index)
    }

    /// Extent covering the chrome ticks and every drawn point.
    pub fn bounds(&self) -> Bounds {
        let first_last = |ticks: &[f64]| {
            (
                ticks.first().copied().unwrap_or(0.0),
                ticks.last().copied().unwrap_or(0.0),
            )
        };
        let (x0, x1) = first_last(&self.chrome.x_ticks);
        let (y0, y1) = first_last(&self.chrome.y_ticks);
        let mut bounds = Bounds {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        };

        for segment in &self.segments {
            bounds.include(segment.start);
            bounds.include(segment.end);
        }
        for glyph in &self.glyphs {
            match glyph.shape {
                Shape::Triangle { vertices } => vertices.iter().for_each(|v| bounds.include(*v)),
                Shape::Square { origin, side } => {
                    bounds.include(origin);
                    bounds.include(origin.offset(side, side));
                }
                Shape::Circle { center, radius } => {
                    bounds.include(center.offset(-radius, -radius));
                    bounds.include(center.offset(radius, radius));
                }
            }
        }
        for label in &self.labels {
            bounds.include(label.anchor);
        }
        bounds
    }
}
