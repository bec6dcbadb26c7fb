//! Scene renderer: a single stateless pass from [`NodeTable`] to [`Scene`].
//!
//! Two sweeps over the table, both in row order:
//!
//! 1. **Nodes**: one glyph per node of a known type, plus an id label for
//!    small ids. Row order fixes the stacking of overlapping glyphs and the
//!    order labels are drawn in.
//! 2. **Edges**: one segment per stored neighbor reference. Mutual references
//!    give two coincident segments; there is no deduplication.
//!
//! Segments live on the background layer, so glyphs are never hidden by edges.

use crate::error::RenderError;
use crate::scene::{Chrome, Color, Glyph, Label, Layer, Scene, Segment, Shape, SkippedEdge};
use crate::table::{NeighborResolution, NodeTable};
use crate::types::{Node, NodeType, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-width of a sensor triangle.
pub const TRIANGLE_HALF_WIDTH: f64 = 2.0;
/// Side of a relay square.
pub const SQUARE_SIDE: f64 = 2.0;
/// Radius of a sink circle.
pub const CIRCLE_RADIUS: f64 = 2.0;
/// Vertical distance from node position to label anchor.
pub const LABEL_OFFSET: f64 = 1.0;
pub const LABEL_FONT_SIZE: f64 = 15.0;
pub const LABEL_FONT_FAMILY: &str = "monospace";
pub const EDGE_WIDTH: f64 = 2.0;

/// Ids shown as labels: `0 < id <= 10`.
///
/// Keeps dense graphs readable. Id 0 is deliberately excluded.
pub fn shows_label(id: i64) -> bool {
    id > 0 && id <= 10
}

/// What to do with a neighbor reference that names no node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingNeighborPolicy {
    /// Abort the whole render.
    #[default]
    Fail,
    /// Leave the edge out and record it in [`Scene::skipped_edges`].
    Skip,
}

impl MissingNeighborPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingNeighborPolicy::Fail => "fail",
            MissingNeighborPolicy::Skip => "skip",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fail" => Some(MissingNeighborPolicy::Fail),
            "skip" => Some(MissingNeighborPolicy::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for MissingNeighborPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    pub resolution: NeighborResolution,
    pub missing_neighbor: MissingNeighborPolicy,
}

impl RenderOptions {
    pub fn with_resolution(mut self, resolution: NeighborResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_missing_neighbor(mut self, policy: MissingNeighborPolicy) -> Self {
        self.missing_neighbor = policy;
        self
    }
}

/// Turns a node table into a scene.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    options: RenderOptions,
}

impl SceneRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the table.
    ///
    /// Under [`MissingNeighborPolicy::Fail`] the first unresolvable reference
    /// aborts and no partial scene is returned.
    pub fn render(&self, table: &NodeTable) -> Result<Scene, RenderError> {
        let mut scene = Scene {
            chrome: Chrome::default(),
            ..Default::default()
        };

        for (index, node) in table.iter().enumerate() {
            let Some(glyph) = glyph_for(index, node) else {
                tracing::trace!(index, type_code = node.type_code, "no glyph for node type");
                continue;
            };
            scene.glyphs.push(glyph);

            if shows_label(node.id) {
                scene.labels.push(Label {
                    node_index: index,
                    text: node.id.to_string(),
                    anchor: node.position.offset(0.0, LABEL_OFFSET),
                    font_family: LABEL_FONT_FAMILY,
                    font_size: LABEL_FONT_SIZE,
                    layer: Layer::Annotation,
                });
            }
        }

        for (index, node) in table.iter().enumerate() {
            for &reference in &node.neighbors {
                match table.resolve(reference, self.options.resolution) {
                    Some(target) => scene.segments.push(Segment {
                        from_index: index,
                        to_index: target,
                        start: node.position,
                        end: table.nodes()[target].position,
                        color: Color::Black,
                        line_width: EDGE_WIDTH,
                        layer: Layer::Background,
                    }),
                    None => {
                        let err = self.unresolved(table, index, reference);
                        match self.options.missing_neighbor {
                            MissingNeighborPolicy::Fail => return Err(err),
                            MissingNeighborPolicy::Skip => {
                                tracing::warn!("Skipping edge: {}", err);
                                scene.skipped_edges.push(SkippedEdge {
                                    node_index: index,
                                    reference,
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!(
            glyphs = scene.glyphs.len(),
            labels = scene.labels.len(),
            segments = scene.segments.len(),
            skipped = scene.skipped_edges.len(),
            "rendered scene"
        );
        Ok(scene)
    }

    fn unresolved(&self, table: &NodeTable, node_index: usize, reference: usize) -> RenderError {
        match self.options.resolution {
            NeighborResolution::Position => RenderError::NeighborOutOfRange {
                node_index,
                reference,
                table_len: table.len(),
            },
            NeighborResolution::Id => RenderError::UnknownNeighborId {
                node_index,
                reference,
            },
        }
    }
}

/// Glyph for a node, or `None` if its type code is unknown.
fn glyph_for(index: usize, node: &Node) -> Option<Glyph> {
    let Point { x, y } = node.position;
    let (shape, fill) = match node.node_type()? {
        NodeType::Sensor => {
            let h = TRIANGLE_HALF_WIDTH;
            let vertices = [
                Point::new(x - h, y - h),
                Point::new(x + h, y - h),
                Point::new(x, y + h),
            ];
            (Shape::Triangle { vertices }, Color::Green)
        }
        NodeType::Relay => {
            let half = SQUARE_SIDE / 2.0;
            (
                Shape::Square {
                    origin: Point::new(x - half, y - half),
                    side: SQUARE_SIDE,
                },
                Color::Red,
            )
        }
        NodeType::Sink => (
            Shape::Circle {
                center: node.position,
                radius: CIRCLE_RADIUS,
            },
            Color::Blue,
        ),
    };

    Some(Glyph {
        node_index: index,
        node_id: node.id,
        shape,
        fill,
        layer: Layer::Foreground,
    })
}

/// Render with default options: positional references, fail on a bad one.
pub fn render(table: &NodeTable) -> Result<Scene, RenderError> {
    SceneRenderer::default().render(table)
}
