//! netviz core: topology loading and deterministic scene rendering.
//!
//! This crate turns a snapshot of stored network nodes into a drawable scene:
//!
//! ```text
//! RawColumns (one fetch per column) -> GraphLoader -> NodeTable
//!     -> SceneRenderer -> Scene -> exporter / presenter
//! ```
//!
//! # Features
//!
//! - **Aligned loading**: six independently fetched columns are checked for
//!   alignment and assembled into one immutable [`NodeTable`]
//! - **Lenient adjacency parsing**: malformed neighbor tokens are dropped
//! - **Deterministic rendering**: glyphs, labels and segments in table order,
//!   with edges always beneath nodes
//! - **Explicit reference semantics**: neighbor integers resolve positionally
//!   by default, or by node id on request
//! - **Swappable output**: JSON and SVG exporters over the same [`Scene`]
//!
//! # Usage
//!
//! ```
//! use netviz_core::{GraphLoader, SceneRenderer, RenderOptions};
//!
//! let table = GraphLoader::load_columns(
//!     vec![0, 1],
//!     vec![0, 2],
//!     vec![1.0, 1.0],
//!     vec![10.0, 20.0],
//!     vec![10.0, 10.0],
//!     vec!["1".to_string(), String::new()],
//! )?;
//! let scene = SceneRenderer::new(RenderOptions::default()).render(&table)?;
//! assert_eq!(scene.segments.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod exporter;
pub mod loader;
pub mod renderer;
pub mod scene;
pub mod table;
pub mod types;

pub use error::{Error, LoadError, RenderError, Result};
pub use loader::{parse_neighbors, Column, GraphLoader, NodeRecord, RawColumns};
pub use renderer::{MissingNeighborPolicy, RenderOptions, SceneRenderer};
pub use scene::Scene;
pub use table::{NeighborResolution, NodeTable};
pub use types::{Node, NodeType, Point};

/// Load raw columns and render them in one call.
pub fn render_columns(columns: RawColumns, options: RenderOptions) -> Result<Scene> {
    let table = GraphLoader::load(columns)?;
    Ok(SceneRenderer::new(options).render(&table)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_columns_surfaces_load_errors() {
        let columns = RawColumns {
            ids: vec![Some(1)],
            ..Default::default()
        };
        let err = render_columns(columns, RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::LengthMismatch { .. })));
    }

    #[test]
    fn test_render_columns_surfaces_render_errors() {
        let records = [NodeRecord {
            id: 1,
            type_code: 0,
            radius: 1.0,
            x: 0.0,
            y: 0.0,
            neighbors: "4".to_string(),
        }];
        let err =
            render_columns(RawColumns::from_records(&records), RenderOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Render(RenderError::NeighborOutOfRange { reference: 4, .. })
        ));
    }
}
