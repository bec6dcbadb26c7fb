//! Error types for netviz-core.

use crate::loader::Column;
use thiserror::Error;

/// Result type alias for the full load-then-render pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a node table. Nothing is rendered after one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The six per-column sequences are not index-aligned.
    #[error("Columns are not aligned: {}", format_lengths(.lengths))]
    LengthMismatch {
        /// Length of every column, in fetch order.
        lengths: [(Column, usize); 6],
    },

    /// A required field was NULL in storage.
    #[error("Missing value for column '{column}' at row {row}")]
    MissingField {
        /// Column holding the missing value.
        column: Column,
        /// Table position of the row.
        row: usize,
    },

    /// Two rows share the same node id.
    #[error("Duplicate node id {id} at rows {first} and {second}")]
    DuplicateId {
        /// The repeated id.
        id: i64,
        /// Row of the first occurrence.
        first: usize,
        /// Row of the repeated occurrence.
        second: usize,
    },
}

fn format_lengths(lengths: &[(Column, usize)]) -> String {
    lengths
        .iter()
        .map(|(column, len)| format!("{}={}", column, len))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while turning a node table into a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A positional neighbor reference points past the end of the table.
    #[error(
        "Node at row {node_index} references position {reference}, but the table has {table_len} nodes"
    )]
    NeighborOutOfRange {
        /// Row of the node owning the reference.
        node_index: usize,
        /// The unresolvable reference.
        reference: usize,
        /// Number of nodes in the table.
        table_len: usize,
    },

    /// An id-based neighbor reference names no node in the table.
    #[error("Node at row {node_index} references unknown node id {reference}")]
    UnknownNeighborId {
        /// Row of the node owning the reference.
        node_index: usize,
        /// The unresolvable reference.
        reference: usize,
    },
}

/// Any failure of the load-then-render pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}
