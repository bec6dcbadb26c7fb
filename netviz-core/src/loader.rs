//! Graph loader: raw per-column fetches in, validated node table out.
//!
//! Storage hands over one sequence per attribute, each produced by an
//! independent query. Nothing upstream guarantees those sequences line up, so
//! the loader checks alignment once, at the boundary, and builds every node in
//! a single pass.

use crate::error::LoadError;
use crate::table::NodeTable;
use crate::types::{Node, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six stored columns of the topology table, in fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Id,
    Type,
    Radius,
    X,
    Y,
    Neighbors,
}

impl Column {
    /// All columns in the order they are fetched.
    pub const ALL: [Column; 6] = [
        Column::Id,
        Column::Type,
        Column::Radius,
        Column::X,
        Column::Y,
        Column::Neighbors,
    ];

    /// Column name as it appears in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Type => "type",
            Column::Radius => "radius",
            Column::X => "x",
            Column::Y => "y",
            Column::Neighbors => "neighbors",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One stored row, as imported from JSON or written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub type_code: i64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    /// Comma-separated neighbor references, possibly empty
    #[serde(default)]
    pub neighbors: String,
}

/// Six independently fetched columns. `None` marks a NULL in storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawColumns {
    pub ids: Vec<Option<i64>>,
    pub types: Vec<Option<i64>>,
    pub radii: Vec<Option<f64>>,
    pub xs: Vec<Option<f64>>,
    pub ys: Vec<Option<f64>>,
    pub neighbors: Vec<Option<String>>,
}

impl RawColumns {
    /// Split complete rows into columns.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a NodeRecord>) -> Self {
        let mut columns = Self::default();
        for record in records {
            columns.ids.push(Some(record.id));
            columns.types.push(Some(record.type_code));
            columns.radii.push(Some(record.radius));
            columns.xs.push(Some(record.x));
            columns.ys.push(Some(record.y));
            columns.neighbors.push(Some(record.neighbors.clone()));
        }
        columns
    }

    /// Length of each column, in fetch order.
    pub fn lengths(&self) -> [(Column, usize); 6] {
        [
            (Column::Id, self.ids.len()),
            (Column::Type, self.types.len()),
            (Column::Radius, self.radii.len()),
            (Column::X, self.xs.len()),
            (Column::Y, self.ys.len()),
            (Column::Neighbors, self.neighbors.len()),
        ]
    }

    fn check_alignment(&self) -> Result<usize, LoadError> {
        let lengths = self.lengths();
        let len = self.ids.len();
        if lengths.iter().any(|(_, n)| *n != len) {
            return Err(LoadError::LengthMismatch { lengths });
        }
        Ok(len)
    }
}

/// Parse a stored neighbor list.
///
/// Tokens are split on `,`; a token survives only if it is made entirely of
/// ASCII digits and fits in `usize`. Everything else (blank tokens, signs,
/// padding, letters) is dropped without error.
pub fn parse_neighbors(s: &str) -> Vec<usize> {
    parse_neighbors_counted(s).0
}

/// Like [`parse_neighbors`], also returning how many tokens were dropped.
pub fn parse_neighbors_counted(s: &str) -> (Vec<usize>, usize) {
    if s.is_empty() {
        return (Vec::new(), 0);
    }

    let mut parsed = Vec::new();
    let mut dropped = 0;
    for token in s.split(',') {
        let is_digits = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
        match token.parse::<usize>() {
            Ok(n) if is_digits => parsed.push(n),
            _ => dropped += 1,
        }
    }
    (parsed, dropped)
}

/// Builds a [`NodeTable`] from raw columns.
pub struct GraphLoader;

impl GraphLoader {
    /// Validate and assemble the node table.
    ///
    /// Fails if the columns differ in length, if any field is NULL, or if two
    /// rows share an id. Malformed neighbor tokens are dropped.
    pub fn load(columns: RawColumns) -> Result<NodeTable, LoadError> {
        let len = columns.check_alignment()?;

        let RawColumns {
            ids,
            types,
            radii,
            xs,
            ys,
            neighbors,
        } = columns;

        let mut nodes = Vec::with_capacity(len);
        let mut dropped_tokens = 0;

        let rows = ids
            .into_iter()
            .zip(types)
            .zip(radii)
            .zip(xs)
            .zip(ys)
            .zip(neighbors)
            .enumerate();

        for (row, (((((id, type_code), radius), x), y), neighbor_list)) in rows {
            let missing = |column| LoadError::MissingField { column, row };
            let id = id.ok_or_else(|| missing(Column::Id))?;
            let type_code = type_code.ok_or_else(|| missing(Column::Type))?;
            let radius = radius.ok_or_else(|| missing(Column::Radius))?;
            let x = x.ok_or_else(|| missing(Column::X))?;
            let y = y.ok_or_else(|| missing(Column::Y))?;
            let neighbor_list = neighbor_list.ok_or_else(|| missing(Column::Neighbors))?;

            let (neighbors, dropped) = parse_neighbors_counted(&neighbor_list);
            if dropped > 0 {
                tracing::trace!(row, id, dropped, "dropped malformed neighbor tokens");
            }
            dropped_tokens += dropped;

            nodes.push(Node {
                id,
                type_code,
                radius,
                position: Point::new(x, y),
                neighbors,
            });
        }

        let table = NodeTable::from_nodes(nodes)?;
        tracing::debug!(
            nodes = table.len(),
            references = table.reference_count(),
            dropped_tokens,
            "loaded node table"
        );
        Ok(table)
    }

    /// Six-argument form of [`GraphLoader::load`] for fully populated columns.
    pub fn load_columns(
        ids: Vec<i64>,
        types: Vec<i64>,
        radii: Vec<f64>,
        xs: Vec<f64>,
        ys: Vec<f64>,
        neighbors: Vec<String>,
    ) -> Result<NodeTable, LoadError> {
        Self::load(RawColumns {
            ids: ids.into_iter().map(Some).collect(),
            types: types.into_iter().map(Some).collect(),
            radii: radii.into_iter().map(Some).collect(),
            xs: xs.into_iter().map(Some).collect(),
            ys: ys.into_iter().map(Some).collect(),
            neighbors: neighbors.into_iter().map(Some).collect(),
        })
    }
}
