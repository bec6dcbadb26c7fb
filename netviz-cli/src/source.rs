//! Where a command reads its topology snapshot from.

use anyhow::{Context, Result};
use netviz_core::RawColumns;
use netviz_store::TopologyStore;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::NetvizConfig;

/// A topology snapshot: a DuckDB store or a JSON records file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Store(PathBuf),
    File(PathBuf),
}

impl Source {
    /// `--input` wins over `--db`, which wins over the configured store path.
    pub fn resolve(db: Option<PathBuf>, input: Option<PathBuf>, config: &NetvizConfig) -> Self {
        match (input, db) {
            (Some(file), _) => Source::File(file),
            (None, Some(db)) => Source::Store(db),
            (None, None) => Source::Store(config.store_path()),
        }
    }

    /// Fetch the six raw columns.
    ///
    /// A store is opened read-only and closed before this returns, so the
    /// connection never outlives the fetch.
    pub fn fetch(&self) -> Result<RawColumns> {
        match self {
            Source::Store(path) => {
                let store = TopologyStore::open_read_only(path)?;
                store.fetch_columns()
            }
            Source::File(path) => read_records_file(path),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Store(path) => write!(f, "store {}", path.display()),
            Source::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// One row of a records file. Any field may be `null`; a missing
/// `neighbors` key means no neighbors.
#[derive(Debug, Deserialize)]
struct FileRecord {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default, rename = "type")]
    type_code: Option<i64>,
    #[serde(default)]
    radius: Option<f64>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default = "no_neighbors")]
    neighbors: Option<String>,
}

fn no_neighbors() -> Option<String> {
    Some(String::new())
}

/// Parse a JSON array of node records into columns, keeping nulls.
pub fn parse_records(content: &str) -> Result<RawColumns> {
    let records: Vec<FileRecord> =
        serde_json::from_str(content).context("Records must be a JSON array of node objects")?;

    let mut columns = RawColumns::default();
    for record in records {
        columns.ids.push(record.id);
        columns.types.push(record.type_code);
        columns.radii.push(record.radius);
        columns.xs.push(record.x);
        columns.ys.push(record.y);
        columns.neighbors.push(record.neighbors);
    }
    Ok(columns)
}

/// Read and parse a records file.
pub fn read_records_file(path: &Path) -> Result<RawColumns> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;
    let columns = parse_records(&content)
        .with_context(|| format!("Failed to parse records file: {}", path.display()))?;
    tracing::debug!("read {} records from {}", columns.ids.len(), path.display());
    Ok(columns)
}
