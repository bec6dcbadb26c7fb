//! TopologyStore - DuckDB-based storage for topology snapshots.

use anyhow::{bail, Context, Result};
use duckdb::types::FromSql;
use duckdb::{params, Config, Connection};
use netviz_core::{Column, NodeRecord, RawColumns};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::schema::{SCHEMA_SQL, SCHEMA_VERSION, TABLE_NAME};

/// Database access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Read-write mode (creates the schema if missing)
    #[default]
    ReadWrite,
    /// Read-only mode (for rendering)
    ReadOnly,
}

/// Row counts for a stored snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub node_count: usize,
    /// Nodes per stored type code; NULL codes are not counted
    pub type_counts: BTreeMap<i64, usize>,
}

/// DuckDB storage for one topology snapshot.
///
/// The connection lives exactly as long as this value. Dropping the store
/// closes it, on success and error paths alike.
pub struct TopologyStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl TopologyStore {
    /// Open or create a store in read-write mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_mode(path, AccessMode::ReadWrite)
    }

    /// Open an existing store in read-only mode.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_mode(path, AccessMode::ReadOnly)
    }

    /// Open a store with the specified access mode.
    pub fn open_with_mode(path: impl AsRef<Path>, mode: AccessMode) -> Result<Self> {
        let path = path.as_ref();

        let conn = match mode {
            AccessMode::ReadWrite => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create store directory: {:?}", parent)
                    })?;
                }
                Connection::open(path)
                    .with_context(|| format!("Failed to open topology store: {:?}", path))?
            }
            AccessMode::ReadOnly => {
                if !path.exists() {
                    bail!(
                        "No topology store at {:?}. Run 'netviz import' first.",
                        path
                    );
                }
                let config = Config::default()
                    .access_mode(duckdb::AccessMode::ReadOnly)
                    .map_err(|e| anyhow::anyhow!("Failed to set read-only mode: {}", e))?;
                Connection::open_with_flags(path, config).with_context(|| {
                    format!("Failed to open topology store in read-only mode: {:?}", path)
                })?
            }
        };

        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };

        if mode == AccessMode::ReadWrite {
            store.init_schema()?;
        }

        tracing::debug!(path = ?path, ?mode, "opened topology store");
        Ok(store)
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory store")?;
        let store = Self { conn, path: None };
        store.init_schema()?;
        Ok(store)
    }

    /// Location on disk, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .context("Failed to initialize schema")?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)",
                params![SCHEMA_VERSION],
            )
            .context("Failed to set schema version")?;

        Ok(())
    }

    /// Replace the stored snapshot with `records`, preserving their order.
    pub fn insert_records(&self, records: &[NodeRecord]) -> Result<()> {
        self.insert_columns(&RawColumns::from_records(records))
    }

    /// Replace the stored snapshot with column data. `None` is written as NULL.
    pub fn insert_columns(&self, columns: &RawColumns) -> Result<()> {
        let len = columns.ids.len();
        if let Some((column, found)) = columns.lengths().into_iter().find(|(_, n)| *n != len) {
            bail!(
                "Cannot store misaligned columns: '{}' has {} rows, 'id' has {}",
                column,
                found,
                len
            );
        }

        self.conn
            .execute(&format!("DELETE FROM {}", TABLE_NAME), [])
            .context("Failed to clear topology table")?;

        {
            let mut appender = self
                .conn
                .appender(TABLE_NAME)
                .context("Failed to create node appender")?;
            for row in 0..len {
                appender.append_row(params![
                    columns.ids[row],
                    columns.types[row],
                    columns.radii[row],
                    columns.xs[row],
                    columns.ys[row],
                    columns.neighbors[row].as_deref(),
                ])?;
            }
            appender.flush()?;
        }

        tracing::info!("insert_columns: stored {} nodes", len);
        Ok(())
    }

    /// Fetch one column in storage order.
    ///
    /// Every column is ordered by `rowid`, so separate fetches of the same
    /// snapshot line up row for row.
    pub fn fetch_column<T: FromSql>(&self, column: Column) -> Result<Vec<Option<T>>> {
        let sql = format!(
            r#"SELECT "{}" FROM {} ORDER BY rowid"#,
            column.as_str(),
            TABLE_NAME
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .with_context(|| format!("Failed to prepare query: {}", sql))?;
        let mut rows = stmt
            .query([])
            .with_context(|| format!("Failed to fetch column '{}'", column))?;

        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(row.get(0)?);
        }
        Ok(values)
    }

    /// Fetch all six columns, one query each, in [`Column::ALL`] order.
    pub fn fetch_columns(&self) -> Result<RawColumns> {
        let columns = RawColumns {
            ids: self.fetch_column(Column::Id)?,
            types: self.fetch_column(Column::Type)?,
            radii: self.fetch_column(Column::Radius)?,
            xs: self.fetch_column(Column::X)?,
            ys: self.fetch_column(Column::Y)?,
            neighbors: self.fetch_column(Column::Neighbors)?,
        };
        tracing::debug!("fetched {} rows per column", columns.ids.len());
        Ok(columns)
    }

    /// Number of stored nodes.
    pub fn count(&self) -> Result<usize> {
        let count: usize = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", TABLE_NAME),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Node counts overall and per type code.
    pub fn stats(&self) -> Result<StoreStats> {
        let node_count = self.count()?;

        let mut type_counts = BTreeMap::new();
        let mut stmt = self.conn.prepare(&format!(
            r#"SELECT "type", COUNT(*) FROM {} WHERE "type" IS NOT NULL GROUP BY "type""#,
            TABLE_NAME
        ))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let code: i64 = row.get(0)?;
            let count: usize = row.get(1)?;
            type_counts.insert(code, count);
        }

        Ok(StoreStats {
            node_count,
            type_counts,
        })
    }
}

impl Drop for TopologyStore {
    fn drop(&mut self) {
        tracing::debug!(path = ?self.path, "closing topology store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, type_code: i64, neighbors: &str) -> NodeRecord {
        NodeRecord {
            id,
            type_code,
            radius: 2.5,
            x: id as f64 * 10.0,
            y: 5.0,
            neighbors: neighbors.to_string(),
        }
    }

    #[test]
    fn test_open_in_memory_is_empty() {
        let store = TopologyStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_insert_and_fetch_columns() {
        let store = TopologyStore::open_in_memory().unwrap();
        let records = vec![record(3, 0, "1"), record(1, 2, ""), record(2, 1, "0,1")];
        store.insert_records(&records).unwrap();

        let columns = store.fetch_columns().unwrap();
        assert_eq!(columns, RawColumns::from_records(&records));
    }

    #[test]
    fn test_insert_replaces_previous_snapshot() {
        let store = TopologyStore::open_in_memory().unwrap();
        store
            .insert_records(&[record(1, 0, ""), record(2, 0, "")])
            .unwrap();
        store.insert_records(&[record(9, 1, "")]).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let ids: Vec<Option<i64>> = store.fetch_column(Column::Id).unwrap();
        assert_eq!(ids, vec![Some(9)]);
    }

    #[test]
    fn test_nulls_round_trip() {
        let store = TopologyStore::open_in_memory().unwrap();
        let mut columns = RawColumns::from_records(&[record(1, 0, ""), record(2, 1, "0")]);
        columns.neighbors[1] = None;
        columns.types[0] = None;
        store.insert_columns(&columns).unwrap();

        assert_eq!(store.fetch_columns().unwrap(), columns);
    }

    #[test]
    fn test_misaligned_columns_rejected() {
        let store = TopologyStore::open_in_memory().unwrap();
        let mut columns = RawColumns::from_records(&[record(1, 0, "")]);
        columns.xs.clear();

        let err = store.insert_columns(&columns).unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_stats_by_type() {
        let store = TopologyStore::open_in_memory().unwrap();
        store
            .insert_records(&[record(1, 0, ""), record(2, 0, ""), record(3, 2, "")])
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.type_counts.get(&0), Some(&2));
        assert_eq!(stats.type_counts.get(&2), Some(&1));
        assert_eq!(stats.type_counts.get(&1), None);
    }
}
