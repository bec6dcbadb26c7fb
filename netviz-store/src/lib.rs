//! netviz storage layer.
//!
//! Provides DuckDB-based storage for topology snapshots with:
//! - Schema management
//! - Bulk import of node records
//! - Column-by-column retrieval into [`netviz_core::RawColumns`]

mod schema;
mod store;

pub use schema::{SCHEMA_SQL, SCHEMA_VERSION, TABLE_NAME};
pub use store::{AccessMode, StoreStats, TopologyStore};
