//! Database schema for topology snapshots.
//!
//! Columns are nullable on purpose: snapshots written by other tools may carry
//! NULLs, and the loader reports those as missing fields instead of the store
//! refusing to open.

/// Name of the table holding one row per node.
pub const TABLE_NAME: &str = "graph";

/// SQL schema for creating the netviz tables.
pub const SCHEMA_SQL: &str = r#"
-- One row per node; neighbors is a comma-separated list of references
CREATE TABLE IF NOT EXISTS graph (
    id BIGINT,
    type BIGINT,
    radius DOUBLE,
    x DOUBLE,
    y DOUBLE,
    neighbors VARCHAR
);

-- Metadata table: version info
CREATE TABLE IF NOT EXISTS metadata (
    key VARCHAR PRIMARY KEY,
    value VARCHAR
);
"#;

/// Schema version for migrations
pub const SCHEMA_VERSION: &str = "1.0.0";
