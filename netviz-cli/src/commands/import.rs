//! Import command - Write a JSON records file into the topology store

use crate::output::{Output, OutputConfig, Outputter, TableOutput};
use crate::source::read_records_file;
use anyhow::Result;
use colored::Colorize;
use netviz_core::NodeType;
use netviz_store::TopologyStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Summary of an import.
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub input: String,
    pub store: String,
    pub node_count: usize,
    /// Node counts keyed by type name, or by raw code for unknown types
    pub type_counts: BTreeMap<String, usize>,
}

impl Outputter for ImportResult {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut lines = Vec::new();
        let header = format!("Imported {} nodes", self.node_count);
        if config.use_colors() {
            lines.push(header.green().bold().to_string());
        } else {
            lines.push(header);
        }

        let mut pairs = vec![
            ("Input", self.input.clone()),
            ("Store", self.store.clone()),
        ];
        for (name, count) in &self.type_counts {
            pairs.push((name.as_str(), count.to_string()));
        }
        lines.push(TableOutput::format_key_value(&pairs, config));
        lines.join("\n")
    }
}

fn type_name(code: i64) -> String {
    match NodeType::from_code(code) {
        Some(node_type) => node_type.to_string(),
        None => format!("type {}", code),
    }
}

/// Replace the store's snapshot with the records in `input`.
pub fn run(input: &Path, db: &Path, output: &OutputConfig) -> Result<()> {
    let columns = read_records_file(input)?;

    let stats = {
        let store = TopologyStore::open(db)?;
        store.insert_columns(&columns)?;
        store.stats()?
    };

    let result = ImportResult {
        input: input.display().to_string(),
        store: db.display().to_string(),
        node_count: stats.node_count,
        type_counts: stats
            .type_counts
            .into_iter()
            .map(|(code, count)| (type_name(code), count))
            .collect(),
    };

    Output::with_config(result, output.clone()).render()
}
