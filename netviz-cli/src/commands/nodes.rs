//! Nodes command - Print the loaded node table

use crate::output::{Output, OutputConfig, Outputter, TableOutput};
use crate::source::Source;
use anyhow::{Context, Result};
use netviz_core::{GraphLoader, NodeTable};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NodeRow {
    pub row: usize,
    pub id: i64,
    /// Type name, or `None` for a code outside 0..=2
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub type_code: i64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    pub neighbors: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct NodeListing {
    pub source: String,
    pub nodes: Vec<NodeRow>,
}

impl NodeListing {
    pub fn from_table(source: &Source, table: &NodeTable) -> Self {
        let nodes = table
            .iter()
            .enumerate()
            .map(|(row, node)| NodeRow {
                row,
                id: node.id,
                node_type: node.node_type().map(|t| t.to_string()),
                type_code: node.type_code,
                radius: node.radius,
                x: node.position.x,
                y: node.position.y,
                neighbors: node.neighbors.clone(),
            })
            .collect();

        Self {
            source: source.to_string(),
            nodes,
        }
    }
}

impl Outputter for NodeListing {
    fn to_table(&self, config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .nodes
            .iter()
            .map(|n| {
                vec![
                    n.row.to_string(),
                    n.id.to_string(),
                    n.node_type
                        .clone()
                        .unwrap_or_else(|| format!("? ({})", n.type_code)),
                    format!("({}, {})", n.x, n.y),
                    n.neighbors
                        .iter()
                        .map(|r| r.to_string())
                        .collect::<Vec<_>>()
                        .join(","),
                ]
            })
            .collect();

        format!(
            "{} nodes from {}\n{}",
            self.nodes.len(),
            self.source,
            TableOutput::from_rows(&["Row", "Id", "Type", "Position", "Neighbors"], &rows, config)
        )
    }
}

pub fn run(source: &Source, output: &OutputConfig) -> Result<()> {
    let columns = source.fetch()?;
    let table = GraphLoader::load(columns)
        .with_context(|| format!("Failed to load topology from {}", source))?;

    Output::with_config(NodeListing::from_table(source, &table), output.clone()).render()
}
