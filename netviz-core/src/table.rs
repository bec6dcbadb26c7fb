//! Immutable, index-aligned node table.

use crate::error::LoadError;
use crate::types::Node;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How a stored neighbor integer names its target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborResolution {
    /// Reference `k` is the node at table position `k`.
    ///
    /// This ties edges to storage order: it only agrees with [`Id`] when ids
    /// run 0, 1, 2, ... in the same order the rows were fetched.
    ///
    /// [`Id`]: NeighborResolution::Id
    #[default]
    Position,
    /// Reference `k` is the node whose `id` equals `k`.
    Id,
}

impl NeighborResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            NeighborResolution::Position => "position",
            NeighborResolution::Id => "id",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "position" | "index" => Some(NeighborResolution::Position),
            "id" => Some(NeighborResolution::Id),
            _ => None,
        }
    }
}

impl fmt::Display for NeighborResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The loaded topology: one [`Node`] per row, in fetch order.
#[derive(Debug, Clone, Serialize)]
pub struct NodeTable {
    nodes: Vec<Node>,
    #[serde(skip)]
    id_index: HashMap<i64, usize>,
}

impl NodeTable {
    /// Build a table from already-assembled nodes.
    ///
    /// Row order is preserved. Fails if two nodes share an id.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, LoadError> {
        let mut id_index = HashMap::with_capacity(nodes.len());
        for (row, node) in nodes.iter().enumerate() {
            if let Some(first) = id_index.insert(node.id, row) {
                return Err(LoadError::DuplicateId {
                    id: node.id,
                    first,
                    second: row,
                });
            }
        }
        Ok(Self { nodes, id_index })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Table position of the node with the given id.
    pub fn index_of_id(&self, id: i64) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    /// Resolve a neighbor reference to a table position.
    pub fn resolve(&self, reference: usize, resolution: NeighborResolution) -> Option<usize> {
        match resolution {
            NeighborResolution::Position => (reference < self.nodes.len()).then_some(reference),
            NeighborResolution::Id => i64::try_from(reference)
                .ok()
                .and_then(|id| self.index_of_id(id)),
        }
    }

    /// Total number of stored neighbor references.
    pub fn reference_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum()
    }
}

impl<'a> IntoIterator for &'a NodeTable {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
