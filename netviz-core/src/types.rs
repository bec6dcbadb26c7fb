//! Data models for topology nodes.
//!
//! A node is one vertex of the network: its identity, its stored type code,
//! its position in plane space and the raw neighbor references read from
//! storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of nodes in a sensor network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Stored as `0`
    Sensor,
    /// Stored as `1`
    Relay,
    /// Stored as `2`
    Sink,
}

impl NodeType {
    /// Decode a stored type code. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(NodeType::Sensor),
            1 => Some(NodeType::Relay),
            2 => Some(NodeType::Sink),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            NodeType::Sensor => 0,
            NodeType::Relay => 1,
            NodeType::Sink => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Sensor => "sensor",
            NodeType::Relay => "relay",
            NodeType::Sink => "sink",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sensor" => Some(NodeType::Sensor),
            "relay" => Some(NodeType::Relay),
            "sink" => Some(NodeType::Sink),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A point in plane space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A vertex in the topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, also used as the display label
    pub id: i64,
    /// Type code exactly as stored (0 = sensor, 1 = relay, 2 = sink)
    pub type_code: i64,
    /// Coverage radius. Carried for completeness; rendering ignores it.
    pub radius: f64,
    /// Position in plane space
    pub position: Point,
    /// Neighbor references in stored order
    pub neighbors: Vec<usize>,
}

impl Node {
    /// Decoded node type, or `None` for an unrecognized code.
    pub fn node_type(&self) -> Option<NodeType> {
        NodeType::from_code(self.type_code)
    }
}
