//! Typed application graph handed to layout.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The payload's `app_id`; unique within a graph.
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Position in the payload's edge list. Keeps parallel edges apart.
    pub index: usize,
    pub source: String,
    pub target: String,
}

impl Edge {
    /// Stable edge id, `e<index>`.
    pub fn id(&self) -> String {
        format!("e{}", self.index)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl AppGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Distinct targets of edges leaving `id`, in edge order.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in self.edges.iter().filter(|e| e.source == id) {
            if !out.contains(&e.target.as_str()) {
                out.push(e.target.as_str());
            }
        }
        out
    }
}
