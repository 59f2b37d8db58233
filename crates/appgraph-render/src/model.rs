use serde::{Deserialize, Serialize};
use strata::RankDir;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// A placed node. `x`/`y` is the top-left corner; `width`/`height` are extents along the logical
/// axes, so for `LR`/`RL` the rank axis is `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rank: usize,
    pub order: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    /// `e<index>`.
    pub id: String,
    pub index: usize,
    pub source: String,
    pub target: String,
    /// Closes a cycle (or loops on one node) and so does not advance rank.
    pub feedback: bool,
    /// Bend points through the ranks a long edge skips.
    #[serde(default)]
    pub points: Vec<LayoutPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub direction: RankDir,
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Weighted crossings between adjacent ranks, bend points included.
    pub crossings: f64,
}

impl LayoutResult {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn rank_count(&self) -> usize {
        self.nodes.iter().map(|n| n.rank + 1).max().unwrap_or(0)
    }

    pub fn feedback_edges(&self) -> impl Iterator<Item = &LayoutEdge> {
        self.edges.iter().filter(|e| e.feedback)
    }
}
