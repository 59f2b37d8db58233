//! Node, edge and graph label types threaded through the layout phases.
//!
//! Phases communicate only through these labels: every field a phase writes is `Option` or has
//! a neutral default so each phase can also be exercised on its own in tests.

use crate::graphlib::EdgeKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    TB,
    BT,
    #[default]
    LR,
    RL,
}

impl RankDir {
    /// Whether ranks advance along the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LR | RankDir::RL)
    }
}

impl std::str::FromStr for RankDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TB),
            "BT" => Ok(Self::BT),
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            other => Err(format!("unknown rank direction: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphLabel {
    pub rankdir: RankDir,
    /// Minimum gap between two real nodes that share a rank.
    pub nodesep: f64,
    /// Gap between consecutive ranks along the layer axis.
    pub ranksep: f64,
    /// Gap used next to dummy nodes of long edges.
    pub edgesep: f64,
    /// First dummy node of every chain created by `normalize::run`.
    pub dummy_chains: Vec<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Default for GraphLabel {
    fn default() -> Self {
        Self {
            rankdir: RankDir::LR,
            nodesep: 120.0,
            ranksep: 100.0,
            edgesep: 20.0,
            dummy_chains: Vec::new(),
            width: None,
            height: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DummyKind {
    /// Placeholder occupying one rank of an edge that spans several ranks.
    Edge,
}

/// `width` is the extent along the lane axis, `height` along the layer axis, regardless of
/// [`RankDir`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub dummy: Option<DummyKind>,
    /// For dummies: the original edge this node stands in for.
    pub edge_obj: Option<EdgeKey>,
    pub edge_label: Option<EdgeLabel>,
}

impl NodeLabel {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub minlen: usize,
    pub weight: f64,
    /// Set by `acyclic::run` on edges it flipped to break a cycle.
    pub reversed: bool,
    /// Edge belonged to the feedback arc set. Unlike `reversed`, survives `acyclic::undo`.
    pub feedback: bool,
    /// Original edge name of a reversed edge.
    pub forward_name: Option<String>,
    /// Bend points through the ranks the edge crosses.
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            minlen: 1,
            weight: 1.0,
            reversed: false,
            feedback: false,
            forward_name: None,
            points: Vec::new(),
        }
    }
}
