//! Layout result → display primitives.
//!
//! The canvas lays graphs out top to bottom, so a horizontal flow (`LR`, `RL`) is transposed:
//! the rank axis becomes display `y` and lanes spread along display `x`. Styling is fixed.

use crate::model::{LayoutEdge, LayoutNode, LayoutResult};
use serde::{Deserialize, Serialize};
use strata::RankDir;

pub const NODE_TYPE: &str = "default";
pub const EDGE_TYPE: &str = "smoothstep";
pub const MARKER_COLOR: &str = "#000";
pub const EDGE_STROKE: &str = "#222";
pub const EDGE_STROKE_WIDTH: f64 = 2.0;

/// Logical `(x, y)` → display `(x, y)`.
pub fn to_display(x: f64, y: f64, direction: RankDir) -> (f64, f64) {
    if direction.is_horizontal() {
        (y, x)
    } else {
        (x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub data: NodeData,
    /// Top-left corner in display coordinates.
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    #[serde(rename = "arrowclosed")]
    ArrowClosed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub marker_end: Marker,
    pub style: EdgeStyle,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderGraph {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    /// Canvas size in display coordinates.
    pub width: f64,
    pub height: f64,
}

impl RenderGraph {
    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

pub fn project(layout: &LayoutResult) -> RenderGraph {
    let direction = layout.direction;
    let (width, height) = to_display(layout.width, layout.height, direction);
    RenderGraph {
        nodes: layout
            .nodes
            .iter()
            .map(|n| visual_node(n, direction))
            .collect(),
        edges: layout
            .edges
            .iter()
            .map(|e| visual_edge(e, direction))
            .collect(),
        width,
        height,
    }
}

fn visual_node(node: &LayoutNode, direction: RankDir) -> VisualNode {
    let (x, y) = to_display(node.x, node.y, direction);
    VisualNode {
        id: node.id.clone(),
        node_type: NODE_TYPE.to_string(),
        data: NodeData {
            label: node.label.clone(),
            description: node.description.clone(),
        },
        position: Position { x, y },
    }
}

fn visual_edge(edge: &LayoutEdge, direction: RankDir) -> VisualEdge {
    VisualEdge {
        id: edge.id.clone(),
        source: edge.source.clone(),
        target: edge.target.clone(),
        edge_type: EDGE_TYPE.to_string(),
        marker_end: Marker {
            kind: MarkerKind::ArrowClosed,
            color: MARKER_COLOR.to_string(),
        },
        style: EdgeStyle {
            stroke: EDGE_STROKE.to_string(),
            stroke_width: EDGE_STROKE_WIDTH,
        },
        points: edge
            .points
            .iter()
            .map(|p| {
                let (x, y) = to_display(p.x, p.y, direction);
                Position { x, y }
            })
            .collect(),
    }
}
