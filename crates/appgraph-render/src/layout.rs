//! [`AppGraph`] → `strata` → [`LayoutResult`].

use crate::config::LayoutConfig;
use crate::model::{LayoutEdge, LayoutNode, LayoutPoint, LayoutResult};
use crate::{Error, Result};
use appgraph_core::AppGraph;
use rustc_hash::FxHashSet;
use strata::graphlib::{EdgeKey, alg};
use strata::{EdgeLabel, LayoutGraph, NodeLabel, acyclic, new_layout_graph};

/// Lays out `graph` with `config`. Nodes and edges come back in input order.
///
/// Fails only on an invalid config or on a graph the builder would have rejected (duplicate
/// ids, dangling edge endpoints, repeated edge indices). Cycles are laid out, never rejected.
pub fn layout_graph(graph: &AppGraph, config: &LayoutConfig) -> Result<LayoutResult> {
    config.validate()?;
    check_model(graph)?;

    let mut g = new_layout_graph(config.graph_label());
    for node in &graph.nodes {
        g.set_node(
            node.id.clone(),
            NodeLabel::sized(config.node_width, config.node_height),
        );
    }
    for edge in &graph.edges {
        g.set_edge_named(
            edge.source.clone(),
            edge.target.clone(),
            Some(edge.id()),
            Some(EdgeLabel::default()),
        );
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        let cycles = alg::find_cycles(&g);
        if !cycles.is_empty() {
            tracing::debug!(cycles = cycles.len(), "graph contains cycles");
        }
    }

    let stats = strata::layout(&mut g);

    let (node_w, node_h) = config.node_extent();
    let mut nodes: Vec<LayoutNode> = Vec::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        let (rank, order, cx, cy) = placement(&g, &node.id)?;
        nodes.push(LayoutNode {
            id: node.id.clone(),
            label: node.label.clone(),
            description: node.description.clone(),
            rank,
            order,
            x: cx - node_w / 2.0,
            y: cy - node_h / 2.0,
            width: node_w,
            height: node_h,
        });
    }

    let mut edges: Vec<LayoutEdge> = Vec::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        let key = EdgeKey::new(edge.source.as_str(), edge.target.as_str(), Some(edge.id()));
        let Some(label) = g.edge_by_key(&key) else {
            return Err(lost(format!("edge {}", key.name.unwrap_or_default())));
        };
        edges.push(LayoutEdge {
            id: edge.id(),
            index: edge.index,
            source: edge.source.clone(),
            target: edge.target.clone(),
            feedback: acyclic::is_feedback(&key, label),
            points: label
                .points
                .iter()
                .map(|p| LayoutPoint { x: p.x, y: p.y })
                .collect(),
        });
    }

    let label = g.graph();
    Ok(LayoutResult {
        direction: config.direction,
        width: label.width.unwrap_or(0.0),
        height: label.height.unwrap_or(0.0),
        nodes,
        edges,
        crossings: stats.crossings,
    })
}

fn check_model(graph: &AppGraph) -> Result<()> {
    let mut ids: FxHashSet<&str> = FxHashSet::default();
    for node in &graph.nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(Error::InvalidModel {
                message: format!("duplicate node id `{}`", node.id),
            });
        }
    }

    let mut indices: FxHashSet<usize> = FxHashSet::default();
    for edge in &graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !ids.contains(endpoint.as_str()) {
                return Err(Error::InvalidModel {
                    message: format!("edge {} references missing node `{endpoint}`", edge.id()),
                });
            }
        }
        if !indices.insert(edge.index) {
            return Err(Error::InvalidModel {
                message: format!("duplicate edge index {}", edge.index),
            });
        }
    }
    Ok(())
}

/// `(rank, order, centre x, centre y)` of a laid-out node.
fn placement(g: &LayoutGraph, id: &str) -> Result<(usize, usize, f64, f64)> {
    let Some(n) = g.node(id) else {
        return Err(lost(format!("node `{id}`")));
    };
    match (n.rank, n.order, n.x, n.y) {
        (Some(rank), Some(order), Some(x), Some(y)) if rank >= 0 => {
            Ok((rank as usize, order, x, y))
        }
        _ => Err(lost(format!("position of node `{id}`"))),
    }
}

fn lost(what: String) -> Error {
    tracing::error!(%what, "layout dropped part of the graph");
    Error::InvalidModel {
        message: format!("layout lost {what}"),
    }
}
