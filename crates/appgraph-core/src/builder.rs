//! Raw payload → [`AppGraph`].
//!
//! All-or-nothing: the first violation aborts the build and no partial graph escapes.

use crate::error::{Error, Result};
use crate::model::{AppGraph, Edge, Node};
use crate::payload::{RawEdge, RawGraph};
use rustc_hash::FxHashMap;

pub fn build_graph(raw: RawGraph) -> Result<AppGraph> {
    let RawGraph {
        node_type,
        nodes: raw_nodes,
        edges: raw_edges,
    } = raw;

    let mut first_seen: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, node) in raw_nodes.iter().enumerate() {
        if node.app_id.is_empty() {
            return Err(Error::malformed(format!("nodes[{i}] has an empty app_id")));
        }
        if let Some(first) = first_seen.insert(node.app_id.as_str(), i) {
            return Err(Error::malformed(format!(
                "duplicate node id `{}` at nodes[{i}] (first at nodes[{first}])",
                node.app_id
            )));
        }
    }

    let node_count = raw_nodes.len();
    let mut edges: Vec<Edge> = Vec::with_capacity(raw_edges.len());
    for (index, RawEdge(from, to)) in raw_edges.into_iter().enumerate() {
        for endpoint in [from, to] {
            if endpoint >= node_count {
                return Err(Error::malformed(format!(
                    "edges[{index}] references node index {endpoint} but only {node_count} nodes exist"
                )));
            }
        }
        edges.push(Edge {
            index,
            source: raw_nodes[from].app_id.clone(),
            target: raw_nodes[to].app_id.clone(),
        });
    }

    let nodes: Vec<Node> = raw_nodes
        .into_iter()
        .map(|n| Node {
            id: n.app_id,
            label: n.label,
            name: n.name,
            description: n.description,
            parent_id: n.parent_id,
        })
        .collect();

    tracing::debug!(nodes = nodes.len(), edges = edges.len(), "built graph");
    Ok(AppGraph {
        node_type,
        nodes,
        edges,
    })
}
