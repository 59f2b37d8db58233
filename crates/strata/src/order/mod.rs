//! Node ordering / crossing minimization.
//!
//! Starts from a DFS layering, then alternates down sweeps (sort each layer by predecessor
//! barycenters) and up sweeps (by successor barycenters), flipping the tie bias every two
//! sweeps. The layering with the fewest weighted crossings is kept; the search stops after four
//! sweeps without a strict improvement.

mod barycenter;
pub use barycenter::{BarycenterEntry, barycenter, sort};

mod cross_count;
pub use cross_count::cross_count;

mod init_order;
pub use init_order::init_order;

use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    InEdges,
    OutEdges,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderOptions {
    /// Keep the DFS layering without barycenter sweeps.
    pub disable_optimal_order_heuristic: bool,
}

/// Assigns `order` to every ranked node and returns the final crossing count.
pub fn order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, opts: OrderOptions) -> f64 {
    let layering = init_order(g);
    if layering.is_empty() {
        return 0.0;
    }
    assign_order(g, &layering);

    let mut best_cc = cross_count(g, &layering);
    if opts.disable_optimal_order_heuristic {
        return best_cc;
    }
    let mut best_layering = layering;
    let max_rank = best_layering.len() - 1;

    let mut i: usize = 0;
    let mut last_best: usize = 0;
    while last_best < 4 && best_cc > 0.0 {
        let use_down = i % 2 == 1;
        let bias_right = i % 4 >= 2;

        let mut layering_now = build_layer_matrix(g, max_rank);
        if use_down {
            for r in 1..=max_rank {
                sweep_layer(g, &mut layering_now, r, Relationship::InEdges, bias_right);
            }
        } else {
            for r in (0..max_rank).rev() {
                sweep_layer(g, &mut layering_now, r, Relationship::OutEdges, bias_right);
            }
        }

        let cc = cross_count(g, &layering_now);
        if cc < best_cc {
            last_best = 0;
            best_cc = cc;
            best_layering = layering_now;
        }

        i += 1;
        last_best += 1;
    }

    assign_order(g, &best_layering);
    tracing::debug!(crossings = best_cc, sweeps = i, "ordered layers");
    best_cc
}

fn sweep_layer(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layering: &mut [Vec<String>],
    rank: usize,
    relationship: Relationship,
    bias_right: bool,
) {
    let entries = barycenter(g, &layering[rank], relationship);
    let sorted = sort(&entries, bias_right);
    for (i, v) in sorted.iter().enumerate() {
        if let Some(n) = g.node_mut(v) {
            n.order = Some(i);
        }
    }
    layering[rank] = sorted;
}

pub fn assign_order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}

/// Renumbers `order` to `0..n` within each rank, keeping relative positions. Used once dummy
/// nodes are gone so real nodes are indexed without gaps.
pub fn compact(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let Some(max_rank) = crate::rank::max_rank(g) else {
        return;
    };
    let layering = build_layer_matrix(g, max_rank.max(0) as usize);
    assign_order(g, &layering);
}

/// Layers indexed by rank, each sorted by the nodes' current `order`.
pub fn build_layer_matrix(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    max_rank: usize,
) -> Vec<Vec<String>> {
    let mut layers: Vec<Vec<(usize, usize, String)>> = vec![Vec::new(); max_rank + 1];
    for (ix, v) in g.nodes().enumerate() {
        let Some(node) = g.node(v) else {
            continue;
        };
        let (Some(rank), Some(order)) = (node.rank, node.order) else {
            continue;
        };
        if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
            layer.push((order, ix, v.to_string()));
        }
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort();
            layer.into_iter().map(|(_, _, v)| v).collect()
        })
        .collect()
}
