//! Layout entrypoint.
//!
//! Phases run in a fixed order over one graph; each reads only what earlier phases wrote into
//! node/edge labels, so the whole call is a pure function of the input graph and its
//! [`GraphLabel`].

use crate::graphlib::Graph;
use crate::order::OrderOptions;
use crate::{
    EdgeLabel, GraphLabel, NodeLabel, acyclic, coordinate_system, normalize, order, position, rank,
};

/// Counters gathered while laying out a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutStats {
    pub ranks: usize,
    pub dummy_nodes: usize,
    pub feedback_edges: usize,
    /// Weighted crossings between adjacent ranks, dummies included.
    pub crossings: f64,
}

pub fn layout(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> LayoutStats {
    layout_with_options(g, OrderOptions::default())
}

pub fn layout_with_options(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    order_options: OrderOptions,
) -> LayoutStats {
    let mut stats = LayoutStats::default();
    if g.node_count() == 0 {
        let label = g.graph_mut();
        label.width = Some(0.0);
        label.height = Some(0.0);
        return stats;
    }

    acyclic::run(g);
    stats.feedback_edges = g
        .edges()
        .filter(|e| g.edge_by_key(e).is_some_and(|l| l.reversed))
        .count();

    rank::rank(g);
    stats.ranks = rank::max_rank(g).map_or(0, |r| r as usize + 1);

    let before = g.node_count();
    normalize::run(g);
    stats.dummy_nodes = g.node_count() - before;

    stats.crossings = order::order(g, order_options);
    position::position(g);

    normalize::undo(g);
    order::compact(g);
    acyclic::undo(g);
    coordinate_system::undo(g);

    tracing::debug!(
        ranks = stats.ranks,
        dummy_nodes = stats.dummy_nodes,
        feedback_edges = stats.feedback_edges,
        crossings = stats.crossings,
        "layout finished"
    );
    stats
}
