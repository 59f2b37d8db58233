//! Property tests for the full layout pipeline on random small multigraphs.
//!
//! Checked for every input:
//!
//! 1. Every node gets a rank and an in-rank order; orders in a rank are `0..n`.
//! 2. Every non-feedback edge advances at least one rank.
//! 3. Nodes sharing a rank never overlap and keep `nodesep` between them.
//! 4. Every input edge survives with its name.
//! 5. Running twice gives identical coordinates.

use proptest::prelude::*;
use rustc_hash::FxHashMap;
use strata::{GraphLabel, LayoutGraph, NodeLabel, RankDir, acyclic, layout, new_layout_graph};

const NODE_WIDTH: f64 = 180.0;
const NODE_HEIGHT: f64 = 80.0;

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n), 0..24),
        )
    })
}

fn build(n: usize, edges: &[(usize, usize)], rankdir: RankDir) -> LayoutGraph {
    let mut g = new_layout_graph(GraphLabel {
        rankdir,
        ..Default::default()
    });
    for i in 0..n {
        g.set_node(format!("n{i}"), NodeLabel::sized(NODE_WIDTH, NODE_HEIGHT));
    }
    for (i, (v, w)) in edges.iter().enumerate() {
        g.set_edge_named(format!("n{v}"), format!("n{w}"), Some(format!("e{i}")), None);
    }
    g
}

proptest! {
    #[test]
    fn layout_assigns_dense_orders_per_rank((n, edges) in graph_strategy()) {
        let mut g = build(n, &edges, RankDir::TB);
        layout(&mut g);

        let mut by_rank: FxHashMap<i32, Vec<usize>> = FxHashMap::default();
        for v in g.nodes() {
            let node = g.node(v).unwrap();
            prop_assert!(node.rank.is_some_and(|r| r >= 0), "{v} has no rank");
            prop_assert!(node.order.is_some(), "{v} has no order");
            by_rank.entry(node.rank.unwrap()).or_default().push(node.order.unwrap());
        }
        for (rank, mut orders) in by_rank {
            orders.sort_unstable();
            let expected: Vec<usize> = (0..orders.len()).collect();
            prop_assert_eq!(orders, expected, "rank {} has gaps", rank);
        }
    }

    #[test]
    fn layout_advances_rank_along_every_forward_edge((n, edges) in graph_strategy()) {
        let mut g = build(n, &edges, RankDir::LR);
        layout(&mut g);

        for e in g.edges() {
            let label = g.edge_by_key(e).unwrap();
            if acyclic::is_feedback(e, label) {
                continue;
            }
            let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap();
            let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap();
            prop_assert!(w_rank > v_rank, "{:?}: {} -> {}", e, v_rank, w_rank);
        }
    }

    #[test]
    fn layout_keeps_nodes_in_a_rank_apart((n, edges) in graph_strategy()) {
        let mut g = build(n, &edges, RankDir::TB);
        layout(&mut g);

        let nodesep = g.graph().nodesep;
        let mut by_rank: FxHashMap<i32, Vec<(usize, f64)>> = FxHashMap::default();
        for v in g.nodes() {
            let node = g.node(v).unwrap();
            by_rank
                .entry(node.rank.unwrap())
                .or_default()
                .push((node.order.unwrap(), node.x.unwrap()));
        }
        for (_, mut layer) in by_rank {
            layer.sort_by_key(|(order, _)| *order);
            for pair in layer.windows(2) {
                prop_assert!(
                    pair[1].1 - pair[0].1 >= NODE_WIDTH + nodesep - 1e-6,
                    "overlap: {:?}",
                    pair
                );
            }
        }
    }

    #[test]
    fn layout_keeps_every_edge((n, edges) in graph_strategy()) {
        let mut g = build(n, &edges, RankDir::LR);
        layout(&mut g);

        prop_assert_eq!(g.node_count(), n);
        prop_assert_eq!(g.edge_count(), edges.len());
        for (i, (v, w)) in edges.iter().enumerate() {
            let name = format!("e{i}");
            let (v_name, w_name) = (format!("n{v}"), format!("n{w}"));
            prop_assert!(g.has_edge(&v_name, &w_name, Some(&name)));
        }
    }

    #[test]
    fn layout_is_repeatable((n, edges) in graph_strategy()) {
        let mut first = build(n, &edges, RankDir::LR);
        let mut second = build(n, &edges, RankDir::LR);
        let a = layout(&mut first);
        let b = layout(&mut second);
        prop_assert_eq!(a, b);
        for v in first.nodes() {
            prop_assert_eq!(first.node(v), second.node(v));
        }
    }
}
