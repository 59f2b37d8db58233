//! Rank assignment.
//!
//! Expects an acyclic graph apart from self-loops (see `acyclic::run`). Every node ends up at
//! the longest-path distance from a source, so `rank(w) >= rank(v) + minlen` holds for every
//! non-loop edge `v -> w` and sources sit at rank 0.

use crate::graphlib::{EdgeKey, Graph};
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use std::collections::VecDeque;

pub fn rank(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    longest_path(g);
    normalize_ranks(g);
}

/// Assigns `rank(v) = max(rank(u) + minlen)` over in-edges, visiting nodes in a Kahn
/// topological order seeded in insertion order.
pub fn longest_path(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let ids = g.node_ids();
    let mut indegree: Vec<usize> = ids
        .iter()
        .map(|v| {
            g.in_edges(v, None)
                .iter()
                .filter(|e| !e.is_self_loop())
                .count()
        })
        .collect();

    let mut queue: VecDeque<usize> = indegree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(ix, _)| ix)
        .collect();
    let mut topo: Vec<usize> = Vec::with_capacity(ids.len());
    let mut queued: Vec<bool> = indegree.iter().map(|d| *d == 0).collect();

    while let Some(ix) = queue.pop_front() {
        topo.push(ix);
        for e in g.out_edges(&ids[ix], None) {
            if e.is_self_loop() {
                continue;
            }
            let Some(w_ix) = g.node_ix(&e.w) else {
                continue;
            };
            indegree[w_ix] = indegree[w_ix].saturating_sub(1);
            if indegree[w_ix] == 0 && !queued[w_ix] {
                queued[w_ix] = true;
                queue.push_back(w_ix);
            }
        }
    }

    if topo.len() != ids.len() {
        // Only reachable when a cycle survived `acyclic::run`; rank the rest in insertion order
        // so layout still terminates.
        tracing::error!(
            ranked = topo.len(),
            total = ids.len(),
            "rank assignment found a residual cycle"
        );
        topo.extend((0..ids.len()).filter(|ix| !queued[*ix]));
    }

    let mut ranks: Vec<Option<i32>> = vec![None; ids.len()];
    for &ix in &topo {
        let mut rank = 0i32;
        for e in g.in_edges(&ids[ix], None) {
            if e.is_self_loop() {
                continue;
            }
            let Some(u_rank) = g.node_ix(&e.v).and_then(|u| ranks[u]) else {
                continue;
            };
            let minlen = g.edge_by_key(&e).map(|l| l.minlen as i32).unwrap_or(1);
            rank = rank.max(u_rank + minlen);
        }
        ranks[ix] = Some(rank);
    }

    for (ix, v) in ids.iter().enumerate() {
        if let Some(label) = g.node_mut(v) {
            label.rank = ranks[ix];
        }
    }
}

/// Shifts ranks so the smallest is 0.
pub fn normalize_ranks(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut min_rank: Option<i32> = None;
    g.for_each_node(|_, n| {
        if let Some(r) = n.rank {
            min_rank = Some(min_rank.map_or(r, |m| m.min(r)));
        }
    });
    let Some(min_rank) = min_rank else {
        return;
    };
    g.for_each_node_mut(|_, n| {
        if let Some(r) = n.rank.as_mut() {
            *r -= min_rank;
        }
    });
}

/// Rank distance beyond `minlen` an edge spans; 0 means the edge is tight.
pub fn slack(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, e: &EdgeKey) -> i32 {
    // Missing nodes/ranks count as `0` so callers on partial graphs don't panic.
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let minlen: i32 = g.edge_by_key(e).map(|lbl| lbl.minlen as i32).unwrap_or(1);
    w_rank - v_rank - minlen
}

/// Highest assigned rank, if any node has one.
pub fn max_rank(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Option<i32> {
    let mut out: Option<i32> = None;
    g.for_each_node(|_, n| {
        if let Some(r) = n.rank {
            out = Some(out.map_or(r, |m| m.max(r)));
        }
    });
    out
}
