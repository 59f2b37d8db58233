//! Normalize long edges by inserting dummy nodes.
//!
//! An edge `v -> w` with `rank(w) > rank(v) + 1` becomes a chain `v -> _d.. -> w` with one
//! zero-width dummy per intermediate rank, so ordering and positioning only ever see
//! rank-adjacent edges. `undo` turns the dummies back into bend points on the original edge.

use crate::graphlib::{EdgeKey, Graph};
use crate::{DummyKind, EdgeLabel, GraphLabel, NodeLabel, Point};
use rustc_hash::FxHashSet as HashSet;

/// Inserts a dummy under the first free `{prefix}{n}` id, resuming the scan at `*next`.
fn add_dummy_node(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    label: NodeLabel,
    prefix: &str,
    next: &mut usize,
) -> String {
    loop {
        let v = format!("{prefix}{next}");
        *next += 1;
        if !g.has_node(&v) {
            g.set_node(&v, label);
            return v;
        }
    }
}

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    g.graph_mut().dummy_chains.clear();
    let mut next_dummy = 0usize;
    for e in g.edge_keys() {
        normalize_edge(g, e, &mut next_dummy);
    }
    tracing::debug!(
        chains = g.graph().dummy_chains.len(),
        "normalized long edges"
    );
}

fn normalize_edge(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    e: EdgeKey,
    next_dummy: &mut usize,
) {
    if e.is_self_loop() {
        return;
    }
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    if w_rank <= v_rank + 1 {
        return;
    }

    let Some(mut edge_label) = g.remove_edge_key(&e) else {
        return;
    };
    edge_label.points.clear();
    let weight = edge_label.weight;

    let mut prev = e.v.clone();
    for r in (v_rank + 1)..w_rank {
        let dummy_id = add_dummy_node(
            g,
            NodeLabel {
                rank: Some(r),
                dummy: Some(DummyKind::Edge),
                edge_obj: Some(e.clone()),
                edge_label: (r == v_rank + 1).then(|| edge_label.clone()),
                ..Default::default()
            },
            "_d",
            next_dummy,
        );
        if r == v_rank + 1 {
            g.graph_mut().dummy_chains.push(dummy_id.clone());
        }

        g.set_edge_named(
            prev,
            dummy_id.clone(),
            e.name.clone(),
            Some(EdgeLabel {
                weight,
                ..Default::default()
            }),
        );
        prev = dummy_id;
    }

    g.set_edge_named(
        prev,
        e.w.clone(),
        e.name.clone(),
        Some(EdgeLabel {
            weight,
            ..Default::default()
        }),
    );
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let chains = std::mem::take(&mut g.graph_mut().dummy_chains);
    let mut dummies: HashSet<String> = HashSet::default();
    for start in chains {
        let Some(start_node) = g.node(&start) else {
            continue;
        };
        let (Some(mut orig_label), Some(orig_key)) =
            (start_node.edge_label.clone(), start_node.edge_obj.clone())
        else {
            continue;
        };

        let mut v = start;
        loop {
            let Some(node) = g.node(&v) else {
                break;
            };
            if node.dummy.is_none() {
                break;
            }
            if let (Some(x), Some(y)) = (node.x, node.y) {
                orig_label.points.push(Point { x, y });
            }
            let next = g.successors(&v).first().map(|s| s.to_string());
            dummies.insert(v);
            let Some(next) = next else {
                break;
            };
            v = next;
        }

        g.set_edge_key(orig_key, orig_label);
    }
    g.retain_nodes(|id, _| !dummies.contains(id));
}
