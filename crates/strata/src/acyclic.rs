//! Break cycles by reversing a feedback arc set (FAS).
//!
//! The FAS comes from a depth-first search in node insertion order: an edge that reaches a node
//! still on the DFS stack closes a cycle and is reversed. Self-loops never join the FAS since
//! reversing them cannot help; later phases ignore them.

use crate::graphlib::{EdgeKey, Graph};
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashSet as HashSet;

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let fas = dfs_fas(g);
    tracing::debug!(feedback_edges = fas.len(), "breaking cycles");

    for e in fas {
        let Some(mut label) = g.remove_edge_key(&e) else {
            continue;
        };
        label.forward_name = e.name.clone();
        label.reversed = true;
        label.feedback = true;

        let name = unique_rev_name(g, &e.w, &e.v);
        g.set_edge_named(e.w, e.v, Some(name), Some(label));
    }
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for e in g.edge_keys() {
        let is_reversed = g.edge_by_key(&e).is_some_and(|l| l.reversed);
        if !is_reversed {
            continue;
        }
        let Some(mut label) = g.remove_edge_key(&e) else {
            continue;
        };
        let forward_name = label.forward_name.take();
        label.reversed = false;
        label.points.reverse();
        g.set_edge_named(e.w, e.v, forward_name, Some(label));
    }
}

/// Whether the edge was excluded from rank ordering: a broken cycle edge or a self-loop.
pub fn is_feedback(e: &EdgeKey, label: &EdgeLabel) -> bool {
    label.feedback || e.is_self_loop()
}

fn unique_rev_name(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str, w: &str) -> String {
    let mut i = 1usize;
    loop {
        let candidate = format!("rev{i}");
        if !g.has_edge(v, w, Some(&candidate)) {
            return candidate;
        }
        i += 1;
    }
}

pub fn dfs_fas(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<EdgeKey> {
    // Explicit stack so long paths cannot exhaust the call stack.
    struct Frame {
        v: String,
        out: Vec<EdgeKey>,
        next: usize,
    }

    let mut fas: Vec<EdgeKey> = Vec::new();
    let mut on_stack: HashSet<String> = HashSet::default();
    let mut visited: HashSet<String> = HashSet::default();
    let mut frames: Vec<Frame> = Vec::new();

    for root in g.nodes() {
        if !visited.insert(root.to_string()) {
            continue;
        }
        on_stack.insert(root.to_string());
        frames.push(Frame {
            v: root.to_string(),
            out: g.out_edges(root, None),
            next: 0,
        });

        while let Some(frame) = frames.last_mut() {
            let Some(e) = frame.out.get(frame.next).cloned() else {
                on_stack.remove(&frame.v);
                frames.pop();
                continue;
            };
            frame.next += 1;

            if e.is_self_loop() {
                continue;
            }
            if on_stack.contains(&e.w) {
                fas.push(e);
            } else if visited.insert(e.w.clone()) {
                on_stack.insert(e.w.clone());
                let out = g.out_edges(&e.w, None);
                frames.push(Frame {
                    v: e.w,
                    out,
                    next: 0,
                });
            }
        }
    }
    fas
}
