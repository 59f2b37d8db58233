use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashSet as HashSet;

/// Initial layering: a DFS from nodes sorted by `(rank, insertion index)`, appending each node
/// to its rank's layer when first reached. Nodes connected through a path therefore start out
/// roughly aligned.
pub fn init_order(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<Vec<String>> {
    let Some(max_rank) = crate::rank::max_rank(g) else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); (max_rank + 1).max(0) as usize];

    let mut start: Vec<(i32, usize, String)> = Vec::new();
    for (ix, v) in g.nodes().enumerate() {
        if let Some(rank) = g.node(v).and_then(|n| n.rank) {
            start.push((rank, ix, v.to_string()));
        }
    }
    start.sort();

    let mut visited: HashSet<String> = HashSet::default();
    let mut stack: Vec<String> = Vec::new();
    for (_, _, root) in start {
        stack.push(root);
        while let Some(v) = stack.pop() {
            if !visited.insert(v.clone()) {
                continue;
            }
            if let Some(rank) = g.node(&v).and_then(|n| n.rank) {
                if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
                    layer.push(v.clone());
                }
            }
            // Reverse so the first successor is visited first.
            for w in g.successors(&v).into_iter().rev() {
                if !visited.contains(w) {
                    stack.push(w.to_string());
                }
            }
        }
    }

    layers
}
