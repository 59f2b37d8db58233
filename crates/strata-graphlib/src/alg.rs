//! Traversal helpers over [`Graph`].

use crate::Graph;

/// Strongly connected components with more than one node, plus self-looping nodes.
///
/// Each cycle lists its nodes in insertion order; cycles are sorted by their first node's
/// insertion position.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    // Tarjan over insertion positions, driven by an explicit frame stack so path length is not
    // bounded by the call stack.
    struct Frame {
        v: usize,
        succ: Vec<usize>,
        next: usize,
    }

    let ids: Vec<&str> = g.nodes().collect();
    let successors = |v: usize| -> Vec<usize> {
        g.successors(ids[v])
            .into_iter()
            .filter_map(|w| g.node_ix(w))
            .collect()
    };

    let n = ids.len();
    let mut next_index: usize = 0;
    let mut index: Vec<Option<usize>> = vec![None; n];
    let mut low: Vec<usize> = vec![0; n];
    let mut on_stack: Vec<bool> = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut found: Vec<Vec<usize>> = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();

    for root in 0..n {
        if index[root].is_some() {
            continue;
        }
        index[root] = Some(next_index);
        low[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push(Frame {
            v: root,
            succ: successors(root),
            next: 0,
        });

        while let Some(frame) = frames.last_mut() {
            let v = frame.v;
            if let Some(&w) = frame.succ.get(frame.next) {
                frame.next += 1;
                match index[w] {
                    None => {
                        index[w] = Some(next_index);
                        low[w] = next_index;
                        next_index += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        frames.push(Frame {
                            v: w,
                            succ: successors(w),
                            next: 0,
                        });
                    }
                    Some(w_index) if on_stack[w] => low[v] = low[v].min(w_index),
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(parent) = frames.last() {
                low[parent.v] = low[parent.v].min(low[v]);
            }
            if index[v] != Some(low[v]) {
                continue;
            }
            let mut members: Vec<usize> = Vec::new();
            while let Some(w) = stack.pop() {
                on_stack[w] = false;
                members.push(w);
                if w == v {
                    break;
                }
            }
            found.push(members);
        }
    }

    let mut cycles: Vec<Vec<usize>> = found
        .into_iter()
        .filter(|members| {
            members.len() > 1 || !g.out_edges(ids[members[0]], Some(ids[members[0]])).is_empty()
        })
        .map(|mut members| {
            members.sort_unstable();
            members
        })
        .collect();
    cycles.sort_unstable_by_key(|members| members[0]);
    cycles
        .into_iter()
        .map(|members| members.into_iter().map(|ix| ids[ix].to_string()).collect())
        .collect()
}
