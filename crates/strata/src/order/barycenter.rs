//! Barycenter computation and the tie-stable layer sort.

use super::Relationship;
use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    /// Position of `v` in its layer before sorting.
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Weighted mean order of each node's neighbours in the fixed layer.
///
/// `InEdges` looks at predecessors (down sweep), `OutEdges` at successors (up sweep). Nodes
/// without such neighbours get `barycenter: None`. Self-loops are ignored.
pub fn barycenter(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layer: &[String],
    relationship: Relationship,
) -> Vec<BarycenterEntry> {
    layer
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let edges = match relationship {
                Relationship::InEdges => g.in_edges(v, None),
                Relationship::OutEdges => g.out_edges(v, None),
            };

            let mut sum: f64 = 0.0;
            let mut weight: f64 = 0.0;
            for e in edges.iter().filter(|e| !e.is_self_loop()) {
                let other = match relationship {
                    Relationship::InEdges => &e.v,
                    Relationship::OutEdges => &e.w,
                };
                let Some(order) = g.node(other).and_then(|n| n.order) else {
                    continue;
                };
                let edge_weight = g.edge_by_key(e).map(|l| l.weight).unwrap_or(1.0);
                sum += edge_weight * order as f64;
                weight += edge_weight;
            }

            if weight > 0.0 {
                BarycenterEntry {
                    v: v.clone(),
                    i,
                    barycenter: Some(sum / weight),
                    weight: Some(weight),
                }
            } else {
                BarycenterEntry {
                    v: v.clone(),
                    i,
                    barycenter: None,
                    weight: None,
                }
            }
        })
        .collect()
}

/// Sorts entries by barycenter; entries without one keep their original slot.
///
/// Equal barycenters keep their relative order, or invert it when `bias_right` is set, which
/// lets alternating sweeps try both resolutions of a tie.
pub fn sort(entries: &[BarycenterEntry], bias_right: bool) -> Vec<String> {
    let mut sortable: Vec<&BarycenterEntry> = Vec::new();
    let mut unsortable: Vec<&BarycenterEntry> = Vec::new();
    for entry in entries {
        if entry.barycenter.is_some() {
            sortable.push(entry);
        } else {
            unsortable.push(entry);
        }
    }

    // Pop from the back in ascending `i`.
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| {
        let a_bc = a.barycenter.unwrap_or(0.0);
        let b_bc = b.barycenter.unwrap_or(0.0);
        a_bc.total_cmp(&b_bc).then_with(|| {
            if bias_right {
                b.i.cmp(&a.i)
            } else {
                a.i.cmp(&b.i)
            }
        })
    });

    fn consume_unsortable(
        out: &mut Vec<String>,
        unsortable: &mut Vec<&BarycenterEntry>,
        mut index: usize,
    ) -> usize {
        while let Some(last) = unsortable.last() {
            if last.i > index {
                break;
            }
            out.push(last.v.clone());
            unsortable.pop();
            index += 1;
        }
        index
    }

    let mut out: Vec<String> = Vec::with_capacity(entries.len());
    let mut vs_index = consume_unsortable(&mut out, &mut unsortable, 0);
    for entry in sortable {
        out.push(entry.v.clone());
        vs_index += 1;
        vs_index = consume_unsortable(&mut out, &mut unsortable, vs_index);
    }
    // Slots past the end of the sortable run.
    while let Some(last) = unsortable.pop() {
        out.push(last.v.clone());
    }
    out
}
