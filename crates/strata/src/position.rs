//! Coordinate assignment in the internal top-to-bottom frame.
//!
//! `y` (layer axis) is fixed per rank: each rank owns a band as tall as its tallest node and
//! consecutive bands are `ranksep` apart. `x` (lane axis) starts packed left to right, then a
//! few alternating down/up passes pull every node toward the median of its neighbours in the
//! adjacent rank. Each pass solves the layer exactly as a weighted isotonic regression, so the
//! in-rank order and minimum separations are never violated.
//!
//! Both coordinates are node centres. The smallest left edge ends at `x = 0` and the first band
//! starts at `y = 0`; the canvas size is written to the graph label.

use crate::graphlib::Graph;
use crate::order::{Relationship, build_layer_matrix};
use crate::{EdgeLabel, GraphLabel, NodeLabel};

const ALIGN_PASSES: usize = 8;

/// Pull of a node that has no neighbours in the reference rank toward where it already is.
const FREE_NODE_WEIGHT: f64 = 0.1;

pub fn position(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let Some(max_rank) = crate::rank::max_rank(g) else {
        return;
    };
    let layering = build_layer_matrix(g, max_rank.max(0) as usize);
    let height = position_y(g, &layering);
    let width = position_x(g, &layering);

    let label = g.graph_mut();
    label.width = Some(width);
    label.height = Some(height);
}

fn position_y(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) -> f64 {
    let rank_sep = g.graph().ranksep;

    let mut tallest: f64 = 0.0;
    g.for_each_node(|_, n| {
        if !n.is_dummy() {
            tallest = tallest.max(n.height);
        }
    });

    let mut band_top: f64 = 0.0;
    let mut bottom: f64 = 0.0;
    for layer in layering {
        let mut band: f64 = 0.0;
        for v in layer {
            if let Some(n) = g.node(v) {
                band = band.max(n.height);
            }
        }
        // A rank made only of dummies still occupies a full band.
        if band == 0.0 {
            band = tallest;
        }
        for v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(band_top + band / 2.0);
            }
        }
        bottom = band_top + band;
        band_top += band + rank_sep;
    }
    bottom
}

fn position_x(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) -> f64 {
    // Initial packing.
    for layer in layering {
        let gaps = min_gaps(g, layer);
        let mut x: f64 = 0.0;
        for (i, v) in layer.iter().enumerate() {
            if i > 0 {
                x += gaps[i - 1];
            }
            if let Some(n) = g.node_mut(v) {
                n.x = Some(x);
            }
        }
    }

    let max_rank = layering.len().saturating_sub(1);
    for pass in 0..ALIGN_PASSES {
        if pass % 2 == 0 {
            for r in 1..=max_rank {
                align_layer(g, &layering[r], Relationship::InEdges);
            }
        } else {
            for r in (0..max_rank).rev() {
                align_layer(g, &layering[r], Relationship::OutEdges);
            }
        }
    }

    let mut min_left = f64::INFINITY;
    let mut max_right = f64::NEG_INFINITY;
    g.for_each_node(|_, n| {
        if let Some(x) = n.x {
            min_left = min_left.min(x - n.width / 2.0);
            max_right = max_right.max(x + n.width / 2.0);
        }
    });
    if !min_left.is_finite() {
        return 0.0;
    }
    g.for_each_node_mut(|_, n| {
        if let Some(x) = n.x.as_mut() {
            *x -= min_left;
        }
    });
    max_right - min_left
}

/// Minimum centre-to-centre distance between each pair of neighbours in `layer`.
fn min_gaps(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, layer: &[String]) -> Vec<f64> {
    let label = g.graph();
    let half = |v: &str| -> (f64, f64) {
        match g.node(v) {
            Some(n) if n.is_dummy() => (n.width / 2.0, label.edgesep / 2.0),
            Some(n) => (n.width / 2.0, label.nodesep / 2.0),
            None => (0.0, label.edgesep / 2.0),
        }
    };
    layer
        .windows(2)
        .map(|pair| {
            let (wa, sa) = half(&pair[0]);
            let (wb, sb) = half(&pair[1]);
            wa + sa + sb + wb
        })
        .collect()
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

fn align_layer(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layer: &[String],
    relationship: Relationship,
) {
    if layer.is_empty() {
        return;
    }
    let gaps = min_gaps(g, layer);

    let mut targets: Vec<f64> = Vec::with_capacity(layer.len());
    let mut weights: Vec<f64> = Vec::with_capacity(layer.len());
    let mut offset: f64 = 0.0;
    for (i, v) in layer.iter().enumerate() {
        if i > 0 {
            offset += gaps[i - 1];
        }
        let current = g.node(v).and_then(|n| n.x).unwrap_or(offset);
        let edges = match relationship {
            Relationship::InEdges => g.in_edges(v, None),
            Relationship::OutEdges => g.out_edges(v, None),
        };
        let mut xs: Vec<f64> = edges
            .iter()
            .filter(|e| !e.is_self_loop())
            .filter_map(|e| {
                let other = match relationship {
                    Relationship::InEdges => &e.v,
                    Relationship::OutEdges => &e.w,
                };
                g.node(other).and_then(|n| n.x)
            })
            .collect();
        let (target, weight) = match median(&mut xs) {
            Some(m) => (m, 1.0),
            None => (current, FREE_NODE_WEIGHT),
        };
        // Shift into the frame where the separation constraint is plain monotonicity.
        targets.push(target - offset);
        weights.push(weight);
    }

    let solved = isotonic(&targets, &weights);
    let mut offset: f64 = 0.0;
    for (i, v) in layer.iter().enumerate() {
        if i > 0 {
            offset += gaps[i - 1];
        }
        if let Some(n) = g.node_mut(v) {
            n.x = Some(solved[i] + offset);
        }
    }
}

/// Weighted least-squares fit of a non-decreasing sequence (pool adjacent violators).
fn isotonic(targets: &[f64], weights: &[f64]) -> Vec<f64> {
    struct Block {
        weighted_sum: f64,
        weight: f64,
        len: usize,
    }

    impl Block {
        fn mean(&self) -> f64 {
            self.weighted_sum / self.weight
        }
    }

    let mut blocks: Vec<Block> = Vec::with_capacity(targets.len());
    for (t, w) in targets.iter().zip(weights) {
        blocks.push(Block {
            weighted_sum: t * w,
            weight: *w,
            len: 1,
        });
        while blocks.len() >= 2 && blocks[blocks.len() - 2].mean() > blocks[blocks.len() - 1].mean()
        {
            let Some(last) = blocks.pop() else {
                break;
            };
            if let Some(prev) = blocks.last_mut() {
                prev.weighted_sum += last.weighted_sum;
                prev.weight += last.weight;
                prev.len += last.len;
            }
        }
    }

    let mut out: Vec<f64> = Vec::with_capacity(targets.len());
    for b in &blocks {
        let m = b.mean();
        out.extend(std::iter::repeat_n(m, b.len));
    }
    out
}
