//! Coordinate system adjustment.
//!
//! Ranking, ordering and positioning always work top-to-bottom. `undo` maps the result into
//! the requested [`RankDir`]: `BT`/`RL` mirror the layer axis inside the canvas, `LR`/`RL` swap
//! the axes so ranks advance along `x`.

use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel, RankDir};

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let rankdir = g.graph().rankdir;

    if matches!(rankdir, RankDir::BT | RankDir::RL) {
        let height = g.graph().height.unwrap_or(0.0);
        mirror_y(g, height);
    }

    if rankdir.is_horizontal() {
        swap_xy(g);
        let label = g.graph_mut();
        (label.width, label.height) = (label.height, label.width);
    }
}

fn mirror_y(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, height: f64) {
    g.for_each_node_mut(|_id, n| {
        if let Some(y) = n.y {
            n.y = Some(height - y);
        }
    });
    g.for_each_edge_mut(|_ek, e| {
        for p in &mut e.points {
            p.y = height - p.y;
        }
    });
}

fn swap_xy(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    g.for_each_node_mut(|_id, n| {
        if let (Some(x), Some(y)) = (n.x, n.y) {
            n.x = Some(y);
            n.y = Some(x);
        }
    });
    g.for_each_edge_mut(|_ek, e| {
        for p in &mut e.points {
            (p.x, p.y) = (p.y, p.x);
        }
    });
}
