use strata::order::{
    BarycenterEntry, OrderOptions, Relationship, barycenter, build_layer_matrix, compact,
    init_order, order, sort,
};
use strata::{GraphLabel, LayoutGraph, NodeLabel, new_layout_graph};

fn new_graph() -> LayoutGraph {
    new_layout_graph(GraphLabel::default())
}

fn at(rank: i32, order: Option<usize>) -> NodeLabel {
    NodeLabel {
        rank: Some(rank),
        order,
        ..Default::default()
    }
}

fn entry(v: &str, i: usize, barycenter: Option<f64>) -> BarycenterEntry {
    BarycenterEntry {
        v: v.to_string(),
        i,
        barycenter,
        weight: barycenter.map(|_| 1.0),
    }
}

#[test]
fn sort_orders_entries_by_barycenter() {
    let entries = vec![entry("a", 0, Some(2.0)), entry("b", 1, Some(1.0))];
    assert_eq!(sort(&entries, false), vec!["b", "a"]);
}

#[test]
fn sort_keeps_unsortable_entries_in_their_slot() {
    let entries = vec![
        entry("a", 0, Some(2.0)),
        entry("b", 1, None),
        entry("c", 2, Some(1.0)),
    ];
    assert_eq!(sort(&entries, false), vec!["c", "b", "a"]);
}

#[test]
fn sort_resolves_ties_by_original_position_or_bias() {
    let entries = vec![entry("a", 0, Some(1.0)), entry("b", 1, Some(1.0))];
    assert_eq!(sort(&entries, false), vec!["a", "b"]);
    assert_eq!(sort(&entries, true), vec!["b", "a"]);
}

#[test]
fn barycenter_averages_neighbour_orders() {
    let mut g = new_graph();
    g.set_node("a", at(0, Some(0)));
    g.set_node("b", at(0, Some(1)));
    g.set_node("c", at(1, Some(0)));
    g.set_node("d", at(1, Some(1)));
    g.set_edge("a", "c");
    g.set_edge("b", "c");

    let entries = barycenter(
        &g,
        &["c".to_string(), "d".to_string()],
        Relationship::InEdges,
    );
    assert_eq!(entries[0].barycenter, Some(0.5));
    assert_eq!(entries[0].weight, Some(2.0));
    assert_eq!(entries[1].barycenter, None);

    let up = barycenter(&g, &["b".to_string()], Relationship::OutEdges);
    assert_eq!(up[0].barycenter, Some(0.0));
}

#[test]
fn barycenter_ignores_self_loops() {
    let mut g = new_graph();
    g.set_node("a", at(0, Some(3)));
    g.set_edge("a", "a");

    let entries = barycenter(&g, &["a".to_string()], Relationship::InEdges);
    assert_eq!(entries[0].barycenter, None);
}

#[test]
fn init_order_follows_dfs_from_lowest_ranks() {
    let mut g = new_graph();
    g.set_node("a", at(0, None));
    g.set_node("b", at(0, None));
    g.set_node("c", at(1, None));
    g.set_node("d", at(1, None));
    g.set_edge("a", "d");
    g.set_edge("b", "c");

    let layering = init_order(&g);
    assert_eq!(layering, vec![vec!["a", "b"], vec!["d", "c"]]);
}

#[test]
fn order_removes_an_avoidable_crossing() {
    let mut g = new_graph();
    g.set_node("a", at(0, None));
    g.set_node("b", at(0, None));
    g.set_node("c", at(1, None));
    g.set_node("d", at(1, None));
    g.set_edge("a", "c");
    g.set_edge("a", "d");
    g.set_edge("b", "c");

    let cc = order(&mut g, OrderOptions::default());
    assert_eq!(cc, 0.0);
    assert_eq!(g.node("b").unwrap().order, Some(0));
    assert_eq!(g.node("a").unwrap().order, Some(1));
    assert_eq!(
        build_layer_matrix(&g, 1),
        vec![vec!["b", "a"], vec!["c", "d"]]
    );
}

#[test]
fn order_keeps_dfs_layering_when_heuristic_is_disabled() {
    let mut g = new_graph();
    g.set_node("a", at(0, None));
    g.set_node("b", at(0, None));
    g.set_node("c", at(1, None));
    g.set_node("d", at(1, None));
    g.set_edge("a", "c");
    g.set_edge("a", "d");
    g.set_edge("b", "c");

    let cc = order(
        &mut g,
        OrderOptions {
            disable_optimal_order_heuristic: true,
        },
    );
    assert_eq!(cc, 1.0);
    assert_eq!(g.node("a").unwrap().order, Some(0));
}

#[test]
fn order_gives_every_node_a_unique_slot_in_its_rank() {
    let mut g = new_graph();
    for (v, r) in [("a", 0), ("b", 0), ("c", 0), ("d", 1), ("e", 1), ("f", 1)] {
        g.set_node(v, at(r, None));
    }
    g.set_edge("a", "f");
    g.set_edge("b", "e");
    g.set_edge("c", "d");

    let cc = order(&mut g, OrderOptions::default());
    assert_eq!(cc, 0.0);
    for layer in build_layer_matrix(&g, 1) {
        let orders: Vec<usize> = layer
            .iter()
            .filter_map(|v| g.node(v).and_then(|n| n.order))
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }
}

#[test]
fn compact_closes_gaps_left_by_removed_nodes() {
    let mut g = new_graph();
    g.set_node("a", at(0, Some(0)));
    g.set_node("b", at(0, Some(2)));
    g.set_node("c", at(1, Some(5)));

    compact(&mut g);
    assert_eq!(g.node("a").unwrap().order, Some(0));
    assert_eq!(g.node("b").unwrap().order, Some(1));
    assert_eq!(g.node("c").unwrap().order, Some(0));
}
