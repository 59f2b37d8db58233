use strata::{GraphLabel, LayoutGraph, NodeLabel, RankDir, layout, new_layout_graph};

fn new_graph(rankdir: RankDir) -> LayoutGraph {
    new_layout_graph(GraphLabel {
        rankdir,
        ..Default::default()
    })
}

fn add_nodes(g: &mut LayoutGraph, ids: &[&str]) {
    for id in ids {
        g.set_node(*id, NodeLabel::sized(180.0, 80.0));
    }
}

type Snapshot = Vec<(String, Option<i32>, Option<usize>, Option<f64>, Option<f64>)>;

fn snapshot(g: &LayoutGraph) -> Snapshot {
    g.nodes()
        .map(|v| {
            let n = g.node(v).unwrap();
            (v.to_string(), n.rank, n.order, n.x, n.y)
        })
        .collect()
}

fn xy(g: &LayoutGraph, v: &str) -> (f64, f64) {
    let n = g.node(v).unwrap();
    (n.x.unwrap(), n.y.unwrap())
}

#[test]
fn layout_can_layout_an_empty_graph() {
    let mut g = new_graph(RankDir::LR);
    let stats = layout(&mut g);
    assert_eq!(stats.ranks, 0);
    assert_eq!(g.graph().width, Some(0.0));
    assert_eq!(g.graph().height, Some(0.0));
}

#[test]
fn layout_can_layout_a_single_node() {
    let mut g = new_graph(RankDir::TB);
    add_nodes(&mut g, &["a"]);
    layout(&mut g);
    assert_eq!(xy(&g, "a"), (90.0, 40.0));
    assert_eq!(g.node("a").unwrap().rank, Some(0));
    assert_eq!(g.node("a").unwrap().order, Some(0));
}

#[test]
fn layout_advances_ranks_along_x_for_lr() {
    let mut g = new_graph(RankDir::LR);
    add_nodes(&mut g, &["a", "b", "c"]);
    g.set_path(&["a", "b", "c"]);

    let stats = layout(&mut g);
    assert_eq!(stats.ranks, 3);
    assert_eq!(stats.crossings, 0.0);
    assert_eq!(stats.feedback_edges, 0);
    assert_eq!(xy(&g, "a"), (40.0, 90.0));
    assert_eq!(xy(&g, "b"), (220.0, 90.0));
    assert_eq!(xy(&g, "c"), (400.0, 90.0));
    assert_eq!(g.graph().width, Some(440.0));
    assert_eq!(g.graph().height, Some(180.0));
}

#[test]
fn layout_advances_ranks_along_y_for_tb() {
    let mut g = new_graph(RankDir::TB);
    add_nodes(&mut g, &["a", "b"]);
    g.set_edge("a", "b");

    layout(&mut g);
    assert_eq!(xy(&g, "a"), (90.0, 40.0));
    assert_eq!(xy(&g, "b"), (90.0, 220.0));
}

#[test]
fn layout_places_sources_last_for_bt() {
    let mut g = new_graph(RankDir::BT);
    add_nodes(&mut g, &["a", "b"]);
    g.set_edge("a", "b");

    layout(&mut g);
    assert!(xy(&g, "a").1 > xy(&g, "b").1);
}

#[test]
fn layout_adds_bend_points_to_long_edges() {
    let mut g = new_graph(RankDir::LR);
    add_nodes(&mut g, &["a", "b", "c"]);
    g.set_path(&["a", "b", "c"]);
    g.set_edge("a", "c");

    let stats = layout(&mut g);
    assert_eq!(stats.dummy_nodes, 1);
    assert_eq!(g.node_count(), 3);
    let points = &g.edge("a", "c", None).unwrap().points;
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].x, 220.0);
    assert!(g.edge("a", "b", None).unwrap().points.is_empty());
}

#[test]
fn layout_breaks_a_two_cycle_into_distinct_ranks() {
    let mut g = new_graph(RankDir::LR);
    add_nodes(&mut g, &["a", "b"]);
    g.set_edge_named("a", "b", Some("e0"), None);
    g.set_edge_named("b", "a", Some("e1"), None);

    let stats = layout(&mut g);
    assert_eq!(stats.feedback_edges, 1);
    assert_eq!(g.node("a").unwrap().rank, Some(0));
    assert_eq!(g.node("b").unwrap().rank, Some(1));

    assert_eq!(g.edge_count(), 2);
    let back = g.edge("b", "a", Some("e1")).unwrap();
    assert!(back.feedback);
    assert!(!back.reversed);
    assert!(!g.edge("a", "b", Some("e0")).unwrap().feedback);
}

#[test]
fn layout_keeps_self_loops_and_parallel_edges() {
    let mut g = new_graph(RankDir::LR);
    add_nodes(&mut g, &["a", "b"]);
    g.set_edge_named("a", "a", Some("e0"), None);
    g.set_edge_named("a", "b", Some("e1"), None);
    g.set_edge_named("a", "b", Some("e2"), None);

    let stats = layout(&mut g);
    assert_eq!(stats.feedback_edges, 0);
    assert_eq!(g.edge_count(), 3);
    assert!(g.has_edge("a", "a", Some("e0")));
    assert_eq!(g.node("b").unwrap().rank, Some(1));
}

#[test]
fn layout_is_deterministic() {
    fn build() -> LayoutGraph {
        let mut g = new_graph(RankDir::LR);
        add_nodes(&mut g, &["a", "b", "c", "d", "e", "f", "g"]);
        for (i, (v, w)) in [
            ("a", "b"),
            ("a", "c"),
            ("b", "d"),
            ("c", "d"),
            ("d", "a"),
            ("e", "f"),
            ("a", "f"),
            ("g", "g"),
            ("c", "e"),
        ]
        .into_iter()
        .enumerate()
        {
            g.set_edge_named(v, w, Some(format!("e{i}")), None);
        }
        g
    }

    let mut first = build();
    let mut second = build();
    let s1 = layout(&mut first);
    let s2 = layout(&mut second);
    assert_eq!(s1, s2);
    assert_eq!(snapshot(&first), snapshot(&second));
}
