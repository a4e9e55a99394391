use trailmap::{
    Direction, Edge, Graph, LayoutOptions, LayoutResult, Node, NodeKind, RankAlignment, layout,
};

fn rect(id: &str) -> Node {
    Node::new(id, NodeKind::Rectangle)
}

fn top_left(result: &LayoutResult, id: &str) -> (f64, f64) {
    let n = result.get(id).unwrap();
    (n.x, n.y)
}

#[test]
fn layout_of_an_empty_graph_is_empty() {
    let result = layout(&Graph::default(), Direction::TB, &LayoutOptions::default());
    assert!(result.is_empty());
    assert_eq!((result.width, result.height), (0.0, 0.0));
    assert!(result.report.is_clean());
}

#[test]
fn layout_can_layout_a_single_node() {
    let g = Graph::new(vec![rect("a")], vec![]);
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    let a = result.get("a").unwrap();
    assert_eq!((a.x, a.y, a.width, a.height), (0.0, 0.0, 256.0, 100.0));
    assert_eq!((a.rank, a.order), (0, 0));
    assert_eq!((result.width, result.height), (256.0, 100.0));
}

#[test]
fn layout_stacks_a_chain_top_to_bottom() {
    let g = Graph::new(vec![rect("a"), rect("b")], vec![Edge::new("e1", "a", "b")]);
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(top_left(&result, "a"), (0.0, 0.0));
    assert_eq!(top_left(&result, "b"), (0.0, 150.0));
    assert_eq!(result.get("b").unwrap().rank, 1);
    assert_eq!((result.width, result.height), (256.0, 250.0));
}

#[test]
fn layout_left_to_right_swaps_the_rank_axis() {
    let g = Graph::new(vec![rect("a"), rect("b")], vec![Edge::new("e1", "a", "b")]);
    let result = layout(&g, Direction::LR, &LayoutOptions::default());
    assert_eq!(top_left(&result, "a"), (0.0, 0.0));
    assert_eq!(top_left(&result, "b"), (306.0, 0.0));
    // Sizes stay as declared; only the axes swap roles.
    assert_eq!(result.get("b").unwrap().width, 256.0);
    assert_eq!((result.width, result.height), (562.0, 100.0));
}

#[test]
fn layout_centers_a_narrow_rank_on_the_widest_one() {
    let g = Graph::new(
        vec![rect("a"), rect("b"), rect("c")],
        vec![Edge::new("e1", "a", "b"), Edge::new("e2", "a", "c")],
    );
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(top_left(&result, "a"), (153.0, 0.0));
    assert_eq!(top_left(&result, "b"), (0.0, 150.0));
    assert_eq!(top_left(&result, "c"), (306.0, 150.0));
}

#[test]
fn layout_start_alignment_keeps_ranks_at_the_origin() {
    let g = Graph::new(
        vec![rect("a"), rect("b"), rect("c")],
        vec![Edge::new("e1", "a", "b"), Edge::new("e2", "a", "c")],
    );
    let opts = LayoutOptions {
        rank_alignment: RankAlignment::Start,
        ..Default::default()
    };
    let result = layout(&g, Direction::TB, &opts);
    assert_eq!(top_left(&result, "a"), (0.0, 0.0));
}

#[test]
fn layout_uses_the_configured_separations() {
    let g = Graph::new(
        vec![rect("a"), rect("b"), rect("c")],
        vec![Edge::new("e1", "a", "b"), Edge::new("e2", "a", "c")],
    );
    let opts = LayoutOptions {
        node_separation: 10.0,
        rank_separation: 300.0,
        ..Default::default()
    };
    let result = layout(&g, Direction::TB, &opts);
    assert_eq!(top_left(&result, "b"), (0.0, 400.0));
    assert_eq!(top_left(&result, "c"), (266.0, 400.0));
}

#[test]
fn layout_composes_disconnected_components_along_the_cross_axis() {
    let g = Graph::new(vec![rect("a"), rect("b")], vec![]);
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(top_left(&result, "a"), (0.0, 0.0));
    assert_eq!(top_left(&result, "b"), (306.0, 0.0));
    assert_eq!(result.get("b").unwrap().rank, 0);
    assert_eq!(result.get("b").unwrap().order, 1);
}

#[test]
fn layout_reserves_space_per_node_type() {
    let g = Graph::new(
        vec![
            Node::new("q", NodeKind::QuizCard),
            Node::new("d", NodeKind::Diamond),
        ],
        vec![Edge::new("e1", "q", "d")],
    );
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    let q = result.get("q").unwrap();
    let d = result.get("d").unwrap();
    assert_eq!((q.width, q.height), (320.0, 400.0));
    assert_eq!((d.width, d.height), (192.0, 192.0));
    assert_eq!(d.y, 450.0);
    assert_eq!(d.x, 64.0);
}

#[test]
fn layout_drops_dangling_edges() {
    let g = Graph::new(vec![rect("a")], vec![Edge::new("e1", "a", "ghost")]);
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(result.len(), 1);
    assert_eq!(result.report.dropped_edges, vec!["e1".to_string()]);
}

#[test]
fn layout_breaks_cycles_deterministically() {
    let g = Graph::new(
        vec![rect("a"), rect("b"), rect("c")],
        vec![
            Edge::new("e1", "a", "b"),
            Edge::new("e2", "b", "c"),
            Edge::new("e3", "c", "a"),
        ],
    );
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(result.report.reversed_edges, vec!["e3".to_string()]);
    let ranks: Vec<usize> = ["a", "b", "c"]
        .iter()
        .map(|id| result.get(id).unwrap().rank)
        .collect();
    assert_eq!(ranks, vec![0, 1, 2]);
}

#[test]
fn layout_ignores_self_loops_for_ranking() {
    let g = Graph::new(
        vec![rect("a"), rect("b")],
        vec![Edge::new("loop", "a", "a"), Edge::new("e1", "a", "b")],
    );
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(result.report.self_loops, vec!["loop".to_string()]);
    assert!(result.report.reversed_edges.is_empty());
    assert_eq!(result.get("b").unwrap().rank, 1);
}

#[test]
fn layout_places_group_children_relative_to_the_group() {
    let g = Graph::new(
        vec![
            rect("x"),
            Node::new("g", NodeKind::Group),
            rect("c1").with_parent("g"),
            rect("c2").with_parent("g"),
        ],
        vec![Edge::new("e1", "x", "c1"), Edge::new("e2", "c1", "c2")],
    );
    let result = layout(&g, Direction::TB, &LayoutOptions::default());

    let group = result.get("g").unwrap();
    assert_eq!((group.width, group.height), (400.0, 300.0));
    assert_eq!((group.x, group.y, group.rank), (0.0, 150.0, 1));
    assert_eq!(top_left(&result, "x"), (72.0, 0.0));

    let c2 = result.get("c2").unwrap();
    assert_eq!(c2.parent.as_deref(), Some("g"));
    assert_eq!((c2.x, c2.y, c2.rank), (24.0, 174.0, 1));

    let abs = result.absolute_rect("c2").unwrap();
    assert_eq!((abs.x, abs.y), (24.0, 324.0));
}

#[test]
fn layout_grows_a_group_to_fit_its_children() {
    let g = Graph::new(
        vec![
            Node::new("g", NodeKind::Group).with_size(100.0, 100.0),
            rect("a").with_parent("g"),
            rect("b").with_parent("g"),
        ],
        vec![],
    );
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    let group = result.get("g").unwrap();
    assert_eq!((group.width, group.height), (610.0, 148.0));
    assert_eq!(top_left(&result, "b"), (330.0, 24.0));
}

#[test]
fn layout_ignores_edges_into_the_own_group() {
    let g = Graph::new(
        vec![Node::new("g", NodeKind::Group), rect("c").with_parent("g")],
        vec![Edge::new("e1", "g", "c")],
    );
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(result.report.ignored_edges, vec!["e1".to_string()]);
}

#[test]
fn layout_detaches_nodes_with_a_missing_parent() {
    let g = Graph::new(vec![rect("a").with_parent("nowhere"), rect("b")], vec![]);
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(result.report.detached_nodes, vec!["a".to_string()]);
    assert_eq!(result.get("a").unwrap().parent, None);
}

#[test]
fn layout_breaks_containment_cycles() {
    let g = Graph::new(
        vec![rect("a").with_parent("b"), rect("b").with_parent("a")],
        vec![],
    );
    let result = layout(&g, Direction::TB, &LayoutOptions::default());
    assert_eq!(result.report.detached_nodes, vec!["a".to_string()]);
    assert_eq!(result.get("b").unwrap().parent.as_deref(), Some("a"));
}

#[test]
fn layout_sanitizes_invalid_options() {
    let g = Graph::new(vec![rect("a"), rect("b")], vec![]);
    let opts = LayoutOptions {
        node_separation: f64::NAN,
        ..Default::default()
    };
    let result = layout(&g, Direction::TB, &opts);
    assert_eq!(top_left(&result, "b"), (306.0, 0.0));
}

#[test]
fn layout_is_deterministic() {
    let g = Graph::new(
        (0..8).map(|i| rect(&format!("n{i}"))).collect(),
        vec![
            Edge::new("e1", "n0", "n3"),
            Edge::new("e2", "n1", "n2"),
            Edge::new("e3", "n0", "n2"),
            Edge::new("e4", "n3", "n5"),
            Edge::new("e5", "n2", "n4"),
            Edge::new("e6", "n1", "n5"),
            Edge::new("e7", "n6", "n7"),
        ],
    );
    let a = layout(&g, Direction::LR, &LayoutOptions::default());
    let b = layout(&g, Direction::LR, &LayoutOptions::default());
    assert_eq!(a, b);
}
