use serde_json::json;
use trailmap_graph::{Graph, NodeKind, RoadmapDocument, ShapeKind};

#[test]
fn document_parses_catalog_json() {
    let doc: RoadmapDocument = serde_json::from_value(json!({
        "id": "frontend",
        "title": "Frontend Developer",
        "type": "role",
        "nodes": [
            { "id": "html", "type": "infoCard", "data": { "label": "HTML" } },
            { "id": "basics", "type": "group" },
            { "id": "css", "type": "codeCard", "parentId": "basics",
              "style": { "width": 300, "shape": "diamond" } }
        ],
        "edges": [
            { "id": "e1", "source": "html", "target": "css", "sourceHandle": "bottom-source" }
        ]
    }))
    .unwrap();

    assert_eq!(doc.title, "Frontend Developer");
    assert_eq!(doc.kind.as_deref(), Some("role"));
    assert_eq!(doc.graph.nodes.len(), 3);
    assert_eq!(doc.graph.nodes[0].kind, NodeKind::InfoCard);
    let css = doc.graph.node("css").unwrap();
    assert_eq!(css.parent_id.as_deref(), Some("basics"));
    assert_eq!(css.style.width, Some(300.0));
    assert_eq!(css.shape(), ShapeKind::Diamond);
    assert_eq!(doc.graph.edges[0].source_handle.as_deref(), Some("bottom-source"));
    assert_eq!(doc.graph.edges[0].target_handle, None);
}

#[test]
fn unknown_node_types_do_not_fail_the_document() {
    let g: Graph = serde_json::from_value(json!({
        "nodes": [{ "id": "x", "type": "sparkle" }, { "id": "y" }]
    }))
    .unwrap();
    assert_eq!(g.nodes[0].kind, NodeKind::Unknown);
    assert_eq!(g.nodes[0].shape(), ShapeKind::Rectangle);
    assert!(g.edges.is_empty());
}

#[test]
fn node_kinds_map_to_outlines() {
    assert_eq!(NodeKind::Diamond.shape(), ShapeKind::Diamond);
    assert_eq!(NodeKind::Circle.shape(), ShapeKind::Circle);
    assert_eq!(NodeKind::Cylinder.shape(), ShapeKind::Cylinder);
    assert!(NodeKind::Group.is_group());
    assert!(!NodeKind::InfoCard.is_group());
}

#[test]
fn serialization_skips_empty_fields() {
    let g = Graph::new(
        vec![trailmap_graph::Node::new("a", NodeKind::Rectangle)],
        vec![trailmap_graph::Edge::new("e", "a", "a")],
    );
    let v = serde_json::to_value(&g).unwrap();
    assert_eq!(
        v,
        json!({
            "nodes": [{ "id": "a", "type": "rectangle" }],
            "edges": [{ "id": "e", "source": "a", "target": "a" }]
        })
    );
}
