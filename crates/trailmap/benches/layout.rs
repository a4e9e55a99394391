use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use trailmap::{
    Direction, Edge, EdgeHandles, Graph, LayoutOptions, Node, NodeKind, NodeRect, ShapeKind,
    layout, resolve_anchor,
};

/// A roadmap-shaped graph: a spine of topics, each with a fan of subtopic cards.
fn build_roadmap(topics: usize, fanout: usize) -> Graph {
    let mut nodes: Vec<Node> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();

    for t in 0..topics {
        nodes.push(Node::new(format!("t{t}"), NodeKind::Rectangle));
        if t > 0 {
            edges.push(Edge::new(
                format!("spine{t}"),
                format!("t{}", t - 1),
                format!("t{t}"),
            ));
        }
        for s in 0..fanout {
            let kind = match s % 3 {
                0 => NodeKind::InfoCard,
                1 => NodeKind::ChecklistCard,
                _ => NodeKind::ResourceCard,
            };
            nodes.push(Node::new(format!("t{t}s{s}"), kind));
            edges.push(Edge::new(
                format!("t{t}e{s}"),
                format!("t{t}"),
                format!("t{t}s{s}"),
            ));
        }
        // Cross links create crossing pressure for the ordering sweeps.
        if t + 2 < topics {
            edges.push(Edge::new(
                format!("x{t}"),
                format!("t{t}s0"),
                format!("t{}", t + 2),
            ));
        }
    }

    Graph::new(nodes, edges)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("roadmap_10x4", 10usize, 4usize),
        ("roadmap_40x5", 40usize, 5usize),
        ("roadmap_100x6", 100usize, 6usize),
    ];

    for (name, topics, fanout) in cases {
        let graph = build_roadmap(topics, fanout);
        for direction in [Direction::TB, Direction::LR] {
            group.bench_with_input(
                BenchmarkId::new(format!("layout::{direction:?}"), name),
                &graph,
                |b, graph| {
                    b.iter(|| {
                        let result = layout(black_box(graph), direction, &LayoutOptions::default());
                        black_box(result.len());
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_resolve_anchor(c: &mut Criterion) {
    let source = NodeRect::from_center(0.0, 0.0, 256.0, 100.0, ShapeKind::Rectangle);
    let targets = [
        NodeRect::from_center(500.0, 40.0, 256.0, 100.0, ShapeKind::Rectangle),
        NodeRect::from_center(-120.0, 380.0, 192.0, 192.0, ShapeKind::Circle),
        NodeRect::from_center(260.0, -300.0, 256.0, 100.0, ShapeKind::Hexagon),
        NodeRect::from_center(0.0, 450.0, 256.0, 100.0, ShapeKind::Cylinder),
    ];

    c.bench_function("resolve_anchor::frame_of_4", |b| {
        b.iter(|| {
            for target in &targets {
                black_box(resolve_anchor(
                    Some(black_box(&source)),
                    Some(target),
                    EdgeHandles::NONE,
                ));
            }
        })
    });
}

criterion_group!(benches, bench_layout, bench_resolve_anchor);
criterion_main!(benches);
