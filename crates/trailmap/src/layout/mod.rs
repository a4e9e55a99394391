//! Hierarchical (layered) layout.
//!
//! [`layout`] is a pure function from a graph snapshot to node positions. It never fails:
//! malformed input is repaired and the repairs are listed in [`LayoutReport`].
//!
//! Pipeline per containment scope, deepest groups first:
//! `acyclic -> rank -> order -> position -> coordinate_system::undo`, then each group is resized
//! to hold its children and takes part in its parent scope as a single block.

mod acyclic;
mod components;
mod coordinate_system;
mod order;
mod position;
mod rank;
mod scope;

use crate::dimensions::dimensions_for;
use crate::direction::Direction;
use crate::geometry::NodeRect;
use crate::options::LayoutOptions;
use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use trailmap_graph::{Graph, GraphIndex, NodeIx, ShapeKind, Size};

/// Position of one node. `x`/`y` are the top-left corner, relative to the parent group's origin
/// when `parent` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Layer index within the node's scope.
    pub rank: usize,
    /// Position within the rank, across all components of the scope.
    pub order: usize,
    pub shape: ShapeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Repairs applied to the input. Everything here was logged when it happened.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    /// Edges with a missing endpoint.
    pub dropped_edges: Vec<String>,
    /// Edges reversed to break cycles while ranking.
    pub reversed_edges: Vec<String>,
    pub self_loops: Vec<String>,
    /// Edges between a node and one of its own enclosing groups.
    pub ignored_edges: Vec<String>,
    /// Nodes whose parent was missing or formed a containment cycle.
    pub detached_nodes: Vec<String>,
    pub duplicate_nodes: Vec<String>,
}

impl LayoutReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_edges.is_empty()
            && self.reversed_edges.is_empty()
            && self.self_loops.is_empty()
            && self.ignored_edges.is_empty()
            && self.detached_nodes.is_empty()
            && self.duplicate_nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub direction: Direction,
    /// Extent of the top-level layout.
    pub width: f64,
    pub height: f64,
    /// Placements in input node order.
    pub nodes: IndexMap<String, NodePlacement>,
    pub report: LayoutReport,
}

impl LayoutResult {
    pub fn empty(direction: Direction) -> Self {
        Self {
            direction,
            width: 0.0,
            height: 0.0,
            nodes: IndexMap::new(),
            report: LayoutReport::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: &str) -> Option<&NodePlacement> {
        self.nodes.get(id)
    }

    /// Canvas-space rectangle of a node, composing the offsets of all enclosing groups.
    pub fn absolute_rect(&self, id: &str) -> Option<NodeRect> {
        let node = self.nodes.get(id)?;
        let mut x = node.x;
        let mut y = node.y;
        let mut parent = node.parent.as_deref();
        let mut depth = 0usize;
        while let Some(p) = parent {
            let group = self.nodes.get(p)?;
            x += group.x;
            y += group.y;
            parent = group.parent.as_deref();
            depth += 1;
            if depth > self.nodes.len() {
                return None;
            }
        }
        Some(NodeRect {
            x,
            y,
            width: node.width,
            height: node.height,
            shape: node.shape,
        })
    }
}

/// Lays out `graph` in `direction`.
///
/// Full recompute: callers cache the result until the graph or direction changes.
pub fn layout(graph: &Graph, direction: Direction, options: &LayoutOptions) -> LayoutResult {
    let opts = options.sanitized();
    let index = GraphIndex::build(graph);

    let mut report = LayoutReport {
        dropped_edges: index.dropped_edges().to_vec(),
        detached_nodes: index.detached_nodes().to_vec(),
        duplicate_nodes: index.duplicate_nodes().to_vec(),
        ..Default::default()
    };

    let n = index.node_count();
    if n == 0 {
        return LayoutResult {
            report,
            ..LayoutResult::empty(direction)
        };
    }

    let mut sizes: Vec<Size> = index
        .node_ixs()
        .map(|ix| {
            let node = index.node(ix);
            dimensions_for(node.kind, &node.style)
        })
        .collect();

    // Lift every edge to the members of the lowest scope containing both endpoints.
    let mut scope_edges: HashMap<Option<NodeIx>, Vec<(NodeIx, NodeIx, usize)>> =
        HashMap::default();
    for e in index.edges() {
        let edge = index.edge(e);
        if e.is_self_loop() {
            tracing::debug!(edge_id = %edge.id, "self-loop does not take part in ranking");
            report.self_loops.push(edge.id.clone());
            continue;
        }
        match index.common_scope(e.source, e.target) {
            Some((scope, a, b)) => scope_edges.entry(scope).or_default().push((a, b, e.pos)),
            None => {
                tracing::debug!(
                    edge_id = %edge.id,
                    "edge connects a node with its own group, ignored for ranking"
                );
                report.ignored_edges.push(edge.id.clone());
            }
        }
    }

    let mut top_left: Vec<(f64, f64)> = vec![(0.0, 0.0); n];
    let mut ranks: Vec<usize> = vec![0; n];
    let mut orders: Vec<usize> = vec![0; n];
    let mut root_size = Size::default();

    for scope in index.scopes_bottom_up() {
        let members = index.children(scope);
        let mut slot: HashMap<NodeIx, usize> = HashMap::default();
        for (i, &m) in members.iter().enumerate() {
            slot.insert(m, i);
        }
        let member_sizes: Vec<Size> = members.iter().map(|&m| sizes[m]).collect();

        let lifted = scope_edges.get(&scope).map(Vec::as_slice).unwrap_or(&[]);
        let pairs: Vec<(usize, usize)> = lifted
            .iter()
            .filter_map(|&(a, b, _)| Some((*slot.get(&a)?, *slot.get(&b)?)))
            .collect();

        let laid = scope::layout_scope(&member_sizes, &pairs, direction, &opts);

        for &r in &laid.reversed {
            let edge = &graph.edges[lifted[r].2];
            tracing::warn!(edge_id = %edge.id, "edge closes a cycle, reversed for ranking");
            report.reversed_edges.push(edge.id.clone());
        }

        let pad = if scope.is_some() {
            opts.group_padding
        } else {
            0.0
        };
        for (i, &m) in members.iter().enumerate() {
            let c = laid.centers[i];
            let s = member_sizes[i];
            top_left[m] = (c.x - s.width / 2.0 + pad, c.y - s.height / 2.0 + pad);
            ranks[m] = laid.ranks[i];
            orders[m] = laid.orders[i];
        }

        match scope {
            Some(group) => {
                let declared = sizes[group];
                sizes[group] = Size {
                    width: declared.width.max(laid.size.width + 2.0 * pad),
                    height: declared.height.max(laid.size.height + 2.0 * pad),
                };
            }
            None => root_size = laid.size,
        }
    }

    let nodes: IndexMap<String, NodePlacement> = index
        .node_ixs()
        .map(|ix| {
            let node = index.node(ix);
            let (x, y) = top_left[ix];
            let placement = NodePlacement {
                x,
                y,
                width: sizes[ix].width,
                height: sizes[ix].height,
                rank: ranks[ix],
                order: orders[ix],
                shape: node.shape(),
                parent: index.parent(ix).map(|p| index.id(p).to_string()),
            };
            (node.id.clone(), placement)
        })
        .collect();

    LayoutResult {
        direction,
        width: root_size.width,
        height: root_size.height,
        nodes,
        report,
    }
}
