//! Read-only adjacency view over a [`Graph`].
//!
//! Node ids are interned to dense indices in input order. Building the index is also where
//! malformed input is repaired: duplicate ids keep their first occurrence, edges with a missing
//! endpoint are dropped, and parent links that point nowhere (or form a containment cycle) are
//! detached so the node is treated as top-level.

use crate::document::{Edge, Graph, Node};
use rustc_hash::FxHashMap as HashMap;

pub type NodeIx = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedEdge {
    /// Position of the edge in `Graph::edges`.
    pub pos: usize,
    pub source: NodeIx,
    pub target: NodeIx,
}

impl IndexedEdge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone)]
pub struct GraphIndex<'a> {
    graph: &'a Graph,

    /// `NodeIx -> position in Graph::nodes`.
    nodes: Vec<usize>,
    node_index: HashMap<&'a str, NodeIx>,

    edges: Vec<IndexedEdge>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,

    parent: Vec<Option<NodeIx>>,
    children: Vec<Vec<NodeIx>>,
    top_level: Vec<NodeIx>,

    duplicate_nodes: Vec<String>,
    dropped_edges: Vec<String>,
    detached_nodes: Vec<String>,
}

impl<'a> GraphIndex<'a> {
    pub fn build(graph: &'a Graph) -> Self {
        let mut nodes: Vec<usize> = Vec::with_capacity(graph.nodes.len());
        let mut node_index: HashMap<&'a str, NodeIx> = HashMap::default();
        let mut duplicate_nodes: Vec<String> = Vec::new();

        for (pos, node) in graph.nodes.iter().enumerate() {
            if node_index.contains_key(node.id.as_str()) {
                tracing::warn!(node_id = %node.id, "duplicate node id, keeping first occurrence");
                duplicate_nodes.push(node.id.clone());
                continue;
            }
            node_index.insert(node.id.as_str(), nodes.len());
            nodes.push(pos);
        }

        let n = nodes.len();
        let mut edges: Vec<IndexedEdge> = Vec::with_capacity(graph.edges.len());
        let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut dropped_edges: Vec<String> = Vec::new();

        for (pos, edge) in graph.edges.iter().enumerate() {
            let source = node_index.get(edge.source.as_str()).copied();
            let target = node_index.get(edge.target.as_str()).copied();
            let (Some(source), Some(target)) = (source, target) else {
                tracing::warn!(
                    edge_id = %edge.id,
                    source = %edge.source,
                    target = %edge.target,
                    "dropping edge with a missing endpoint"
                );
                dropped_edges.push(edge.id.clone());
                continue;
            };
            let ix = edges.len();
            edges.push(IndexedEdge {
                pos,
                source,
                target,
            });
            out_edges[source].push(ix);
            in_edges[target].push(ix);
        }

        let mut parent: Vec<Option<NodeIx>> = vec![None; n];
        let mut detached_nodes: Vec<String> = Vec::new();
        for (ix, &pos) in nodes.iter().enumerate() {
            let node = &graph.nodes[pos];
            let Some(parent_id) = node.parent_id.as_deref() else {
                continue;
            };
            match node_index.get(parent_id) {
                Some(&p) => parent[ix] = Some(p),
                None => {
                    tracing::warn!(
                        node_id = %node.id,
                        parent_id,
                        "parent does not exist, treating node as top-level"
                    );
                    detached_nodes.push(node.id.clone());
                }
            }
        }

        // Break containment cycles. Every cycle is broken at the first of its members in input
        // order; chains that merely lead into a cycle are left alone and become valid once the
        // cycle itself is broken.
        for ix in 0..n {
            let mut cur = parent[ix];
            let mut steps = 0usize;
            while let Some(p) = cur {
                if p == ix {
                    let node = &graph.nodes[nodes[ix]];
                    tracing::warn!(
                        node_id = %node.id,
                        "containment cycle, treating node as top-level"
                    );
                    detached_nodes.push(node.id.clone());
                    parent[ix] = None;
                    break;
                }
                steps += 1;
                if steps > n {
                    break;
                }
                cur = parent[p];
            }
        }

        let mut children: Vec<Vec<NodeIx>> = vec![Vec::new(); n];
        let mut top_level: Vec<NodeIx> = Vec::new();
        for ix in 0..n {
            match parent[ix] {
                Some(p) => children[p].push(ix),
                None => top_level.push(ix),
            }
        }

        Self {
            graph,
            nodes,
            node_index,
            edges,
            out_edges,
            in_edges,
            parent,
            children,
            top_level,
            duplicate_nodes,
            dropped_edges,
            detached_nodes,
        }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, ix: NodeIx) -> &'a Node {
        &self.graph.nodes[self.nodes[ix]]
    }

    pub fn id(&self, ix: NodeIx) -> &'a str {
        self.node(ix).id.as_str()
    }

    pub fn ix(&self, id: &str) -> Option<NodeIx> {
        self.node_index.get(id).copied()
    }

    pub fn node_ixs(&self) -> std::ops::Range<NodeIx> {
        0..self.nodes.len()
    }

    pub fn edges(&self) -> &[IndexedEdge] {
        &self.edges
    }

    pub fn edge(&self, e: &IndexedEdge) -> &'a Edge {
        &self.graph.edges[e.pos]
    }

    pub fn out_edges(&self, ix: NodeIx) -> impl Iterator<Item = &IndexedEdge> + '_ {
        self.out_edges[ix].iter().map(move |&e| &self.edges[e])
    }

    pub fn in_edges(&self, ix: NodeIx) -> impl Iterator<Item = &IndexedEdge> + '_ {
        self.in_edges[ix].iter().map(move |&e| &self.edges[e])
    }

    pub fn successors(&self, ix: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.out_edges(ix).map(|e| e.target)
    }

    pub fn predecessors(&self, ix: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.in_edges(ix).map(|e| e.source)
    }

    pub fn parent(&self, ix: NodeIx) -> Option<NodeIx> {
        self.parent[ix]
    }

    /// Members of a containment scope; `None` is the top level.
    pub fn children(&self, scope: Option<NodeIx>) -> &[NodeIx] {
        match scope {
            Some(p) => &self.children[p],
            None => &self.top_level,
        }
    }

    pub fn has_children(&self, ix: NodeIx) -> bool {
        !self.children[ix].is_empty()
    }

    /// Walks from `ix` (inclusive) up to its top-level ancestor.
    pub fn ancestors(&self, ix: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        std::iter::successors(Some(ix), move |&cur| self.parent[cur])
    }

    /// The member of `scope` that contains `ix` (possibly `ix` itself).
    pub fn member_of(&self, scope: Option<NodeIx>, ix: NodeIx) -> Option<NodeIx> {
        let mut prev: Option<NodeIx> = None;
        for cur in self.ancestors(ix) {
            if Some(cur) == scope {
                return prev;
            }
            prev = Some(cur);
        }
        if scope.is_none() { prev } else { None }
    }

    /// Lowest scope containing both nodes, and the two members of that scope holding them.
    ///
    /// Returns `None` when one node is an ancestor of the other.
    pub fn common_scope(
        &self,
        a: NodeIx,
        b: NodeIx,
    ) -> Option<(Option<NodeIx>, NodeIx, NodeIx)> {
        let a_chain: Vec<NodeIx> = self.ancestors(a).collect();
        let b_chain: Vec<NodeIx> = self.ancestors(b).collect();
        if a_chain.contains(&b) || b_chain.contains(&a) {
            return None;
        }

        let mut ai = a_chain.len();
        let mut bi = b_chain.len();
        // Both chains end at a top-level node; walk down while they agree.
        let mut scope: Option<NodeIx> = None;
        while ai > 0 && bi > 0 && a_chain[ai - 1] == b_chain[bi - 1] {
            scope = Some(a_chain[ai - 1]);
            ai -= 1;
            bi -= 1;
        }
        Some((scope, a_chain[ai - 1], b_chain[bi - 1]))
    }

    /// Post-order over groups that have children, deepest first.
    pub fn scopes_bottom_up(&self) -> Vec<Option<NodeIx>> {
        fn visit(index: &GraphIndex<'_>, scope: Option<NodeIx>, out: &mut Vec<Option<NodeIx>>) {
            for &child in index.children(scope) {
                if index.has_children(child) {
                    visit(index, Some(child), out);
                }
            }
            out.push(scope);
        }

        let mut out: Vec<Option<NodeIx>> = Vec::new();
        visit(self, None, &mut out);
        out
    }

    pub fn duplicate_nodes(&self) -> &[String] {
        &self.duplicate_nodes
    }

    pub fn dropped_edges(&self) -> &[String] {
        &self.dropped_edges
    }

    pub fn detached_nodes(&self) -> &[String] {
        &self.detached_nodes
    }
}
