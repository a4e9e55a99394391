#![forbid(unsafe_code)]

//! Roadmap graph model.
//!
//! `trailmap-graph` holds the plain data that flows into the layout engine (nodes, edges and the
//! roadmap document wrapper) plus [`GraphIndex`], a read-only adjacency view built once per
//! layout call.

pub mod document;
pub mod index;

pub use document::{Edge, Graph, Node, NodeKind, NodeStyle, RoadmapDocument, ShapeKind, Size};
pub use index::{GraphIndex, IndexedEdge, NodeIx};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
