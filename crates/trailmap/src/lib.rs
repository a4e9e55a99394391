#![forbid(unsafe_code)]

//! Roadmap diagram engine: layered layout and floating-edge geometry.
//!
//! - [`layout()`] turns a [`Graph`] and a [`Direction`] into non-overlapping, rank-ordered node
//!   positions. Call it when the graph or direction changes, not per frame.
//! - [`resolve_anchor`] turns two live node rectangles into connector endpoints on their visual
//!   outlines. Call it per edge per frame.
//!
//! Neither ever fails across the public boundary; see [`LayoutReport`] for what was repaired.

pub mod dimensions;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod options;
pub mod session;
pub mod validate;

pub use trailmap_graph as graph;

pub use dimensions::{base_dimensions, dimensions_for};
pub use direction::{DEFAULT_VIEWPORT_BREAKPOINT, Direction};
pub use error::{Error, Result};
pub use geometry::{
    AnchorPair, EdgeHandles, HandleId, HandleRole, NodeRect, Point, Side, boundary_point,
    handle_point, resolve_anchor, resolve_anchor_with, resolve_self_loop,
};
pub use layout::{LayoutReport, LayoutResult, NodePlacement, layout};
pub use options::{LayoutOptions, RankAlignment};
pub use session::{DiagramSession, EdgeAnchors, LayoutApplied, Subscription};
pub use trailmap_graph::{Edge, Graph, Node, NodeKind, NodeStyle, RoadmapDocument, ShapeKind, Size};
pub use validate::{load_document, validate};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
