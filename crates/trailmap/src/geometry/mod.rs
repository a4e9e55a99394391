//! Floating-edge anchor resolution.
//!
//! Runs on every frame for every visible edge, against live node rectangles. Each call is O(1),
//! allocation-free, and never yields `NaN`/`Infinity`: unmeasured nodes give `None`, and
//! degenerate geometry falls back to the direction's default side pairing.

mod handles;
mod intersect;

pub use handles::{EdgeHandles, HandleId, HandleRole, handle_point};

use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use trailmap_graph::ShapeKind;

/// Centers closer than this are treated as coincident.
const DEGENERATE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Live, canvas-space node rectangle (top-left anchored).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: ShapeKind,
}

impl NodeRect {
    pub fn from_center(cx: f64, cy: f64, width: f64, height: f64, shape: ShapeKind) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
            shape,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// False until the node has a real, finite size and position.
    pub fn is_measured(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Side of the box nearest to `p`, measured in half-extents so wide and tall boxes behave
    /// alike. Ties between axes go to the horizontal sides.
    pub fn nearest_side(&self, p: Point) -> Side {
        let c = self.center();
        let u = (p.x - c.x) / (self.width / 2.0);
        let v = (p.y - c.y) / (self.height / 2.0);
        if u.abs() >= v.abs() {
            if u >= 0.0 { Side::Right } else { Side::Left }
        } else if v > 0.0 {
            Side::Bottom
        } else {
            Side::Top
        }
    }
}

/// Connector endpoints for one edge.
///
/// The sides only describe where the anchors landed (for marker orientation and styling); the
/// coordinates are authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPair {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
    pub source_side: Side,
    pub target_side: Side,
}

impl AnchorPair {
    pub fn source(&self) -> Point {
        Point::new(self.sx, self.sy)
    }

    pub fn target(&self) -> Point {
        Point::new(self.tx, self.ty)
    }

    fn from_points(source: (Point, Side), target: (Point, Side)) -> Self {
        Self {
            sx: source.0.x,
            sy: source.0.y,
            tx: target.0.x,
            ty: target.0.y,
            source_side: source.1,
            target_side: target.1,
        }
    }
}

/// Boundary point of `rect` on the line from its center toward `toward`.
///
/// `None` when the line is degenerate or the result is not finite.
pub fn boundary_point(rect: &NodeRect, toward: Point) -> Option<Point> {
    let c = rect.center();
    let dx = toward.x - c.x;
    let dy = toward.y - c.y;
    if !(dx.is_finite() && dy.is_finite()) || dx.hypot(dy) <= DEGENERATE_EPSILON {
        return None;
    }
    let (ox, oy) = intersect::boundary_offset(rect, dx, dy);
    let p = Point::new(c.x + ox, c.y + oy);
    p.is_finite().then_some(p)
}

/// [`resolve_anchor_with`] using the top-to-bottom fallback pairing.
pub fn resolve_anchor(
    source: Option<&NodeRect>,
    target: Option<&NodeRect>,
    handles: EdgeHandles,
) -> Option<AnchorPair> {
    resolve_anchor_with(source, target, handles, Direction::TB)
}

/// Anchor points for a connector from `source` to `target`.
///
/// Explicit handles always win. A floating end aims at the other end's fixed handle when there
/// is one, otherwise at the other node's center. Returns `None` when either node is missing or
/// not yet measured.
pub fn resolve_anchor_with(
    source: Option<&NodeRect>,
    target: Option<&NodeRect>,
    handles: EdgeHandles,
    direction: Direction,
) -> Option<AnchorPair> {
    let (source, target) = (source?, target?);
    if !source.is_measured() || !target.is_measured() {
        return None;
    }

    let fixed_source = handles
        .source
        .map(|h| (handle_point(source, h.side), h.side));
    let fixed_target = handles
        .target
        .map(|h| (handle_point(target, h.side), h.side));

    let floating = |rect: &NodeRect, toward: Point| {
        boundary_point(rect, toward).map(|p| (p, rect.nearest_side(p)))
    };

    let source_end = match fixed_source {
        Some(end) => Some(end),
        None => floating(
            source,
            fixed_target.map_or_else(|| target.center(), |(p, _)| p),
        ),
    };
    let target_end = match fixed_target {
        Some(end) => Some(end),
        None => floating(
            target,
            fixed_source.map_or_else(|| source.center(), |(p, _)| p),
        ),
    };

    match (source_end, target_end) {
        (Some(s), Some(t)) => Some(AnchorPair::from_points(s, t)),
        _ => Some(fallback(source, target, handles, direction)),
    }
}

/// Default side pairing for coincident centers; explicit handles are still honored.
fn fallback(
    source: &NodeRect,
    target: &NodeRect,
    handles: EdgeHandles,
    direction: Direction,
) -> AnchorPair {
    let (default_source, default_target) = direction.default_handles();
    let source_side = handles.source.map_or(default_source, |h| h.side);
    let target_side = handles.target.map_or(default_target, |h| h.side);
    AnchorPair::from_points(
        (handle_point(source, source_side), source_side),
        (handle_point(target, target_side), target_side),
    )
}

/// Anchors for an edge whose source and target are the same node: a small fixed loop from the
/// right handle to the top handle.
pub fn resolve_self_loop(rect: Option<&NodeRect>) -> Option<AnchorPair> {
    let rect = rect?;
    if !rect.is_measured() {
        return None;
    }
    Some(AnchorPair::from_points(
        (handle_point(rect, Side::Right), Side::Right),
        (handle_point(rect, Side::Top), Side::Top),
    ))
}
