//! Named connector handles.

use super::{NodeRect, Point, Side};
use std::str::FromStr;
use trailmap_graph::{Edge, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    Source,
    Target,
}

/// A handle id such as `top-source` or `left-target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    pub side: Side,
    /// Absent for bare side ids (`"left"`).
    pub role: Option<HandleRole>,
}

impl HandleId {
    pub const fn new(side: Side, role: HandleRole) -> Self {
        Self {
            side,
            role: Some(role),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (side, role) = match s.split_once('-') {
            Some((side, role)) => {
                let role = match role {
                    "source" => HandleRole::Source,
                    "target" => HandleRole::Target,
                    _ => return None,
                };
                (side, Some(role))
            }
            None => (s, None),
        };
        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return None,
        };
        Some(Self { side, role })
    }
}

impl FromStr for HandleId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

/// Explicit handle overrides for one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeHandles {
    pub source: Option<HandleId>,
    pub target: Option<HandleId>,
}

impl EdgeHandles {
    pub const NONE: Self = Self {
        source: None,
        target: None,
    };

    /// Parses the edge's handle ids; unrecognized ids fall back to floating anchors.
    pub fn from_edge(edge: &Edge) -> Self {
        let parse = |raw: Option<&str>| {
            let raw = raw?;
            let parsed = HandleId::parse(raw);
            if parsed.is_none() {
                tracing::debug!(edge_id = %edge.id, handle = raw, "ignoring unknown handle id");
            }
            parsed
        };
        Self {
            source: parse(edge.source_handle.as_deref()),
            target: parse(edge.target_handle.as_deref()),
        }
    }
}

/// Inset of the handles from the bounding box, as fractions of `(width, height)`, for outlines
/// that do not touch the box at the side midpoints.
fn handle_inset(shape: ShapeKind) -> (f64, f64) {
    match shape {
        ShapeKind::Cloud => (0.06, 0.10),
        _ => (0.0, 0.0),
    }
}

/// Fixed coordinate of the handle on `side`.
pub fn handle_point(rect: &NodeRect, side: Side) -> Point {
    let (ix, iy) = handle_inset(rect.shape);
    let c = rect.center();
    match side {
        Side::Top => Point::new(c.x, rect.y + rect.height * iy),
        Side::Bottom => Point::new(c.x, rect.y + rect.height * (1.0 - iy)),
        Side::Left => Point::new(rect.x + rect.width * ix, c.y),
        Side::Right => Point::new(rect.x + rect.width * (1.0 - ix), c.y),
    }
}
