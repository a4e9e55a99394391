//! Node type to size lookup.
//!
//! This table is the only place node sizes are decided. The layout engine reserves space with it
//! and renderers size their elements with it, so the two can never drift apart.

use trailmap_graph::{NodeKind, NodeStyle, ShapeKind, Size};

pub const DEFAULT_SIZE: Size = Size::new(256.0, 100.0);
pub const ROUND_SIZE: Size = Size::new(192.0, 192.0);

pub const fn base_dimensions(kind: NodeKind) -> Size {
    match kind {
        NodeKind::Rectangle | NodeKind::Rounded => DEFAULT_SIZE,
        NodeKind::Diamond | NodeKind::Circle => ROUND_SIZE,
        NodeKind::InfoCard => Size::new(288.0, 400.0),
        NodeKind::CodeCard => Size::new(320.0, 200.0),
        NodeKind::Group => Size::new(400.0, 300.0),
        NodeKind::VideoCard => Size::new(320.0, 300.0),
        NodeKind::ChecklistCard => Size::new(288.0, 300.0),
        NodeKind::QuizCard => Size::new(320.0, 400.0),
        NodeKind::ResourceCard => Size::new(288.0, 300.0),
        NodeKind::Hexagon | NodeKind::Cloud | NodeKind::Cylinder | NodeKind::Unknown => {
            DEFAULT_SIZE
        }
    }
}

fn explicit(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// Resolved size of a node of `kind` with per-instance `style` overrides.
///
/// An explicit diamond/circle shape flag switches to the square round-shape box; explicit
/// positive width/height then override each axis.
pub fn dimensions_for(kind: NodeKind, style: &NodeStyle) -> Size {
    let base = match style.shape {
        Some(ShapeKind::Diamond | ShapeKind::Circle) => ROUND_SIZE,
        _ => base_dimensions(kind),
    };
    Size {
        width: explicit(style.width).unwrap_or(base.width),
        height: explicit(style.height).unwrap_or(base.height),
    }
}
