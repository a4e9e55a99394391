//! Ray/outline intersection for node shapes.
//!
//! Every function takes the vector `(dx, dy)` from the node center toward the point the
//! connector aims at and returns the boundary hit as an offset from the center. Callers
//! guarantee a non-zero vector and positive extents.

use super::NodeRect;
use trailmap_graph::ShapeKind;

pub(crate) fn boundary_offset(rect: &NodeRect, dx: f64, dy: f64) -> (f64, f64) {
    let hw = rect.width / 2.0;
    let hh = rect.height / 2.0;
    match rect.shape {
        ShapeKind::Rectangle | ShapeKind::Rounded | ShapeKind::Card => rect_offset(hw, hh, dx, dy),
        ShapeKind::Circle => {
            let r = hw.min(hh);
            ellipse_offset(r, r, dx, dy)
        }
        // Diamonds anchor on their circumscribing ellipse, clouds on their inscribed one; both
        // are the ellipse through the box side midpoints.
        ShapeKind::Diamond | ShapeKind::Cloud => ellipse_offset(hw, hh, dx, dy),
        ShapeKind::Hexagon => hexagon_offset(hw, hh, dx, dy),
        ShapeKind::Cylinder => cylinder_offset(hw, hh, dx, dy),
    }
}

/// Box hit: compare the slope against the half-extent ratio to pick the crossed edge, then solve
/// for the other coordinate on that edge.
pub(crate) fn rect_offset(hw: f64, hh: f64, dx: f64, dy: f64) -> (f64, f64) {
    if dy.abs() * hw > dx.abs() * hh {
        let h = if dy < 0.0 { -hh } else { hh };
        ((h * dx / dy).clamp(-hw, hw), h)
    } else {
        let w = if dx < 0.0 { -hw } else { hw };
        (w, (w * dy / dx).clamp(-hh, hh))
    }
}

/// Positive root of `((t·dx)/rx)² + ((t·dy)/ry)² = 1`.
pub(crate) fn ellipse_offset(rx: f64, ry: f64, dx: f64, dy: f64) -> (f64, f64) {
    let qx = dx / rx;
    let qy = dy / ry;
    let t = 1.0 / (qx * qx + qy * qy).sqrt();
    (dx * t, dy * t)
}

/// Hexagon with pointy left/right ends; the slanted edges start at a quarter of the width.
fn hexagon_offset(hw: f64, hh: f64, dx: f64, dy: f64) -> (f64, f64) {
    let q = hw / 2.0;
    let poly: [(f64, f64); 6] = [
        (-hw, 0.0),
        (-q, -hh),
        (q, -hh),
        (hw, 0.0),
        (q, hh),
        (-q, hh),
    ];

    let mut best: Option<f64> = None;
    for i in 0..poly.len() {
        let (x1, y1) = poly[i];
        let (x2, y2) = poly[(i + 1) % poly.len()];
        let (ex, ey) = (x2 - x1, y2 - y1);
        // Solve t·d = p1 + u·e.
        let denom = dx * ey - dy * ex;
        if denom.abs() <= f64::EPSILON {
            continue;
        }
        let t = (x1 * ey - y1 * ex) / denom;
        let u = (x1 * dy - y1 * dx) / denom;
        if t > 0.0 && (-1e-12..=1.0 + 1e-12).contains(&u) {
            best = Some(best.map_or(t, |b: f64| b.min(t)));
        }
    }

    match best {
        Some(t) => (dx * t, dy * t),
        None => rect_offset(hw, hh, dx, dy),
    }
}

/// Box hit pulled onto the elliptical top/bottom caps.
fn cylinder_offset(hw: f64, hh: f64, dx: f64, dy: f64) -> (f64, f64) {
    let (x, mut y) = rect_offset(hw, hh, dx, dy);
    let w = (hw * 2.0).max(1.0);
    let rx = hw;
    let ry = rx / (2.5 + w / 50.0);

    let on_cap = x.abs() < hw || ((x.abs() - hw).abs() < 1e-12 && y.abs() > hh - ry);
    if rx > 0.0 && on_cap {
        let inner = ry * ry * (1.0 - (x * x) / (rx * rx));
        let cap = ry - inner.max(0.0).sqrt();
        // The outline at the top is the back of the cap, at the bottom the front rim.
        if dy > 0.0 {
            y -= cap;
        } else {
            y += cap;
        }
    }
    (x, y)
}
