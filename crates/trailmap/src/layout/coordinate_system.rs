//! Coordinate system adjustment.
//!
//! Ranking, ordering and positioning always work top-to-bottom. For left-to-right layouts the
//! node boxes are transposed on the way in and the resulting centers and extents transposed on
//! the way out, which turns the rank axis from y into x rather than mirroring anything.

use super::position::{Center, Positioned};
use crate::direction::Direction;
use trailmap_graph::Size;

pub(crate) fn adjust(sizes: &[Size], direction: Direction) -> Vec<Size> {
    match direction {
        Direction::TB => sizes.to_vec(),
        Direction::LR => sizes.iter().map(|s| s.swapped()).collect(),
    }
}

pub(crate) fn undo(positioned: &mut Positioned, direction: Direction) {
    match direction {
        Direction::TB => {}
        Direction::LR => {
            for c in &mut positioned.centers {
                *c = Center { x: c.y, y: c.x };
            }
            (positioned.width, positioned.height) = (positioned.height, positioned.width);
        }
    }
}
