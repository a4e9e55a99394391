//! Coordinate assignment in top-to-bottom space.
//!
//! Ranks stack along y, each as tall as its tallest member plus the rank separation. Within a
//! rank, nodes are packed along x in order with the node separation between neighbors, and the
//! rank is then aligned against the widest rank. Outputs are node centers.

use crate::options::{LayoutOptions, RankAlignment};
use trailmap_graph::Size;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Center {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Positioned {
    pub centers: Vec<Center>,
    pub width: f64,
    pub height: f64,
}

pub(crate) fn position(sizes: &[Size], layers: &[Vec<usize>], opts: &LayoutOptions) -> Positioned {
    let mut centers = vec![Center::default(); sizes.len()];
    if layers.is_empty() {
        return Positioned {
            centers,
            width: 0.0,
            height: 0.0,
        };
    }

    let row_width = |layer: &[usize]| -> f64 {
        let widths: f64 = layer.iter().map(|&v| sizes[v].width).sum();
        widths + opts.node_separation * layer.len().saturating_sub(1) as f64
    };
    let max_width = layers
        .iter()
        .map(|l| row_width(l))
        .fold(0.0_f64, f64::max);

    let mut y = 0.0;
    for (r, layer) in layers.iter().enumerate() {
        if r > 0 {
            y += opts.rank_separation;
        }
        let rank_height = layer
            .iter()
            .map(|&v| sizes[v].height)
            .fold(0.0_f64, f64::max);
        let center_y = y + rank_height / 2.0;

        let mut x = match opts.rank_alignment {
            RankAlignment::Center => (max_width - row_width(layer)) / 2.0,
            RankAlignment::Start => 0.0,
        };
        for (i, &v) in layer.iter().enumerate() {
            if i > 0 {
                x += opts.node_separation;
            }
            centers[v] = Center {
                x: x + sizes[v].width / 2.0,
                y: center_y,
            };
            x += sizes[v].width;
        }

        y += rank_height;
    }

    Positioned {
        centers,
        width: max_width,
        height: y,
    }
}
