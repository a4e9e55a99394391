//! Layered layout of one containment scope.
//!
//! A scope is the top level of the graph or the children of one group; groups nested inside it
//! are opaque blocks here. Each weakly connected component goes through the full pipeline on its
//! own, and the components are then composed along the cross axis.

use super::position::{Center, Positioned};
use super::{acyclic, components, coordinate_system, order, position, rank};
use crate::direction::Direction;
use crate::options::LayoutOptions;
use trailmap_graph::Size;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScopeLayout {
    /// Node centers in final (direction-adjusted) coordinates, relative to the scope origin.
    pub centers: Vec<Center>,
    pub ranks: Vec<usize>,
    pub orders: Vec<usize>,
    pub size: Size,
    /// Indices into the input edge list that were reversed to break cycles.
    pub reversed: Vec<usize>,
}

/// `edges` are `(source, target)` pairs over `0..sizes.len()` without self-loops.
pub(crate) fn layout_scope(
    sizes: &[Size],
    edges: &[(usize, usize)],
    direction: Direction,
    opts: &LayoutOptions,
) -> ScopeLayout {
    let n = sizes.len();
    let reversed = acyclic::dfs_fas(n, edges);
    let edges = acyclic::reverse(edges, &reversed);
    let ranks = rank::longest_path(n, &edges);
    let sizes_tb = coordinate_system::adjust(sizes, direction);

    let mut centers = vec![Center::default(); n];
    let mut orders = vec![0usize; n];
    let mut rank_fill: Vec<usize> = Vec::new();
    let mut offset_x = 0.0;
    let mut height = 0.0_f64;

    for (i, members) in components::components(n, &edges).into_iter().enumerate() {
        let mut local = vec![usize::MAX; n];
        for (li, &v) in members.iter().enumerate() {
            local[v] = li;
        }
        let local_ranks: Vec<usize> = members.iter().map(|&v| ranks[v]).collect();
        let local_sizes: Vec<Size> = members.iter().map(|&v| sizes_tb[v]).collect();
        let local_edges: Vec<(usize, usize)> = edges
            .iter()
            .filter(|(v, _)| local[*v] != usize::MAX)
            .map(|&(v, w)| (local[v], local[w]))
            .collect();

        let layers = order::order(members.len(), &local_ranks, &local_edges, opts.order_passes);
        let placed = position::position(&local_sizes, &layers, opts);

        if rank_fill.len() < layers.len() {
            rank_fill.resize(layers.len(), 0);
        }
        for (r, layer) in layers.iter().enumerate() {
            for (o, &lv) in layer.iter().enumerate() {
                orders[members[lv]] = rank_fill[r] + o;
            }
            rank_fill[r] += layer.len();
        }

        if i > 0 {
            offset_x += opts.node_separation;
        }
        for (li, &v) in members.iter().enumerate() {
            centers[v] = Center {
                x: placed.centers[li].x + offset_x,
                y: placed.centers[li].y,
            };
        }
        offset_x += placed.width;
        height = height.max(placed.height);
    }

    let mut positioned = Positioned {
        centers,
        width: offset_x,
        height,
    };
    coordinate_system::undo(&mut positioned, direction);

    ScopeLayout {
        centers: positioned.centers,
        ranks,
        orders,
        size: Size::new(positioned.width, positioned.height),
        reversed,
    }
}
