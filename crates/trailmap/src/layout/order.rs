//! Crossing reduction within ranks.
//!
//! Edges spanning more than one rank are split into chains of virtual vertices so every segment
//! connects adjacent ranks. An initial order comes from a DFS over nodes sorted by
//! `(rank, input index)`; alternating downward/upward barycenter sweeps then reorder each rank
//! against its already-fixed neighbor rank. The ordering with the fewest crossings wins, ties
//! going to the earliest one. Virtual vertices are dropped from the returned layers.

/// Per-rank orderings of real nodes, rank 0 first.
pub(crate) fn order(
    node_count: usize,
    ranks: &[usize],
    edges: &[(usize, usize)],
    passes: usize,
) -> Vec<Vec<usize>> {
    if node_count == 0 {
        return Vec::new();
    }

    let layered = LayeredGraph::build(node_count, ranks, edges);
    let mut layers = layered.init_order();
    let mut best = layers.clone();
    let mut best_cc = layered.cross_count(&layers);

    for pass in 0..passes {
        if best_cc == 0 {
            break;
        }
        if pass % 2 == 0 {
            for r in 1..layers.len() {
                layered.sort_layer(&mut layers, r, Sweep::Down);
            }
        } else {
            for r in (0..layers.len().saturating_sub(1)).rev() {
                layered.sort_layer(&mut layers, r, Sweep::Up);
            }
        }

        let cc = layered.cross_count(&layers);
        tracing::debug!(pass, crossings = cc, "ordering sweep");
        if cc < best_cc {
            best_cc = cc;
            best = layers.clone();
        }
    }

    best.into_iter()
        .map(|layer| layer.into_iter().filter(|&v| v < node_count).collect())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    /// Order rank `r` by its predecessors in `r - 1`.
    Down,
    /// Order rank `r` by its successors in `r + 1`.
    Up,
}

/// Proper layered graph: real vertices `0..node_count`, virtual vertices after them.
struct LayeredGraph {
    rank: Vec<usize>,
    up: Vec<Vec<usize>>,
    down: Vec<Vec<usize>>,
    real_count: usize,
    max_rank: usize,
}

impl LayeredGraph {
    fn build(node_count: usize, ranks: &[usize], edges: &[(usize, usize)]) -> Self {
        let mut rank: Vec<usize> = ranks[..node_count].to_vec();
        let mut up: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut down: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        for &(v, w) in edges {
            if v == w || rank[w] <= rank[v] {
                continue;
            }
            let mut prev = v;
            for r in rank[v] + 1..rank[w] {
                let dummy = rank.len();
                rank.push(r);
                up.push(vec![prev]);
                down.push(Vec::new());
                down[prev].push(dummy);
                prev = dummy;
            }
            down[prev].push(w);
            up[w].push(prev);
        }

        let max_rank = rank.iter().copied().max().unwrap_or(0);
        Self {
            rank,
            up,
            down,
            real_count: node_count,
            max_rank,
        }
    }

    fn init_order(&self) -> Vec<Vec<usize>> {
        let mut layers: Vec<Vec<usize>> = vec![Vec::new(); self.max_rank + 1];
        let mut visited = vec![false; self.rank.len()];

        // Stable by construction: real vertices sorted by (rank, index).
        let mut starts: Vec<usize> = (0..self.real_count).collect();
        starts.sort_by_key(|&v| (self.rank[v], v));

        let mut stack: Vec<usize> = Vec::new();
        for start in starts {
            stack.push(start);
            while let Some(v) = stack.pop() {
                if visited[v] {
                    continue;
                }
                visited[v] = true;
                layers[self.rank[v]].push(v);
                for &w in self.down[v].iter().rev() {
                    if !visited[w] {
                        stack.push(w);
                    }
                }
            }
        }
        layers
    }

    fn sort_layer(&self, layers: &mut [Vec<usize>], r: usize, sweep: Sweep) {
        let (fixed, neighbors) = match sweep {
            Sweep::Down => (r - 1, &self.up),
            Sweep::Up => (r + 1, &self.down),
        };

        let mut fixed_pos = vec![usize::MAX; self.rank.len()];
        for (i, &v) in layers[fixed].iter().enumerate() {
            fixed_pos[v] = i;
        }

        let layer = &layers[r];
        let mut sortable: Vec<(f64, usize, usize)> = Vec::new();
        let mut pinned: Vec<Option<usize>> = vec![None; layer.len()];
        for (i, &v) in layer.iter().enumerate() {
            let mut sum = 0.0;
            let mut count = 0usize;
            for &n in &neighbors[v] {
                let p = fixed_pos[n];
                if p != usize::MAX {
                    sum += p as f64;
                    count += 1;
                }
            }
            if count == 0 {
                pinned[i] = Some(v);
            } else {
                sortable.push((sum / count as f64, i, v));
            }
        }

        // Vertices without neighbors keep their slot; the rest fill the free slots in
        // barycenter order.
        sortable.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let mut free = sortable.into_iter().map(|(_, _, v)| v);
        let next: Vec<usize> = pinned
            .into_iter()
            .filter_map(|slot| slot.or_else(|| free.next()))
            .collect();
        layers[r] = next;
    }

    fn cross_count(&self, layers: &[Vec<usize>]) -> usize {
        let mut cc = 0usize;
        for i in 1..layers.len() {
            cc += self.two_layer_cross_count(&layers[i - 1], &layers[i]);
        }
        cc
    }

    fn two_layer_cross_count(&self, north: &[usize], south: &[usize]) -> usize {
        if south.is_empty() {
            return 0;
        }

        let mut south_pos = vec![usize::MAX; self.rank.len()];
        for (i, &v) in south.iter().enumerate() {
            south_pos[v] = i;
        }

        let mut south_entries: Vec<usize> = Vec::new();
        for &v in north {
            let mut entries: Vec<usize> = self.down[v]
                .iter()
                .map(|&w| south_pos[w])
                .filter(|&p| p != usize::MAX)
                .collect();
            entries.sort_unstable();
            south_entries.extend(entries);
        }

        // Accumulator tree over south positions.
        let mut first_index: usize = 1;
        while first_index < south.len() {
            first_index <<= 1;
        }
        let tree_size = 2 * first_index - 1;
        first_index -= 1;
        let mut tree = vec![0usize; tree_size];

        let mut cc = 0usize;
        for pos in south_entries {
            let mut index = pos + first_index;
            tree[index] += 1;
            let mut weight_sum = 0usize;
            while index > 0 {
                if index % 2 == 1 {
                    weight_sum += tree[index + 1];
                }
                index = (index - 1) >> 1;
                tree[index] += 1;
            }
            cc += weight_sum;
        }
        cc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_layers() {
        assert!(order(0, &[], &[], 4).is_empty());
    }

    #[test]
    fn crossing_pair_gets_untangled() {
        // a, b on rank 0; c, d on rank 1; a -> d, b -> c.
        let layers = order(4, &[0, 0, 1, 1], &[(0, 3), (1, 2)], 4);
        assert_eq!(layers, vec![vec![0, 1], vec![3, 2]]);
    }

    #[test]
    fn long_edges_do_not_leak_virtual_vertices() {
        let layers = order(3, &[0, 1, 2], &[(0, 1), (1, 2), (0, 2)], 4);
        assert_eq!(layers, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn cross_count_counts_a_single_crossing() {
        let g = LayeredGraph::build(4, &[0, 0, 1, 1], &[(0, 3), (1, 2)]);
        assert_eq!(g.cross_count(&[vec![0, 1], vec![2, 3]]), 1);
        assert_eq!(g.cross_count(&[vec![0, 1], vec![3, 2]]), 0);
    }
}
