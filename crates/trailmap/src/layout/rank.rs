//! Longest-path rank assignment.

use std::collections::VecDeque;

/// Rank of every node: the length of the longest path from any root (a node without incoming
/// edges) to it. Roots get rank 0.
///
/// `edges` must be acyclic and free of self-loops. Nodes that are never released by the
/// topological walk (only possible with a cycle) keep the rank reached so far.
pub(crate) fn longest_path(node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut indegree = vec![0usize; node_count];
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(v, w) in edges {
        if v == w {
            continue;
        }
        indegree[w] += 1;
        out[v].push(w);
    }

    let mut rank = vec![0usize; node_count];
    let mut queue: VecDeque<usize> = (0..node_count).filter(|&v| indegree[v] == 0).collect();
    while let Some(v) = queue.pop_front() {
        for &w in &out[v] {
            rank[w] = rank[w].max(rank[v] + 1);
            indegree[w] -= 1;
            if indegree[w] == 0 {
                queue.push_back(w);
            }
        }
    }
    rank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_get_rank_zero() {
        assert_eq!(longest_path(3, &[]), vec![0, 0, 0]);
    }

    #[test]
    fn rank_follows_the_longest_path() {
        // a -> b -> c -> d, a -> d
        assert_eq!(
            longest_path(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn independent_roots_both_start_at_zero() {
        // a -> c, b -> c
        assert_eq!(longest_path(3, &[(0, 2), (1, 2)]), vec![0, 0, 1]);
    }
}
