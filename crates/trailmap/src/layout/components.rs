//! Weakly connected components.

use std::collections::VecDeque;

/// Components in order of their lowest member; members ascending.
pub(crate) fn components(node_count: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(v, w) in edges {
        if v != w {
            adj[v].push(w);
            adj[w].push(v);
        }
    }

    let mut seen = vec![false; node_count];
    let mut out: Vec<Vec<usize>> = Vec::new();
    let mut queue: VecDeque<usize> = VecDeque::new();
    for start in 0..node_count {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        queue.push_back(start);
        let mut members: Vec<usize> = Vec::new();
        while let Some(v) = queue.pop_front() {
            members.push(v);
            for &w in &adj[v] {
                if !seen[w] {
                    seen[w] = true;
                    queue.push_back(w);
                }
            }
        }
        members.sort_unstable();
        out.push(members);
    }
    out
}
