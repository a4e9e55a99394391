//! Break cycles by reversing a feedback arc set (FAS).
//!
//! A depth-first search over nodes in input order collects every edge that points back into the
//! current DFS stack. Reversing those edges makes the graph acyclic; the choice depends only on
//! input order, so the same graph always loses the same edges.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Indices into `edges` of the back edges found by DFS. Self-loops are never reported.
pub(crate) fn dfs_fas(node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (e, &(v, w)) in edges.iter().enumerate() {
        if v != w {
            out[v].push(e);
        }
    }

    let mut mark = vec![Mark::Unvisited; node_count];
    let mut fas: Vec<usize> = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if mark[root] != Mark::Unvisited {
            continue;
        }
        mark[root] = Mark::OnStack;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let Some(&e) = out[v].get(top.1) else {
                mark[v] = Mark::Done;
                stack.pop();
                continue;
            };
            top.1 += 1;

            let w = edges[e].1;
            match mark[w] {
                Mark::OnStack => fas.push(e),
                Mark::Unvisited => {
                    mark[w] = Mark::OnStack;
                    stack.push((w, 0));
                }
                Mark::Done => {}
            }
        }
    }

    fas.sort_unstable();
    fas
}

/// Returns `edges` with the given arcs reversed.
pub(crate) fn reverse(edges: &[(usize, usize)], fas: &[usize]) -> Vec<(usize, usize)> {
    let mut out = edges.to_vec();
    for &e in fas {
        let (v, w) = out[e];
        out[e] = (w, v);
    }
    out
}
