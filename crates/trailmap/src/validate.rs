//! Strict input checks.
//!
//! [`crate::layout`] repairs malformed graphs on its own; these helpers are for callers (the
//! catalog build, the CLI `check` command) that want to reject such input instead.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use trailmap_graph::{Graph, RoadmapDocument};

pub fn load_document(json: &str) -> Result<RoadmapDocument> {
    Ok(serde_json::from_str(json)?)
}

pub fn validate(graph: &Graph) -> Result<()> {
    let mut ids: BTreeSet<&str> = BTreeSet::new();
    for n in &graph.nodes {
        if !ids.insert(n.id.as_str()) {
            return Err(Error::DuplicateNode {
                node_id: n.id.clone(),
            });
        }
    }

    for e in &graph.edges {
        if !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()) {
            return Err(Error::MissingEndpoint {
                edge_id: e.id.clone(),
            });
        }
    }

    let parents: BTreeMap<&str, &str> = graph
        .nodes
        .iter()
        .filter_map(|n| Some((n.id.as_str(), n.parent_id.as_deref()?)))
        .collect();
    for (&node_id, &parent_id) in &parents {
        let unknown = || Error::UnknownParent {
            node_id: node_id.to_string(),
            parent_id: parent_id.to_string(),
        };
        if !ids.contains(parent_id) {
            return Err(unknown());
        }
        let mut cur = Some(parent_id);
        let mut steps = 0usize;
        while let Some(p) = cur {
            if p == node_id || steps > parents.len() {
                return Err(unknown());
            }
            steps += 1;
            cur = parents.get(p).copied();
        }
    }

    Ok(())
}
