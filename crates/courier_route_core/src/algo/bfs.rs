use std::collections::VecDeque;

use super::{PathResult, reconstruct};
use crate::{Result, graph::RoadGraph};

/// Fewest-hops path ignoring weights. `cost` is the hop count.
pub fn find_path(graph: &RoadGraph, start: &str, goal: &str) -> Result<Option<PathResult>> {
    let s = graph.id(start)?;
    let t = graph.id(goal)?;

    let n = graph.node_count();
    let mut parents = vec![None; n];
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([s]);
    let mut expanded = 0usize;
    seen[s] = true;

    while let Some(u) = queue.pop_front() {
        if u == t {
            let path = reconstruct(graph, &parents, t);
            return Ok(Some(PathResult {
                cost: path.len().saturating_sub(1) as f64,
                path,
                expanded,
            }));
        }
        expanded += 1;

        for edge in graph.edges(u) {
            if !seen[edge.to] {
                seen[edge.to] = true;
                parents[edge.to] = Some(u);
                queue.push_back(edge.to);
            }
        }
    }

    Ok(None)
}
