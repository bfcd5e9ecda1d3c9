use super::{PathResult, frontier::Frontier, reconstruct};
use crate::{Result, graph::RoadGraph};

/// Weighted shortest path without a heuristic. Used as the reference A*
/// results are checked against.
pub fn find_path(graph: &RoadGraph, start: &str, goal: &str) -> Result<Option<PathResult>> {
    let s = graph.id(start)?;
    let t = graph.id(goal)?;

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut parents = vec![None; n];
    let mut frontier = Frontier::with_capacity(n);
    let mut expanded = 0usize;

    dist[s] = 0.0;
    frontier.push(s, 0.0);

    while let Some((u, du)) = frontier.pop() {
        if u == t {
            return Ok(Some(PathResult {
                cost: dist[t],
                path: reconstruct(graph, &parents, t),
                expanded,
            }));
        }
        if du > dist[u] {
            continue;
        }
        expanded += 1;

        for edge in graph.edges(u) {
            let nd = du + edge.weight;
            if nd < dist[edge.to] {
                dist[edge.to] = nd;
                parents[edge.to] = Some(u);
                frontier.push(edge.to, nd);
            }
        }
    }

    Ok(None)
}
