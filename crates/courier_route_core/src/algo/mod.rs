pub mod astar;
pub mod bfs;
pub mod dijkstra;
mod frontier;
pub mod kmeans;
pub mod route;

use crate::graph::{NodeId, RoadGraph};

/// Outcome of a single-pair search.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub cost: f64,
    /// Labels from start to goal, both included.
    pub path: Vec<String>,
    /// Nodes finalized before the goal was reached.
    pub expanded: usize,
}

impl PathResult {
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Walks `parents` back from `goal` and returns the labels in start-to-goal order.
pub(crate) fn reconstruct(graph: &RoadGraph, parents: &[Option<NodeId>], goal: NodeId) -> Vec<String> {
    let mut ids = vec![goal];
    let mut cur = goal;
    while let Some(prev) = parents[cur] {
        ids.push(prev);
        cur = prev;
    }
    ids.reverse();
    graph.labels_of(&ids)
}
