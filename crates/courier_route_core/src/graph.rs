//! Road network store: labeled planar nodes and directed weighted edges.
//!
//! Labels are interned to dense [`NodeId`]s on insertion so the search
//! engines can work on flat vectors. Nothing is removed after load, which
//! makes a built graph safe to share read-only across worker threads.

use std::collections::HashMap;

use crate::{Error, Result, point::Point};

pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    pub weight: f64,
}

#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    index: HashMap<String, NodeId>,
    labels: Vec<String>,
    coords: Vec<Point>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node or overwrites its coordinates. Existing edges are kept.
    pub fn add_node(&mut self, label: &str, x: f64, y: f64) -> NodeId {
        let coord = Point::new(x, y);
        if let Some(&id) = self.index.get(label) {
            self.coords[id] = coord;
            return id;
        }

        let id = self.labels.len();
        self.index.insert(label.to_owned(), id);
        self.labels.push(label.to_owned());
        self.coords.push(coord);
        self.adjacency.push(Vec::new());
        id
    }

    /// Appends `from -> to`, plus `to -> from` when `undirected`.
    ///
    /// Both endpoints must already exist. Parallel edges are kept as-is.
    /// Weights are expected to be at least the straight-line distance
    /// between the endpoints for A* to stay optimal; that is not checked.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64, undirected: bool) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::invalid_data(format!(
                "edge {from}->{to} has invalid weight {weight}"
            )));
        }
        let u = self.id(from)?;
        let v = self.id(to)?;

        self.adjacency[u].push(Edge { to: v, weight });
        self.edge_count += 1;
        if undirected {
            self.adjacency[v].push(Edge { to: u, weight });
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Outgoing edges of `label`; an isolated node yields an empty slice.
    pub fn neighbors(&self, label: &str) -> Result<&[Edge]> {
        Ok(self.adjacency[self.id(label)?].as_slice())
    }

    pub fn euclidean_distance(&self, a: &str, b: &str) -> Result<f64> {
        Ok(self.coord(a)?.dist(&self.coord(b)?))
    }

    pub fn coord(&self, label: &str) -> Result<Point> {
        Ok(self.coords[self.id(label)?])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn id(&self, label: &str) -> Result<NodeId> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| Error::unknown_label(label))
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id]
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Directed edge count; an undirected insert counts twice.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn point(&self, id: NodeId) -> Point {
        self.coords[id]
    }

    pub(crate) fn edges(&self, id: NodeId) -> &[Edge] {
        &self.adjacency[id]
    }

    pub(crate) fn labels_of(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| self.labels[id].clone()).collect()
    }
}
