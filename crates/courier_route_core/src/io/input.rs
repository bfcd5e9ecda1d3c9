//! Loads the road graph from two CSV files: nodes (`node,x,y`) and edges
//! (`u,v,weight[,undirected]`). Every node row is inserted before any edge
//! row, and an edge naming a node missing from the nodes file fails the load.

use std::{fs, path::Path};

use crate::{Error, Result, graph::RoadGraph, options::DispatchOptions};

#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub weight: f64,
    /// `None` defers to the configured default.
    pub undirected: Option<bool>,
}

pub fn load_graph(options: &DispatchOptions) -> Result<RoadGraph> {
    let nodes = parse_nodes(&read_file(&options.nodes)?)?;
    let edges = parse_edges(&read_file(&options.edges)?)?;
    let graph = build_graph(&nodes, &edges, options.undirected)?;
    log::info!(
        "input: loaded nodes={} edges={} from nodes_file={} edges_file={}",
        graph.node_count(),
        graph.edge_count(),
        options.nodes.display(),
        options.edges.display()
    );
    Ok(graph)
}

pub fn build_graph(
    nodes: &[NodeRecord],
    edges: &[EdgeRecord],
    default_undirected: bool,
) -> Result<RoadGraph> {
    let mut graph = RoadGraph::new();
    for node in nodes {
        graph.add_node(&node.label, node.x, node.y);
    }
    for (idx, edge) in edges.iter().enumerate() {
        let undirected = edge.undirected.unwrap_or(default_undirected);
        graph
            .add_edge(&edge.from, &edge.to, edge.weight, undirected)
            .map_err(|e| match e {
                Error::UnknownLabel(label) => Error::invalid_data(format!(
                    "edge {} ({}->{}) references unknown node {label}",
                    idx + 1,
                    edge.from,
                    edge.to
                )),
                other => other,
            })?;
    }
    Ok(graph)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::invalid_input(format!("failed to read {}: {e}", path.display()))
    })
}

pub fn parse_nodes(input: &str) -> Result<Vec<NodeRecord>> {
    let table = Table::parse("nodes", input)?;
    let label = table.column(&["node", "label"])?;
    let x = table.column(&["x"])?;
    let y = table.column(&["y"])?;

    table
        .rows
        .iter()
        .map(|row| {
            let x = row.float(x)?;
            let y = row.float(y)?;
            if !x.is_finite() || !y.is_finite() {
                return Err(row.error("coordinates must be finite"));
            }
            Ok(NodeRecord {
                label: row.text(label)?.to_owned(),
                x,
                y,
            })
        })
        .collect()
}

pub fn parse_edges(input: &str) -> Result<Vec<EdgeRecord>> {
    let table = Table::parse("edges", input)?;
    let from = table.column(&["u", "from", "source"])?;
    let to = table.column(&["v", "to", "target"])?;
    let weight = table.column(&["weight", "w"])?;
    let undirected = table.optional_column(&["undirected"]);

    table
        .rows
        .iter()
        .map(|row| {
            let undirected = match undirected {
                Some(col) => row.flag(col)?,
                None => None,
            };
            Ok(EdgeRecord {
                from: row.text(from)?.to_owned(),
                to: row.text(to)?.to_owned(),
                weight: row.float(weight)?,
                undirected,
            })
        })
        .collect()
}

struct Table<'a> {
    kind: &'static str,
    header: Vec<String>,
    rows: Vec<Row<'a>>,
}

struct Row<'a> {
    kind: &'static str,
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Table<'a> {
    fn parse(kind: &'static str, input: &'a str) -> Result<Self> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(Error::invalid_data(format!("{kind}: missing header row")));
        };
        let header: Vec<String> = header
            .split(',')
            .map(|h| h.trim().to_ascii_lowercase())
            .collect();
        let rows = lines
            .map(|(line, raw)| Row {
                kind,
                line,
                fields: raw.split(',').map(str::trim).collect(),
            })
            .collect();

        Ok(Self { kind, header, rows })
    }

    fn optional_column(&self, names: &[&str]) -> Option<usize> {
        self.header
            .iter()
            .position(|h| names.contains(&h.as_str()))
    }

    fn column(&self, names: &[&str]) -> Result<usize> {
        self.optional_column(names).ok_or_else(|| {
            Error::invalid_data(format!(
                "{}: header is missing column {}",
                self.kind,
                names.join("/")
            ))
        })
    }
}

impl Row<'_> {
    fn error(&self, message: impl std::fmt::Display) -> Error {
        Error::invalid_data(format!("{} line {}: {message}", self.kind, self.line))
    }

    fn text(&self, col: usize) -> Result<&str> {
        match self.fields.get(col) {
            Some(&v) if !v.is_empty() => Ok(v),
            _ => Err(self.error(format!("missing field {}", col + 1))),
        }
    }

    fn float(&self, col: usize) -> Result<f64> {
        let raw = self.text(col)?;
        raw.parse()
            .map_err(|_| self.error(format!("invalid number: {raw}")))
    }

    fn flag(&self, col: usize) -> Result<Option<bool>> {
        let Some(raw) = self.fields.get(col).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" => Ok(Some(false)),
            _ => Err(self.error(format!("invalid boolean: {raw}"))),
        }
    }
}
