//! Courier dispatch over a road graph: k-means splits the deliveries into one
//! group per courier, then each group is ordered nearest-neighbour first and
//! routed leg by leg with A*.

pub mod algo;
mod dispatch;
mod error;
pub mod graph;
mod io;
pub mod logging;
mod point;
mod route;

pub(crate) use io::options;

pub use algo::{PathResult, astar, bfs, dijkstra, kmeans, route::{RouteComposer, compose_route}};
pub use dispatch::{ClusterPlan, DispatchPlan, plan_dispatch};
pub use error::{Error, Result};
pub use graph::{Edge, NodeId, RoadGraph};
pub use io::input::{EdgeRecord, NodeRecord, build_graph, load_graph, parse_edges, parse_nodes};
pub use io::options::{DispatchOptions, LogFormat, LogLevel};
pub use io::report::{emit_plan, write_plan};
pub use point::Point;
pub use route::{Leg, Route, RouteMetrics};
