//! Orders a courier's stops greedily and stitches A* legs into one route.

use std::collections::HashSet;

use super::astar;
use crate::{
    Error, Result,
    graph::RoadGraph,
    point::Point,
    route::{Leg, Route},
};

pub struct RouteComposer<'g> {
    graph: &'g RoadGraph,
}

impl<'g> RouteComposer<'g> {
    pub fn new(graph: &'g RoadGraph) -> Self {
        Self { graph }
    }

    /// Fails with [`Error::UnreachableGoal`] naming the first leg A* cannot
    /// complete; no partial route is returned.
    pub fn compose(&self, depot: &str, stops: &[String]) -> Result<Route> {
        let order = self.order_stops(depot, stops)?;
        self.stitch(depot, order)
    }

    /// Nearest-neighbour order by straight-line distance starting at `depot`.
    ///
    /// Duplicate stops are visited once. Ties go to the stop listed first.
    pub fn order_stops(&self, depot: &str, stops: &[String]) -> Result<Vec<String>> {
        let mut seen = HashSet::with_capacity(stops.len());
        let mut remaining: Vec<(&str, Point)> = Vec::with_capacity(stops.len());
        for stop in stops {
            if seen.insert(stop.as_str()) {
                remaining.push((stop.as_str(), self.graph.coord(stop)?));
            }
        }

        let mut cur = self.graph.coord(depot)?;
        let mut order = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let mut best = 0;
            let mut best_d = f64::INFINITY;
            for (idx, (_, p)) in remaining.iter().enumerate() {
                let d = cur.dist(p);
                if d < best_d {
                    best = idx;
                    best_d = d;
                }
            }
            let (label, p) = remaining.remove(best);
            order.push(label.to_owned());
            cur = p;
        }
        Ok(order)
    }

    /// Joins A* paths for depot -> order[0] -> order[1] -> ... into one path.
    pub fn stitch(&self, depot: &str, order: Vec<String>) -> Result<Route> {
        let mut path = vec![depot.to_owned()];
        let mut legs = Vec::with_capacity(order.len());
        let mut total = 0.0;
        let mut cur = depot;

        for target in &order {
            let Some(found) = astar::find_path(self.graph, cur, target)? else {
                log::warn!("route: unreachable from={cur} to={target}");
                return Err(Error::unreachable(cur, target.as_str()));
            };
            log::debug!(
                "route: leg from={cur} to={target} cost={:.3} hops={}",
                found.cost,
                found.hops()
            );

            total += found.cost;
            legs.push(Leg::new(cur.to_owned(), target.clone(), found.cost, found.hops()));
            path.extend(found.path.into_iter().skip(1));
            cur = target.as_str();
        }

        Ok(Route::new(depot.to_owned(), order, path, total, legs))
    }
}

pub fn compose_route(graph: &RoadGraph, depot: &str, stops: &[String]) -> Result<Route> {
    RouteComposer::new(graph).compose(depot, stops)
}

#[cfg(test)]
mod tests {
    use super::{RouteComposer, compose_route};
    use crate::{Error, algo::astar, graph::RoadGraph};

    fn stops(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    /// DEPOT at the origin, a street running east with a spur to the north.
    fn street() -> RoadGraph {
        let mut g = RoadGraph::new();
        g.add_node("DEPOT", 0.0, 0.0);
        g.add_node("A", 1.0, 0.0);
        g.add_node("B", 2.0, 0.0);
        g.add_node("C", 3.0, 0.0);
        g.add_node("N", 1.0, 2.0);
        for (u, v, w) in [
            ("DEPOT", "A", 1.0),
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("A", "N", 2.0),
        ] {
            g.add_edge(u, v, w, true).expect("edge");
        }
        g
    }

    #[test]
    fn order_is_greedy_nearest_neighbour() {
        let g = street();
        let order = RouteComposer::new(&g)
            .order_stops("DEPOT", &stops(&["C", "N", "A"]))
            .expect("order");
        // From A both C and N are 2.0 away; C is listed first.
        assert_eq!(order, stops(&["A", "C", "N"]));
    }

    #[test]
    fn stitched_path_has_no_duplicate_junctions() {
        let g = street();
        let route = compose_route(&g, "DEPOT", &stops(&["C", "N", "A"])).expect("route");

        assert_eq!(route.path, stops(&["DEPOT", "A", "B", "C", "B", "A", "N"]));
        assert_eq!(route.path.first().map(String::as_str), Some("DEPOT"));
        assert!((route.cost - 7.0).abs() < 1e-12);
        assert_eq!(route.legs.len(), 3);
    }

    #[test]
    fn total_cost_is_sum_of_pairwise_astar_costs() {
        let g = street();
        let route = compose_route(&g, "DEPOT", &stops(&["N", "C"])).expect("route");

        let mut expected = 0.0;
        let mut cur = "DEPOT".to_string();
        for stop in &route.order {
            expected += astar::find_path(&g, &cur, stop)
                .expect("ok")
                .expect("path")
                .cost;
            cur = stop.clone();
        }
        assert!((route.cost - expected).abs() < 1e-12);
        let leg_sum: f64 = route.legs.iter().map(|l| l.cost).sum();
        assert!((route.cost - leg_sum).abs() < 1e-12);
    }

    #[test]
    fn consecutive_path_nodes_are_joined_by_edges() {
        let g = street();
        let route = compose_route(&g, "DEPOT", &stops(&["N", "C", "B"])).expect("route");
        for pair in route.path.windows(2) {
            let to = g.id(&pair[1]).expect("id");
            assert!(
                g.neighbors(&pair[0])
                    .expect("neighbors")
                    .iter()
                    .any(|e| e.to == to),
                "no edge {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn no_stops_gives_depot_only_route() {
        let g = street();
        let route = compose_route(&g, "DEPOT", &[]).expect("route");
        assert!(route.is_idle());
        assert_eq!(route.path, stops(&["DEPOT"]));
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn duplicate_stops_are_visited_once() {
        let g = street();
        let route = compose_route(&g, "DEPOT", &stops(&["B", "A", "B"])).expect("route");
        assert_eq!(route.order, stops(&["A", "B"]));
        assert_eq!(route.path, stops(&["DEPOT", "A", "B"]));
    }

    #[test]
    fn depot_as_stop_adds_a_free_leg() {
        let g = street();
        let route = compose_route(&g, "DEPOT", &stops(&["DEPOT", "A"])).expect("route");
        assert_eq!(route.order, stops(&["DEPOT", "A"]));
        assert_eq!(route.path, stops(&["DEPOT", "A"]));
        assert!((route.cost - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unreachable_leg_fails_with_the_pair() {
        let mut g = RoadGraph::new();
        g.add_node("DEPOT", 0.0, 0.0);
        g.add_node("A", 1.0, 0.0);
        g.add_node("B", 2.0, 0.0);
        g.add_edge("DEPOT", "A", 1.0, false).expect("edge");
        g.add_edge("B", "A", 1.0, false).expect("edge");

        let err = compose_route(&g, "DEPOT", &stops(&["A", "B"])).expect_err("B unreachable");
        match err {
            Error::UnreachableGoal { from, to } => {
                assert_eq!(from, "A");
                assert_eq!(to, "B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn first_leg_failure_names_the_depot() {
        let mut g = RoadGraph::new();
        g.add_node("DEPOT", 0.0, 0.0);
        g.add_node("A", 1.0, 0.0);
        g.add_node("B", 2.0, 0.0);
        g.add_edge("B", "A", 1.0, false).expect("edge");

        let err = compose_route(&g, "DEPOT", &stops(&["A", "B"])).expect_err("A unreachable");
        assert!(matches!(
            err,
            Error::UnreachableGoal { ref from, ref to } if from == "DEPOT" && to == "A"
        ));
    }

    #[test]
    fn unknown_stop_is_a_lookup_error() {
        let g = street();
        assert!(matches!(
            compose_route(&g, "DEPOT", &stops(&["A", "GHOST"])),
            Err(Error::UnknownLabel(ref l)) if l == "GHOST"
        ));
    }
}
