//! End-to-end planning: cluster the deliveries, then route every cluster
//! from the shared depot.

use rayon::prelude::*;

use crate::{
    Error, Result,
    algo::{kmeans, route::RouteComposer},
    graph::RoadGraph,
    options::DispatchOptions,
    point::Point,
    route::Route,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ClusterPlan {
    pub id: usize,
    /// Member labels in delivery input order.
    pub stops: Vec<String>,
    pub centroid: Point,
    pub route: Route,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DispatchPlan {
    pub depot: String,
    /// One entry per cluster id, sorted by id. Empty clusters get an idle route.
    pub clusters: Vec<ClusterPlan>,
    pub iterations: usize,
    pub converged: bool,
}

impl DispatchPlan {
    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    pub fn total_cost(&self) -> f64 {
        self.clusters.iter().map(|c| c.route.cost).sum()
    }
}

/// Any unreachable leg in any cluster fails the whole plan.
#[courier_route_derive::timer("dispatch")]
pub fn plan_dispatch(graph: &RoadGraph, options: &DispatchOptions) -> Result<DispatchPlan> {
    if options.k == 0 {
        return Err(Error::invalid_input("k must be > 0"));
    }
    let depot = options.depot.as_str();
    if !graph.contains(depot) {
        return Err(Error::unknown_label(depot));
    }

    let points = options
        .deliveries
        .iter()
        .map(|label| Ok((label.clone(), graph.coord(label)?)))
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "dispatch: start depot={depot} deliveries={} k={} seed={}",
        points.len(),
        options.k,
        options.seed
    );

    let partition = kmeans::partition(&points, options.k, options.max_iterations, options.seed)?;
    if !partition.converged() {
        log::warn!(
            "dispatch: kmeans stopped at max_iterations={} without converging",
            options.max_iterations
        );
    }

    let groups = partition.clusters();
    let composer = RouteComposer::new(graph);
    let route_cluster = |(id, stops): (usize, &Vec<String>)| -> Result<Route> {
        if stops.is_empty() {
            log::warn!("dispatch: cluster id={id} received no deliveries");
        }
        let route = composer.compose(depot, stops)?;
        log::info!(
            "dispatch: routed cluster id={id} stops={} path_len={} cost={:.3}",
            stops.len(),
            route.path.len(),
            route.cost
        );
        Ok(route)
    };

    let routes: Vec<Route> = if options.parallel {
        groups
            .par_iter()
            .enumerate()
            .map(route_cluster)
            .collect::<Result<_>>()?
    } else {
        groups
            .iter()
            .enumerate()
            .map(route_cluster)
            .collect::<Result<_>>()?
    };

    let clusters: Vec<ClusterPlan> = groups
        .into_iter()
        .zip(routes)
        .zip(partition.centroids())
        .enumerate()
        .map(|(id, ((stops, route), &centroid))| ClusterPlan {
            id,
            stops,
            centroid,
            route,
        })
        .collect();

    let plan = DispatchPlan {
        depot: depot.to_owned(),
        clusters,
        iterations: partition.iterations(),
        converged: partition.converged(),
    };
    log::info!(
        "dispatch: complete clusters={} total_cost={:.3}",
        plan.k(),
        plan.total_cost()
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::plan_dispatch;
    use crate::{Error, graph::RoadGraph, options::DispatchOptions};

    /// Two neighbourhoods either side of the depot joined by two-way streets.
    fn town() -> RoadGraph {
        let mut g = RoadGraph::new();
        for (label, x, y) in [
            ("DEPOT", 5.0, 0.0),
            ("W", 2.0, 2.0),
            ("A", 0.0, 5.0),
            ("B", 2.0, 5.0),
            ("E", 8.0, 2.0),
            ("C", 8.0, 5.0),
            ("D", 10.0, 5.0),
        ] {
            g.add_node(label, x, y);
        }
        for (u, v) in [
            ("DEPOT", "W"),
            ("W", "A"),
            ("W", "B"),
            ("A", "B"),
            ("DEPOT", "E"),
            ("E", "C"),
            ("E", "D"),
            ("C", "D"),
        ] {
            let w = g.euclidean_distance(u, v).expect("distance");
            g.add_edge(u, v, w, true).expect("edge");
        }
        g
    }

    fn options(deliveries: &[&str], k: usize, parallel: bool) -> DispatchOptions {
        DispatchOptions {
            deliveries: deliveries.iter().map(|s| s.to_string()).collect(),
            k,
            parallel,
            ..DispatchOptions::default()
        }
    }

    #[test]
    fn splits_neighbourhoods_and_routes_each_from_depot() {
        let g = town();
        let plan = plan_dispatch(&g, &options(&["A", "C", "B", "D"], 2, true)).expect("plan");

        assert_eq!(plan.k(), 2);
        for cluster in &plan.clusters {
            assert_eq!(cluster.stops.len(), 2);
            assert_eq!(cluster.route.path[0], "DEPOT");
            let west = cluster.stops.iter().all(|s| s == "A" || s == "B");
            let east = cluster.stops.iter().all(|s| s == "C" || s == "D");
            assert!(west || east, "mixed cluster {:?}", cluster.stops);
        }
        let sum: f64 = plan.clusters.iter().map(|c| c.route.cost).sum();
        assert!((plan.total_cost() - sum).abs() < 1e-12);
    }

    #[test]
    fn parallel_and_sequential_plans_agree() {
        let g = town();
        let par = plan_dispatch(&g, &options(&["A", "B", "C", "D", "E"], 2, true)).expect("par");
        let seq = plan_dispatch(&g, &options(&["A", "B", "C", "D", "E"], 2, false)).expect("seq");
        assert_eq!(par, seq);
    }

    #[test]
    fn cluster_ids_are_sorted_and_cover_every_delivery() {
        let g = town();
        let plan = plan_dispatch(&g, &options(&["A", "B", "C", "D", "W", "E"], 3, true))
            .expect("plan");

        let ids: Vec<usize> = plan.clusters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let mut all: Vec<&str> = plan
            .clusters
            .iter()
            .flat_map(|c| c.stops.iter().map(String::as_str))
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec!["A", "B", "C", "D", "E", "W"]);
    }

    #[test]
    fn unknown_depot_or_delivery_is_a_lookup_error() {
        let g = town();
        let mut opts = options(&["A", "B"], 1, false);
        opts.depot = "HQ".into();
        assert!(matches!(plan_dispatch(&g, &opts), Err(Error::UnknownLabel(ref l)) if l == "HQ"));

        let opts = options(&["A", "Q"], 1, false);
        assert!(matches!(plan_dispatch(&g, &opts), Err(Error::UnknownLabel(ref l)) if l == "Q"));
    }

    #[test]
    fn too_many_couriers_fail_before_routing() {
        let g = town();
        let err = plan_dispatch(&g, &options(&["A", "B"], 3, false)).expect_err("k too large");
        assert!(matches!(err, Error::InsufficientPoints { k: 3, available: 2 }));
    }

    #[test]
    fn unreachable_delivery_fails_the_plan() {
        let mut g = town();
        g.add_node("ISLAND", 20.0, 20.0);
        let err = plan_dispatch(&g, &options(&["A", "ISLAND"], 1, true)).expect_err("island");
        assert!(matches!(err, Error::UnreachableGoal { ref to, .. } if to == "ISLAND"));
    }
}
