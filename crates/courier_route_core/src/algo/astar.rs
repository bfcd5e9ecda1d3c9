//! Best-first shortest path guided by straight-line distance to the goal.
//!
//! Optimal as long as every edge weight is at least the Euclidean distance
//! between its endpoints. That precondition is on the caller's data.

use super::{PathResult, frontier::Frontier, reconstruct};
use crate::{Result, graph::RoadGraph};

/// `Ok(None)` means the goal is not reachable from `start`.
pub fn find_path(graph: &RoadGraph, start: &str, goal: &str) -> Result<Option<PathResult>> {
    let s = graph.id(start)?;
    let t = graph.id(goal)?;
    let target = graph.point(t);
    let h = |id| graph.point(id).dist(&target);

    let n = graph.node_count();
    let mut best = vec![f64::INFINITY; n];
    let mut parents = vec![None; n];
    let mut closed = vec![false; n];
    let mut frontier = Frontier::with_capacity(n);
    let mut expanded = 0usize;

    best[s] = 0.0;
    frontier.push(s, h(s));

    while let Some((u, _)) = frontier.pop() {
        if u == t {
            log::trace!(
                "astar: found start={start} goal={goal} cost={:.3} expanded={expanded}",
                best[t]
            );
            return Ok(Some(PathResult {
                cost: best[t],
                path: reconstruct(graph, &parents, t),
                expanded,
            }));
        }
        if closed[u] {
            continue;
        }
        closed[u] = true;
        expanded += 1;

        for edge in graph.edges(u) {
            let tentative = best[u] + edge.weight;
            if tentative < best[edge.to] {
                best[edge.to] = tentative;
                parents[edge.to] = Some(u);
                frontier.push(edge.to, tentative + h(edge.to));
            }
        }
    }

    log::trace!("astar: exhausted start={start} goal={goal} expanded={expanded}");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::find_path;
    use crate::{Error, algo::dijkstra, graph::RoadGraph};

    fn diamond() -> RoadGraph {
        let mut g = RoadGraph::new();
        g.add_node("DEPOT", 0.0, 0.0);
        g.add_node("A", 1.0, 0.0);
        g.add_node("B", 0.0, 1.0);
        g.add_node("C", 5.0, 5.0);
        for (u, v) in [("DEPOT", "A"), ("DEPOT", "B"), ("A", "C"), ("B", "C")] {
            g.add_edge(u, v, 1.0, true).expect("edge");
        }
        g
    }

    /// Jittered grid with weights at or above straight-line length.
    fn jittered_grid(side: usize, seed: u64) -> RoadGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut g = RoadGraph::new();
        let label = |r: usize, c: usize| format!("n{r}_{c}");
        for r in 0..side {
            for c in 0..side {
                let x = c as f64 * 10.0 + rng.random_range(-3.0..3.0);
                let y = r as f64 * 10.0 + rng.random_range(-3.0..3.0);
                g.add_node(&label(r, c), x, y);
            }
        }
        for r in 0..side {
            for c in 0..side {
                let here = label(r, c);
                let mut link = |other: String, rng: &mut StdRng| {
                    let d = g.euclidean_distance(&here, &other).expect("distance");
                    let w = d * rng.random_range(1.0..1.6);
                    g.add_edge(&here, &other, w, rng.random_bool(0.8))
                        .expect("edge");
                };
                if c + 1 < side {
                    link(label(r, c + 1), &mut rng);
                }
                if r + 1 < side {
                    link(label(r + 1, c), &mut rng);
                }
            }
        }
        g
    }

    #[test]
    fn diamond_takes_a_two_hop_route() {
        let g = diamond();
        let res = find_path(&g, "DEPOT", "C")
            .expect("labels exist")
            .expect("path exists");

        assert!((res.cost - 2.0).abs() < 1e-12);
        assert_eq!(res.path.len(), 3);
        assert_eq!(res.path.first().map(String::as_str), Some("DEPOT"));
        assert_eq!(res.path.last().map(String::as_str), Some("C"));
        assert!(res.path[1] == "A" || res.path[1] == "B");
    }

    #[test]
    fn start_equal_to_goal_is_free() {
        let g = diamond();
        let res = find_path(&g, "A", "A").expect("ok").expect("path");
        assert_eq!(res.cost, 0.0);
        assert_eq!(res.path, vec!["A".to_string()]);
    }

    #[test]
    fn prefers_cheaper_parallel_edge() {
        let mut g = RoadGraph::new();
        g.add_node("S", 0.0, 0.0);
        g.add_node("T", 1.0, 0.0);
        g.add_edge("S", "T", 4.0, false).expect("edge");
        g.add_edge("S", "T", 1.5, false).expect("edge");

        let res = find_path(&g, "S", "T").expect("ok").expect("path");
        assert!((res.cost - 1.5).abs() < 1e-12);
    }

    #[test]
    fn respects_edge_direction() {
        let mut g = RoadGraph::new();
        g.add_node("A", 0.0, 0.0);
        g.add_node("B", 1.0, 0.0);
        g.add_edge("B", "A", 1.0, false).expect("edge");

        assert!(find_path(&g, "A", "B").expect("ok").is_none());
        assert!(find_path(&g, "B", "A").expect("ok").is_some());
    }

    #[test]
    fn unknown_labels_are_errors_not_missing_paths() {
        let g = diamond();
        assert!(matches!(
            find_path(&g, "DEPOT", "Z"),
            Err(Error::UnknownLabel(ref l)) if l == "Z"
        ));
        assert!(matches!(
            find_path(&g, "Z", "DEPOT"),
            Err(Error::UnknownLabel(_))
        ));
    }

    #[test]
    fn path_follows_existing_edges() {
        let g = jittered_grid(6, 11);
        let res = find_path(&g, "n0_0", "n5_5").expect("ok").expect("path");

        let mut walked = 0.0;
        for pair in res.path.windows(2) {
            let to = g.id(&pair[1]).expect("id");
            let w = g
                .neighbors(&pair[0])
                .expect("neighbors")
                .iter()
                .filter(|e| e.to == to)
                .map(|e| e.weight)
                .fold(f64::INFINITY, f64::min);
            assert!(w.is_finite(), "missing edge {} -> {}", pair[0], pair[1]);
            walked += w;
        }
        assert!((walked - res.cost).abs() < 1e-9);
    }

    #[test]
    fn matches_dijkstra_cost_and_expands_no_more_nodes() {
        for seed in [1_u64, 2, 3, 4, 5] {
            let g = jittered_grid(8, seed);
            let labels: Vec<String> = g.labels().map(str::to_owned).collect();
            let mut rng = StdRng::seed_from_u64(seed * 97);

            for _ in 0..20 {
                let s = &labels[rng.random_range(0..labels.len())];
                let t = &labels[rng.random_range(0..labels.len())];

                let a = find_path(&g, s, t).expect("ok");
                let d = dijkstra::find_path(&g, s, t).expect("ok");
                match (a, d) {
                    (Some(a), Some(d)) => {
                        assert!(
                            (a.cost - d.cost).abs() < 1e-9,
                            "seed={seed} {s}->{t}: astar={} dijkstra={}",
                            a.cost,
                            d.cost
                        );
                        assert!(a.expanded <= d.expanded);
                    }
                    (None, None) => {}
                    (a, d) => panic!("reachability differs for {s}->{t}: {a:?} vs {d:?}"),
                }
            }
        }
    }
}
