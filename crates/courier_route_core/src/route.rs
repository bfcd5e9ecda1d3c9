use courier_route_derive::New;

/// One A* leg between consecutive visits.
#[derive(Clone, Debug, PartialEq, New)]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub cost: f64,
    pub hops: usize,
}

/// A courier's full route: visiting order plus every graph node traversed.
#[derive(Clone, Debug, Default, PartialEq, New)]
pub struct Route {
    pub depot: String,
    pub order: Vec<String>,
    pub path: Vec<String>,
    pub cost: f64,
    pub legs: Vec<Leg>,
}

impl Route {
    /// Route that never leaves the depot.
    pub fn idle(depot: &str) -> Self {
        Self::new(depot.to_owned(), Vec::new(), vec![depot.to_owned()], 0.0, Vec::new())
    }

    pub fn is_idle(&self) -> bool {
        self.order.is_empty()
    }

    pub fn metrics(&self) -> RouteMetrics {
        let n = self.legs.len();
        if n == 0 {
            log::info!("metrics: depot={} legs=0 nothing to report", self.depot);
            return RouteMetrics::default();
        }

        let longest = self.legs.iter().map(|l| l.cost).fold(0.0_f64, f64::max);
        let hops = self.legs.iter().map(|l| l.hops).sum();
        let average = self.cost / n as f64;

        log::info!(
            "metrics: depot={} legs={n} hops={hops} total={:.3} longest={longest:.3} avg={average:.3}",
            self.depot,
            self.cost
        );

        RouteMetrics::new(n, hops, self.cost, longest, average)
    }
}

#[derive(Debug, Default, PartialEq, New)]
pub struct RouteMetrics {
    pub legs: usize,
    pub hops: usize,
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}
