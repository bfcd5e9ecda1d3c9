//! Seeded k-means over labeled planar points.

use std::collections::{HashMap, HashSet};

use rand::{SeedableRng, rngs::StdRng, seq::index};

use crate::{Error, Result, point::Point};

/// Centroids that moved less than this on both axes count as settled.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    assignments: Vec<(String, usize)>,
    centroids: Vec<Point>,
    iterations: usize,
    converged: bool,
}

impl Partition {
    /// `(label, cluster id)` in first-seen input order.
    pub fn assignments(&self) -> &[(String, usize)] {
        &self.assignments
    }

    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn cluster_of(&self, label: &str) -> Option<usize> {
        self.assignments
            .iter()
            .find(|(l, _)| l == label)
            .map(|&(_, cid)| cid)
    }

    /// Member labels per cluster id; empty clusters stay as empty entries.
    pub fn clusters(&self) -> Vec<Vec<String>> {
        let mut out = vec![Vec::new(); self.k()];
        for (label, cid) in &self.assignments {
            out[*cid].push(label.clone());
        }
        out
    }
}

/// Splits `points` into `k` groups.
///
/// Initial centroids are `k` distinct coordinates drawn without replacement
/// with an RNG seeded from `seed`, so equal inputs give identical results.
/// Stops once no centroid moves by [`CONVERGENCE_TOLERANCE`] or after
/// `max_iterations` refinement rounds.
pub fn partition(
    points: &[(String, Point)],
    k: usize,
    max_iterations: usize,
    seed: u64,
) -> Result<Partition> {
    if k == 0 {
        return Err(Error::invalid_input("k must be > 0"));
    }

    let (labels, coords) = dedup_labels(points)?;
    let distinct = distinct_coords(&coords);
    if k > distinct.len() {
        return Err(Error::InsufficientPoints {
            k,
            available: distinct.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<Point> = index::sample(&mut rng, distinct.len(), k)
        .into_iter()
        .map(|i| distinct[i])
        .collect();

    let mut assigned = assign(&coords, &centroids);
    let mut iterations = 0usize;
    let mut converged = false;

    while iterations < max_iterations {
        iterations += 1;
        let updated = recompute(&coords, &assigned, &centroids);
        converged = updated
            .iter()
            .zip(&centroids)
            .all(|(new, old)| new.within(old, CONVERGENCE_TOLERANCE));
        centroids = updated;
        if converged {
            break;
        }
        assigned = assign(&coords, &centroids);
    }

    log::debug!(
        "kmeans: done n={} k={k} seed={seed} iterations={iterations} converged={converged}",
        labels.len()
    );

    Ok(Partition {
        assignments: labels.into_iter().zip(assigned).collect(),
        centroids,
        iterations,
        converged,
    })
}

fn dedup_labels(points: &[(String, Point)]) -> Result<(Vec<String>, Vec<Point>)> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(points.len());
    let mut labels = Vec::with_capacity(points.len());
    let mut coords = Vec::with_capacity(points.len());

    for (label, coord) in points {
        if !coord.is_finite() {
            return Err(Error::invalid_data(format!(
                "point {label} has non-finite coordinates {coord}"
            )));
        }
        match positions.get(label.as_str()) {
            Some(&pos) => coords[pos] = *coord,
            None => {
                positions.insert(label.as_str(), labels.len());
                labels.push(label.clone());
                coords.push(*coord);
            }
        }
    }
    Ok((labels, coords))
}

fn distinct_coords(coords: &[Point]) -> Vec<Point> {
    let mut seen = HashSet::with_capacity(coords.len());
    coords
        .iter()
        .copied()
        .filter(|p| seen.insert(p.bits()))
        .collect()
}

/// Nearest centroid per point; ties go to the lowest cluster id.
fn assign(coords: &[Point], centroids: &[Point]) -> Vec<usize> {
    coords
        .iter()
        .map(|p| {
            let mut best = 0;
            let mut best_d = f64::INFINITY;
            for (cid, c) in centroids.iter().enumerate() {
                let d = p.dist(c);
                if d < best_d {
                    best = cid;
                    best_d = d;
                }
            }
            best
        })
        .collect()
}

/// Mean of each cluster's members. A cluster with no members keeps its centroid.
fn recompute(coords: &[Point], assigned: &[usize], previous: &[Point]) -> Vec<Point> {
    (0..previous.len())
        .map(|cid| {
            let members = coords
                .iter()
                .zip(assigned)
                .filter(|&(_, &a)| a == cid)
                .map(|(p, _)| p);
            Point::mean(members).unwrap_or(previous[cid])
        })
        .collect()
}
