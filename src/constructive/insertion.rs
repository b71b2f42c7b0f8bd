//! Cheapest (greedy) insertion constructive heuristic.
//!
//! # Algorithm
//!
//! Start from the one-city cycle `[start]`. At every step, evaluate every
//! unvisited city `c` at every cycle position between `prev` and `next`:
//!
//! ```text
//! cost = d(prev, c) + d(c, next) - d(prev, next)
//! ```
//!
//! and insert the pair with the smallest cost. Candidates are enumerated
//! city-major (ascending city index), position-minor (ascending position);
//! the first strict minimum wins, which makes the result reproducible.
//!
//! # Complexity
//!
//! O(n²) candidates per insertion, O(n³) overall.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use rand::RngCore;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::{TourConstructor, TourResult};

use super::nearest_neighbor::check_start;

/// Constructs a tour by repeatedly inserting the cheapest city/position pair.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::cheapest_insertion;
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let result = cheapest_insertion(&dm, 0).unwrap();
/// assert!((result.distance - 4.0).abs() < 1e-10);
/// ```
pub fn cheapest_insertion(distances: &DistanceMatrix, start: usize) -> Result<TourResult> {
    let n = distances.size();
    check_start(start, n)?;

    let mut cycle = Vec::with_capacity(n);
    cycle.push(start);
    let mut inserted = vec![false; n];
    inserted[start] = true;

    while cycle.len() < n {
        let mut best: Option<(usize, usize, f64)> = None;
        for city in (0..n).filter(|&c| !inserted[c]) {
            for pos in 0..cycle.len() {
                let prev = cycle[pos];
                let next = cycle[(pos + 1) % cycle.len()];
                let cost = insertion_cost(distances, prev, city, next);
                match best {
                    Some((_, _, bc)) if cost >= bc => {}
                    _ => best = Some((city, pos, cost)),
                }
            }
        }
        let Some((city, pos, _)) = best else { break };
        cycle.insert(pos + 1, city);
        inserted[city] = true;
    }

    let distance = distances.tour_length(&cycle);
    Ok(TourResult::new(distance, cycle))
}

/// Runs [`cheapest_insertion`] from every start city and keeps the shortest
/// tour (the first one found on ties).
pub fn cheapest_insertion_best_start(distances: &DistanceMatrix) -> Result<TourResult> {
    let mut best = cheapest_insertion(distances, 0)?;
    for start in 1..distances.size() {
        best = best.better_of(cheapest_insertion(distances, start)?);
    }
    Ok(best)
}

/// Extra length from placing `city` between `prev` and `next`.
#[inline]
pub(crate) fn insertion_cost(distances: &DistanceMatrix, prev: usize, city: usize, next: usize) -> f64 {
    distances.get(prev, city) + distances.get(city, next) - distances.get(prev, next)
}

/// Cheapest insertion as a [`TourConstructor`].
///
/// `start = None` runs the best-start variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestInsertion {
    /// Start city, or `None` to try every city.
    pub start: Option<usize>,
}

impl CheapestInsertion {
    /// Cheapest insertion seeded with a fixed city.
    pub fn from_start(start: usize) -> Self {
        Self { start: Some(start) }
    }

    /// Cheapest insertion from every start city.
    pub fn best_start() -> Self {
        Self { start: None }
    }
}

impl TourConstructor for CheapestInsertion {
    fn name(&self) -> &str {
        "cheapest_insertion"
    }

    fn construct(&self, distances: &DistanceMatrix, _rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        let result = match self.start {
            Some(start) => cheapest_insertion(distances, start)?,
            None => cheapest_insertion_best_start(distances)?,
        };
        Ok(result.tour)
    }
}
