//! Nearest-neighbour constructive heuristic.
//!
//! Starting from a given city, always move to the closest unvisited city;
//! the tour closes back to the start.
//!
//! # Complexity
//!
//! O(n²) for one start, O(n³) for the best-start variant.
//!
//! # Reference
//!
//! The simplest constructive heuristic for the TSP. Solution quality is
//! typically 20-25% above optimal, which makes it a fast baseline and a
//! common seed for local search.

use rand::RngCore;

use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::{Result, TspError};
use crate::models::{TourConstructor, TourResult};

/// Constructs a tour with the nearest-neighbour heuristic.
///
/// Ties between equally close cities go to the lowest city index.
///
/// # Errors
///
/// Fails if `start` is not a city of the matrix.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::nearest_neighbor;
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let result = nearest_neighbor(&dm, 0).unwrap();
/// assert_eq!(result.tour, vec![0, 1, 2, 3]);
/// assert!((result.distance - 4.0).abs() < 1e-10);
/// ```
pub fn nearest_neighbor(distances: &DistanceMatrix, start: usize) -> Result<TourResult> {
    let n = distances.size();
    check_start(start, n)?;

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut tour = Vec::with_capacity(n);
    tour.push(start);
    let mut current = start;

    while tour.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in visited.iter().enumerate() {
            if v {
                continue;
            }
            let d = distances.get(current, i);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        let Some((next, _)) = best else { break };
        visited[next] = true;
        tour.push(next);
        current = next;
    }

    let distance = distances.tour_length(&tour);
    Ok(TourResult::new(distance, tour))
}

/// Runs [`nearest_neighbor`] from every start city and keeps the shortest
/// tour (the first one found on ties).
pub fn nearest_neighbor_best_start(distances: &DistanceMatrix) -> Result<TourResult> {
    let mut best = nearest_neighbor(distances, 0)?;
    for start in 1..distances.size() {
        best = best.better_of(nearest_neighbor(distances, start)?);
    }
    Ok(best)
}

pub(crate) fn check_start(start: usize, n: usize) -> Result<()> {
    check_city_count(n)?;
    if start >= n {
        return Err(TspError::invalid_input(format!(
            "start city {start} out of range for {n} cities"
        )));
    }
    Ok(())
}

/// Nearest neighbour as a [`TourConstructor`].
///
/// `start = None` runs the best-start variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor {
    /// Start city, or `None` to try every city.
    pub start: Option<usize>,
}

impl NearestNeighbor {
    /// Nearest neighbour from a fixed start city.
    pub fn from_start(start: usize) -> Self {
        Self { start: Some(start) }
    }

    /// Nearest neighbour from every start city.
    pub fn best_start() -> Self {
        Self { start: None }
    }
}

impl TourConstructor for NearestNeighbor {
    fn name(&self) -> &str {
        "nearest_neighbor"
    }

    fn construct(&self, distances: &DistanceMatrix, _rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        let result = match self.start {
            Some(start) => nearest_neighbor(distances, start)?,
            None => nearest_neighbor_best_start(distances)?,
        };
        Ok(result.tour)
    }
}
