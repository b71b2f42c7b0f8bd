//! Uniform random tour, used as a baseline and as a seed for local search.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::{TourConstructor, TourResult};

use super::nearest_neighbor::check_start;

/// Returns a uniformly random tour: a random start city followed by a
/// random ordering of the remaining cities.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::random_tour;
/// use u_tsp::random::create_rng;
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
/// let result = random_tour(&dm, &mut create_rng(3)).unwrap();
/// assert_eq!(result.tour.len(), 3);
/// ```
pub fn random_tour<R: Rng + ?Sized>(distances: &DistanceMatrix, rng: &mut R) -> Result<TourResult> {
    let n = distances.size();
    check_start(0, n)?;
    let tour = random_permutation(n, rng);
    let distance = distances.tour_length(&tour);
    Ok(TourResult::new(distance, tour))
}

/// Uniform random permutation of `0..n`.
pub(crate) fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let start = rng.random_range(0..n);
    let mut tour = Vec::with_capacity(n);
    tour.push(start);
    let mut rest: Vec<usize> = (0..n).filter(|&c| c != start).collect();
    rest.shuffle(rng);
    tour.extend(rest);
    tour
}

/// Random tour as a [`TourConstructor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTour;

impl TourConstructor for RandomTour {
    fn name(&self) -> &str {
        "random_tour"
    }

    fn construct(&self, distances: &DistanceMatrix, rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        random_tour(distances, rng).map(|r| r.tour)
    }
}
