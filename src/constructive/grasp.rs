//! GRASP: greedy randomized adaptive search procedure.
//!
//! # Algorithm
//!
//! Construction extends a path from city 0. At each step the unvisited
//! cities whose distance from the current city lies within
//! `[min, min + alpha * (max - min)]` form the restricted candidate list
//! (RCL), and the next city is drawn uniformly from it. `alpha = 0` is
//! pure greedy, `alpha = 1` is pure random.
//!
//! The multi-start procedure repeats construction followed by 2-opt and
//! keeps the best tour.
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy randomized adaptive search
//! procedures", *Journal of Global Optimization* 6, 109-133.

use log::{debug, trace};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::local_search::two_opt_improve;
use crate::models::{TourConstructor, TourResult};
use crate::random::rng_from;

use super::nearest_neighbor::check_start;

/// Configuration for multi-start GRASP.
///
/// # Examples
///
/// ```
/// use u_tsp::constructive::GraspConfig;
///
/// let config = GraspConfig::default().with_alpha(0.3).with_iterations(10);
/// assert_eq!(config.alpha, 0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraspConfig {
    /// Greediness in `[0, 1]`; 0 is greedy, 1 is random.
    pub alpha: f64,
    /// Number of construction + 2-opt rounds.
    pub iterations: usize,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            iterations: 50,
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets alpha.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the number of rounds.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        check_alpha(self.alpha)?;
        if self.iterations == 0 {
            return Err(TspError::invalid_parameter("iterations must be at least 1"));
        }
        Ok(())
    }
}

fn check_alpha(alpha: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(TspError::invalid_parameter(format!(
            "alpha must be in [0, 1], got {alpha}"
        )));
    }
    Ok(())
}

/// Builds the restricted candidate list for the next step.
///
/// Keeps every city in `remaining` with
/// `d(current, c) - min <= alpha * (max - min)`. When all distances are
/// equal the list holds every remaining city. Order follows `remaining`.
pub fn restricted_candidate_list(
    distances: &DistanceMatrix,
    current: usize,
    remaining: &[usize],
    alpha: f64,
) -> Vec<usize> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &c in remaining {
        let d = distances.get(current, c);
        min = min.min(d);
        max = max.max(d);
    }
    if remaining.len() > 1 && max == min {
        trace!("grasp: {} candidates at equal distance", remaining.len());
    }
    let span = alpha * (max - min);
    remaining
        .iter()
        .copied()
        .filter(|&c| distances.get(current, c) - min <= span)
        .collect()
}

/// One greedy randomized construction starting from city 0.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::{grasp_construction, nearest_neighbor};
/// use u_tsp::random::create_rng;
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (5.0, 0.0), (1.0, 0.0), (2.5, 0.5)]).unwrap();
/// // alpha = 0 reduces to nearest neighbour from city 0
/// let greedy = grasp_construction(&dm, 0.0, &mut create_rng(1)).unwrap();
/// assert_eq!(greedy.tour, nearest_neighbor(&dm, 0).unwrap().tour);
/// ```
pub fn grasp_construction<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    alpha: f64,
    rng: &mut R,
) -> Result<TourResult> {
    let n = distances.size();
    check_start(0, n)?;
    check_alpha(alpha)?;

    let mut remaining: Vec<usize> = (1..n).collect();
    let mut tour = Vec::with_capacity(n);
    tour.push(0);

    while !remaining.is_empty() {
        let current = tour[tour.len() - 1];
        let rcl = restricted_candidate_list(distances, current, &remaining, alpha);
        let next = rcl[rng.random_range(0..rcl.len())];
        tour.push(next);
        remaining.retain(|&c| c != next);
    }

    let distance = distances.tour_length(&tour);
    Ok(TourResult::new(distance, tour))
}

/// Multi-start GRASP: `iterations` rounds of construction + 2-opt.
pub fn grasp(distances: &DistanceMatrix, config: &GraspConfig) -> Result<TourResult> {
    let mut rng = rng_from(config.seed);
    grasp_with_rng(distances, config, &mut rng)
}

/// Multi-start GRASP with a caller-supplied generator.
pub fn grasp_with_rng<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    config: &GraspConfig,
    rng: &mut R,
) -> Result<TourResult> {
    config.validate()?;
    debug!(
        "grasp: n={} alpha={} iterations={}",
        distances.size(),
        config.alpha,
        config.iterations
    );

    let mut best: Option<TourResult> = None;
    for round in 0..config.iterations {
        let built = grasp_construction(distances, config.alpha, rng)?;
        let improved = two_opt_improve(&built.tour, distances);
        best = match best {
            Some(b) if improved.distance >= b.distance => Some(b),
            _ => {
                trace!("grasp: round {round} new best {:.4}", improved.distance);
                Some(improved)
            }
        };
    }

    let best = best.ok_or_else(|| TspError::invalid_parameter("iterations must be at least 1"))?;
    debug!("grasp: best={:.4}", best.distance);
    Ok(best)
}

/// GRASP randomized construction (without local search) as a
/// [`TourConstructor`].
#[derive(Debug, Clone, Copy)]
pub struct GraspConstructor {
    /// Greediness in `[0, 1]`.
    pub alpha: f64,
}

impl GraspConstructor {
    /// Creates the constructor with the given alpha.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl TourConstructor for GraspConstructor {
    fn name(&self) -> &str {
        "grasp"
    }

    fn construct(&self, distances: &DistanceMatrix, rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        grasp_construction(distances, self.alpha, rng).map(|r| r.tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor;
    use crate::evaluation::is_valid_tour;
    use crate::random::create_rng;

    fn scattered() -> DistanceMatrix {
        DistanceMatrix::from_coords(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (3.0, 0.0),
            (6.0, 0.0),
            (10.0, 0.0),
            (4.0, 4.0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_rcl_alpha_zero_is_single_nearest() {
        let dm = scattered();
        let rcl = restricted_candidate_list(&dm, 0, &[1, 2, 3, 4, 5], 0.0);
        assert_eq!(rcl, vec![1]);
    }

    #[test]
    fn test_rcl_alpha_one_is_everything() {
        let dm = scattered();
        let remaining = [2, 3, 4, 5];
        let rcl = restricted_candidate_list(&dm, 1, &remaining, 1.0);
        assert_eq!(rcl, remaining.to_vec());
    }

    #[test]
    fn test_rcl_partial() {
        let dm = scattered();
        // distances from 0: 1, 3, 6, 10 -> threshold 1 + 0.5 * 9 = 5.5
        let rcl = restricted_candidate_list(&dm, 0, &[1, 2, 3, 4], 0.5);
        assert_eq!(rcl, vec![1, 2]);
    }

    #[test]
    fn test_rcl_equal_distances_keeps_all() {
        let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, -1.0)])
            .expect("valid");
        let rcl = restricted_candidate_list(&dm, 0, &[1, 2, 3], 0.0);
        assert_eq!(rcl, vec![1, 2, 3]);
    }

    #[test]
    fn test_alpha_zero_matches_nearest_neighbor() {
        let dm = scattered();
        let g = grasp_construction(&dm, 0.0, &mut create_rng(3)).expect("valid");
        assert_eq!(g.tour, nearest_neighbor(&dm, 0).expect("valid").tour);
    }

    #[test]
    fn test_alpha_out_of_range() {
        let dm = scattered();
        assert!(grasp_construction(&dm, 1.5, &mut create_rng(0)).is_err());
        assert!(grasp(&dm, &GraspConfig::default().with_alpha(-0.1)).is_err());
    }

    #[test]
    fn test_multistart_valid_and_deterministic() {
        let dm = scattered();
        let config = GraspConfig::default().with_iterations(10).with_seed(4);
        let a = grasp(&dm, &config).expect("valid");
        let b = grasp(&dm, &config).expect("valid");
        assert_eq!(a, b);
        assert!(is_valid_tour(&a.tour, dm.size()));
        assert!((a.distance - dm.tour_length(&a.tour)).abs() < 1e-9);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_construction_is_permutation(alpha in 0.0f64..=1.0, seed in 0u64..500) {
                let dm = scattered();
                let r = grasp_construction(&dm, alpha, &mut create_rng(seed)).unwrap();
                prop_assert!(is_valid_tour(&r.tour, dm.size()));
            }
        }
    }
}
