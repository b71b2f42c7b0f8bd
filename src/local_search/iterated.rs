//! Iterated local search (ILS).
//!
//! Repeatedly kicks the best tour with a [`double_bridge`] move, re-optimizes
//! it with 2-opt, and keeps the result only if it is strictly shorter. The
//! search stops after `max_no_improvement` consecutive kicks without
//! improvement.

use log::{debug, trace};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::{Result, TspError};
use crate::evaluation::validate_tour;
use crate::models::{SearchResult, TourImprover, TourResult};
use crate::random::rng_from;

use super::double_bridge::double_bridge;
use super::two_opt::{two_opt_improve, two_opt_in_place, IMPROVEMENT_EPS};

/// Configuration for iterated local search.
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::IlsConfig;
///
/// let config = IlsConfig::default().with_max_no_improvement(20).with_seed(3);
/// assert_eq!(config.max_no_improvement, 20);
/// assert_eq!(config.seed, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlsConfig {
    /// Consecutive non-improving kicks before stopping.
    pub max_no_improvement: usize,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            max_no_improvement: 50,
            seed: None,
        }
    }
}

impl IlsConfig {
    /// Sets the stall limit.
    pub fn with_max_no_improvement(mut self, n: usize) -> Self {
        self.max_no_improvement = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_no_improvement == 0 {
            return Err(TspError::invalid_parameter(
                "max_no_improvement must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Runs iterated local search from `initial`, seeding its own generator
/// from the configuration.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{iterated_local_search, IlsConfig};
///
/// let dm = DistanceMatrix::from_coords(&[
///     (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.5, 2.0),
/// ]).unwrap();
/// let config = IlsConfig::default().with_max_no_improvement(10).with_seed(42);
/// let result = iterated_local_search(&dm, &[0, 2, 4, 1, 3], &config).unwrap();
/// assert_eq!(result.best.tour.len(), 5);
/// ```
pub fn iterated_local_search(
    distances: &DistanceMatrix,
    initial: &[usize],
    config: &IlsConfig,
) -> Result<SearchResult> {
    let mut rng = rng_from(config.seed);
    iterated_local_search_with_rng(distances, initial, config, &mut rng)
}

/// Runs iterated local search with a caller-supplied generator.
pub fn iterated_local_search_with_rng<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    initial: &[usize],
    config: &IlsConfig,
    rng: &mut R,
) -> Result<SearchResult> {
    config.validate()?;
    check_city_count(distances.size())?;
    validate_tour(initial, distances.size())?;
    debug!(
        "ils: n={} max_no_improvement={}",
        distances.size(),
        config.max_no_improvement
    );

    let mut best: TourResult = two_opt_improve(initial, distances);
    let mut history = vec![best.distance];
    let mut stall = 0;
    let mut iterations = 0;

    while stall < config.max_no_improvement {
        iterations += 1;
        let mut candidate = double_bridge(&best.tour, rng);
        two_opt_in_place(&mut candidate, distances);
        let distance = distances.tour_length(&candidate);

        if distance < best.distance - IMPROVEMENT_EPS {
            trace!("ils: iteration {iterations} improved to {distance:.4}");
            best = TourResult::new(distance, candidate);
            stall = 0;
        } else {
            stall += 1;
        }
        history.push(best.distance);
    }

    debug!("ils: finished after {iterations} kicks, best={:.4}", best.distance);
    Ok(SearchResult {
        best,
        history,
        iterations,
    })
}

/// Iterated local search as a [`TourImprover`].
#[derive(Debug, Clone, Default)]
pub struct IteratedLocalSearch {
    /// Search parameters; the seed is ignored in favour of the caller's generator.
    pub config: IlsConfig,
}

impl IteratedLocalSearch {
    /// Creates the improver from a configuration.
    pub fn new(config: IlsConfig) -> Self {
        Self { config }
    }
}

impl TourImprover for IteratedLocalSearch {
    fn name(&self) -> &str {
        "iterated_local_search"
    }

    fn improve(
        &self,
        distances: &DistanceMatrix,
        tour: Vec<usize>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        iterated_local_search_with_rng(distances, &tour, &self.config, rng).map(|r| r.best.tour)
    }
}
