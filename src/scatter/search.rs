//! Scatter search driver.
//!
//! # Algorithm
//!
//! The reference set starts as `ref_set_size` random tours. Each iteration,
//! every member yields a trial tour: a random segment is inverted, then with
//! probability `crossover_rate` the result is recombined with two other
//! members by three-parent crossover and, with probability `mutation_rate`,
//! mutated. Every trial is improved by 2-opt. With probability
//! `relink_probability` a member is also path-relinked toward another
//! member. Old members and all new tours are merged and the reference set is
//! rebuilt by [`update_reference_set`].
//!
//! # Reference
//!
//! Glover, F., Laguna, M. & Martí, R. (2000). "Fundamentals of scatter
//! search and path relinking", *Control and Cybernetics* 29(3), 653-684.

use log::{debug, trace};
use rand::seq::index::sample;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::constructive::random_permutation;
use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::{Result, TspError};
use crate::ga::{check_unit, edge_recombination_mutation, inversion_mutation, triple_crossover};
use crate::local_search::two_opt_in_place;
use crate::models::{PopulationResult, TourConstructor, TourResult};
use crate::random::rng_from;

use super::reference_set::update_reference_set;
use super::relinking::path_relinking;

/// Configuration for scatter search.
///
/// # Examples
///
/// ```
/// use u_tsp::scatter::ScatterConfig;
///
/// let config = ScatterConfig::default().with_ref_set_size(10).with_relink_probability(0.5);
/// assert!(config.validate().is_ok());
/// assert!(ScatterConfig::default().with_ref_set_size(1).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Target number of tours in the reference set.
    pub ref_set_size: usize,
    /// Number of iterations.
    pub iterations: usize,
    /// Probability that a member is path-relinked each iteration.
    pub relink_probability: f64,
    /// Probability that a trial tour is recombined with two other members.
    pub crossover_rate: f64,
    /// Probability that a recombined trial is mutated.
    pub mutation_rate: f64,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            ref_set_size: 40,
            iterations: 500,
            relink_probability: 0.2,
            crossover_rate: 0.5,
            mutation_rate: 0.2,
            seed: None,
        }
    }
}

impl ScatterConfig {
    /// Sets the reference-set size.
    pub fn with_ref_set_size(mut self, n: usize) -> Self {
        self.ref_set_size = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the path-relinking probability.
    pub fn with_relink_probability(mut self, p: f64) -> Self {
        self.relink_probability = p;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.ref_set_size < 2 {
            return Err(TspError::invalid_parameter(format!(
                "ref_set_size must be at least 2, got {}",
                self.ref_set_size
            )));
        }
        check_unit("relink_probability", self.relink_probability)?;
        check_unit("crossover_rate", self.crossover_rate)?;
        check_unit("mutation_rate", self.mutation_rate)?;
        Ok(())
    }
}

/// Runs scatter search, seeding its generator from the configuration.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::scatter::{scatter_search, ScatterConfig};
///
/// let coords: Vec<(f64, f64)> = (0..10).map(|k| ((k * 7 % 10) as f64, (k * 3 % 10) as f64)).collect();
/// let dm = DistanceMatrix::from_coords(&coords).unwrap();
/// let config = ScatterConfig::default().with_ref_set_size(8).with_iterations(10).with_seed(1);
/// let result = scatter_search(&dm, &config).unwrap();
/// assert_eq!(result.history.len(), 11);
/// ```
pub fn scatter_search(distances: &DistanceMatrix, config: &ScatterConfig) -> Result<PopulationResult> {
    let mut rng = rng_from(config.seed);
    scatter_search_with_rng(distances, config, &mut rng)
}

/// Runs scatter search with a caller-supplied generator.
pub fn scatter_search_with_rng<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    config: &ScatterConfig,
    rng: &mut R,
) -> Result<PopulationResult> {
    config.validate()?;
    let n = distances.size();
    check_city_count(n)?;
    let size = config.ref_set_size;
    debug!(
        "scatter: n={n} ref_set={size} iterations={} relink={} crossover={} mutation={}",
        config.iterations, config.relink_probability, config.crossover_rate, config.mutation_rate
    );

    let initial: Vec<TourResult> = (0..size)
        .map(|_| {
            let tour = random_permutation(n, rng);
            TourResult::new(distances.tour_length(&tour), tour)
        })
        .collect();
    let mut ref_set = update_reference_set(initial, size);
    let mut best = ref_set[0].clone();
    let mut history = Vec::with_capacity(config.iterations + 1);
    history.push(best.distance);

    for iteration in 0..config.iterations {
        let m = ref_set.len();
        let mut candidates = ref_set.clone();

        for idx in 0..m {
            let mut trial = ref_set[idx].tour.clone();
            inversion_mutation(&mut trial, rng);
            if m >= 3 && rng.random::<f64>() < config.crossover_rate {
                let picks = sample(rng, m - 1, 2);
                let other = |k: usize| if k >= idx { k + 1 } else { k };
                trial = triple_crossover(
                    &trial,
                    &ref_set[other(picks.index(0))].tour,
                    &ref_set[other(picks.index(1))].tour,
                    rng,
                )?;
                if rng.random::<f64>() < config.mutation_rate {
                    edge_recombination_mutation(&mut trial, rng)?;
                }
            }
            two_opt_in_place(&mut trial, distances);
            candidates.push(TourResult::new(distances.tour_length(&trial), trial));

            if m >= 2 && rng.random::<f64>() < config.relink_probability {
                let mut guide = rng.random_range(0..m - 1);
                if guide >= idx {
                    guide += 1;
                }
                candidates.push(path_relinking(distances, &ref_set[idx].tour, &ref_set[guide].tour)?);
            }
        }

        ref_set = update_reference_set(candidates, size);
        if ref_set[0].distance < best.distance {
            trace!("scatter: iteration {iteration} new best {:.4}", ref_set[0].distance);
            best = ref_set[0].clone();
        }
        history.push(best.distance);
    }

    debug!("scatter: best={:.4} ref_set={}", best.distance, ref_set.len());
    Ok(PopulationResult {
        best,
        population: ref_set,
        history,
    })
}

/// Scatter search as a [`TourConstructor`].
#[derive(Debug, Clone, Default)]
pub struct ScatterSearch {
    /// Run parameters; the seed is ignored in favour of the caller's generator.
    pub config: ScatterConfig,
}

impl ScatterSearch {
    /// Creates the constructor from a configuration.
    pub fn new(config: ScatterConfig) -> Self {
        Self { config }
    }
}

impl TourConstructor for ScatterSearch {
    fn name(&self) -> &str {
        "scatter_search"
    }

    fn construct(&self, distances: &DistanceMatrix, rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        scatter_search_with_rng(distances, &self.config, rng).map(|r| r.best.tour)
    }
}
