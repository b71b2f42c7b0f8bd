//! Fermentation optimization.
//!
//! A population of tours is "fermented" for a fixed number of rounds. Each
//! round converts tour lengths into energies (inverse length, normalized,
//! scaled by a nutrient level that decays linearly from 1 to 0 over the
//! run). Every tour then yields a subproduct by reversing a random segment,
//! which is swap-mutated with probability `mutation_rate` and improved by
//! 2-opt. The subproducts replace the population outright; the best tour
//! ever seen is kept aside.

use log::{debug, trace};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::constructive::random_permutation;
use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::{Result, TspError};
use crate::ga::{check_unit, inversion_mutation, swap_mutation};
use crate::local_search::two_opt_in_place;
use crate::models::{PopulationResult, TourConstructor, TourResult};
use crate::random::rng_from;

/// Configuration for fermentation optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FermentationConfig {
    /// Number of tours fermented together.
    pub population_size: usize,
    /// Number of rounds.
    pub iterations: usize,
    /// Probability that a subproduct is swap-mutated.
    pub mutation_rate: f64,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for FermentationConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            iterations: 10,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

impl FermentationConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of rounds.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
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
        if self.population_size == 0 {
            return Err(TspError::invalid_parameter("population_size must be at least 1"));
        }
        check_unit("mutation_rate", self.mutation_rate)
    }
}

/// Energy of each tour: normalized inverse length scaled by `nutrient`.
///
/// Falls back to an even split when the inverse lengths cannot be
/// normalized.
///
/// # Examples
///
/// ```
/// use u_tsp::fermentation::metabolize;
///
/// let energy = metabolize(&[10.0, 10.0, 20.0], 0.5);
/// assert!((energy.iter().sum::<f64>() - 0.5).abs() < 1e-12);
/// assert!(energy[0] > energy[2]);
/// ```
pub fn metabolize(lengths: &[f64], nutrient: f64) -> Vec<f64> {
    let inverse: Vec<f64> = lengths.iter().map(|&d| 1.0 / d).collect();
    let total: f64 = inverse.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return vec![nutrient / lengths.len() as f64; lengths.len()];
    }
    inverse.into_iter().map(|e| e / total * nutrient).collect()
}

/// Runs fermentation optimization, seeding its generator from the configuration.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::fermentation::{fermentation, FermentationConfig};
///
/// let coords: Vec<(f64, f64)> = (0..9).map(|k| ((k % 3) as f64, (k / 3) as f64)).collect();
/// let dm = DistanceMatrix::from_coords(&coords).unwrap();
/// let result = fermentation(&dm, &FermentationConfig::default().with_seed(2)).unwrap();
/// assert_eq!(result.population.len(), 10);
/// ```
pub fn fermentation(distances: &DistanceMatrix, config: &FermentationConfig) -> Result<PopulationResult> {
    let mut rng = rng_from(config.seed);
    fermentation_with_rng(distances, config, &mut rng)
}

/// Runs fermentation optimization with a caller-supplied generator.
pub fn fermentation_with_rng<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    config: &FermentationConfig,
    rng: &mut R,
) -> Result<PopulationResult> {
    config.validate()?;
    let n = distances.size();
    check_city_count(n)?;
    debug!(
        "fermentation: n={n} population={} iterations={} mutation={}",
        config.population_size, config.iterations, config.mutation_rate
    );

    let mut population: Vec<TourResult> = (0..config.population_size)
        .map(|_| {
            let tour = random_permutation(n, rng);
            TourResult::new(distances.tour_length(&tour), tour)
        })
        .collect();
    let mut best = population
        .iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .cloned()
        .ok_or_else(|| TspError::invalid_parameter("population_size must be at least 1"))?;
    let mut history = Vec::with_capacity(config.iterations + 1);
    history.push(best.distance);

    for round in 0..config.iterations {
        let nutrient = 1.0 - round as f64 / config.iterations as f64;
        let lengths: Vec<f64> = population.iter().map(|r| r.distance).collect();
        let energy = metabolize(&lengths, nutrient);
        trace!(
            "fermentation: round {round} nutrient={nutrient:.3} peak energy={:.4}",
            energy.iter().copied().fold(0.0, f64::max)
        );

        population = population
            .into_iter()
            .map(|organism| {
                let mut tour = organism.tour;
                inversion_mutation(&mut tour, rng);
                if rng.random::<f64>() < config.mutation_rate {
                    swap_mutation(&mut tour, rng);
                }
                two_opt_in_place(&mut tour, distances);
                TourResult::new(distances.tour_length(&tour), tour)
            })
            .collect();

        for organism in &population {
            if organism.distance < best.distance {
                trace!("fermentation: round {round} new best {:.4}", organism.distance);
                best = organism.clone();
            }
        }
        history.push(best.distance);
    }

    population.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    debug!("fermentation: best={:.4}", best.distance);
    Ok(PopulationResult {
        best,
        population,
        history,
    })
}

/// Fermentation optimization as a [`TourConstructor`].
#[derive(Debug, Clone, Default)]
pub struct Fermentation {
    /// Run parameters; the seed is ignored in favour of the caller's generator.
    pub config: FermentationConfig,
}

impl Fermentation {
    /// Creates the constructor from a configuration.
    pub fn new(config: FermentationConfig) -> Self {
        Self { config }
    }
}

impl TourConstructor for Fermentation {
    fn name(&self) -> &str {
        "fermentation"
    }

    fn construct(&self, distances: &DistanceMatrix, rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        fermentation_with_rng(distances, &self.config, rng).map(|r| r.best.tour)
    }
}
