//! Generational loop shared by the genetic and memetic algorithms.
//!
//! # Algorithm
//!
//! 1. Start from `population_size` random tours.
//! 2. Each generation draws `crossover_rate * population_size` parents by
//!    roulette selection (rounded down to a multiple of the crossover
//!    arity) and recombines them in consecutive groups.
//! 3. Each offspring is mutated with probability `mutation_rate` and, in
//!    the memetic variant, improved by 2-opt.
//! 4. Offspring and parents form the pool; the next generation takes the
//!    best `elite_fraction` of the pool and fills the rest with random
//!    members of the current generation.
//!
//! # Reference
//!
//! Moscato, P. (1989). "On evolution, search, optimization, genetic
//! algorithms and martial arts: towards memetic algorithms", Caltech C3P
//! Report 826.

use log::{debug, trace};
use rand::{Rng, RngCore};

use crate::constructive::random_permutation;
use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::Result;
use crate::local_search::two_opt_in_place;
use crate::models::{PopulationResult, TourConstructor, TourResult};
use crate::random::rng_from;

use super::config::GaConfig;
use super::crossover::crossover;
use super::mutation::mutate;
use super::selection::{fitness_probabilities, roulette_select, survivor_selection};

/// Runs the genetic algorithm, seeding its generator from the configuration.
///
/// Set `config.local_search` (or use [`GaConfig::memetic`]) for the memetic
/// variant.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::ga::{genetic_algorithm, GaConfig};
///
/// let coords: Vec<(f64, f64)> = (0..8).map(|k| (k as f64, (k % 2) as f64)).collect();
/// let dm = DistanceMatrix::from_coords(&coords).unwrap();
/// let config = GaConfig::default().with_population_size(20).with_generations(30).with_seed(5);
/// let result = genetic_algorithm(&dm, &config).unwrap();
/// assert_eq!(result.population.len(), 20);
/// assert_eq!(result.history.len(), 31);
/// ```
pub fn genetic_algorithm(distances: &DistanceMatrix, config: &GaConfig) -> Result<PopulationResult> {
    let mut rng = rng_from(config.seed);
    genetic_algorithm_with_rng(distances, config, &mut rng)
}

/// Runs the memetic algorithm: `config` with 2-opt forced on.
pub fn memetic_algorithm(distances: &DistanceMatrix, config: &GaConfig) -> Result<PopulationResult> {
    let config = config.clone().with_local_search(true);
    genetic_algorithm(distances, &config)
}

/// Runs the genetic algorithm with a caller-supplied generator.
pub fn genetic_algorithm_with_rng<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    config: &GaConfig,
    rng: &mut R,
) -> Result<PopulationResult> {
    config.validate()?;
    let n = distances.size();
    check_city_count(n)?;
    let size = config.population_size;
    let arity = config.crossover.arity();
    let n_parents = (config.crossover_rate * size as f64) as usize / arity * arity;
    debug!(
        "ga: n={n} population={size} generations={} parents={n_parents} crossover={:?} mutation={:?} local_search={}",
        config.generations, config.crossover, config.mutation, config.local_search
    );

    let mut population: Vec<TourResult> = (0..size)
        .map(|_| {
            let tour = random_permutation(n, rng);
            TourResult::new(distances.tour_length(&tour), tour)
        })
        .collect();
    let mut best = fittest(&population).clone();
    let mut history = Vec::with_capacity(config.generations + 1);
    history.push(best.distance);

    for generation in 0..config.generations {
        let lengths: Vec<f64> = population.iter().map(|r| r.distance).collect();
        let probabilities = fitness_probabilities(&lengths);
        let parents: Vec<&TourResult> = (0..n_parents)
            .map(|_| &population[roulette_select(&probabilities, rng)])
            .collect();

        let mut pool = Vec::with_capacity(2 * n_parents);
        for group in parents.chunks(arity) {
            let tours: Vec<&[usize]> = group.iter().map(|p| p.tour.as_slice()).collect();
            for mut child in crossover(config.crossover, &tours, rng)? {
                if rng.random::<f64>() < config.mutation_rate {
                    mutate(config.mutation, &mut child, rng)?;
                }
                if config.local_search {
                    two_opt_in_place(&mut child, distances);
                }
                pool.push(TourResult::new(distances.tour_length(&child), child));
            }
        }
        pool.extend(parents.into_iter().cloned());

        population = survivor_selection(pool, &population, size, config.elite_fraction, rng);
        let leader = fittest(&population);
        if leader.distance < best.distance {
            trace!("ga: generation {generation} new best {:.4}", leader.distance);
            best = leader.clone();
        }
        history.push(best.distance);
    }

    population.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    debug!("ga: best={:.4}", best.distance);
    Ok(PopulationResult {
        best,
        population,
        history,
    })
}

/// Shortest tour of a non-empty population.
fn fittest(population: &[TourResult]) -> &TourResult {
    population
        .iter()
        .reduce(|a, b| if b.distance < a.distance { b } else { a })
        .unwrap_or(&population[0])
}

/// Genetic (or memetic) algorithm as a [`TourConstructor`].
#[derive(Debug, Clone, Default)]
pub struct GeneticAlgorithm {
    /// Run parameters; the seed is ignored in favour of the caller's generator.
    pub config: GaConfig,
}

impl GeneticAlgorithm {
    /// Creates the constructor from a configuration.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }
}

impl TourConstructor for GeneticAlgorithm {
    fn name(&self) -> &str {
        if self.config.local_search {
            "memetic_algorithm"
        } else {
            "genetic_algorithm"
        }
    }

    fn construct(&self, distances: &DistanceMatrix, rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        genetic_algorithm_with_rng(distances, &self.config, rng).map(|r| r.best.tour)
    }
}
