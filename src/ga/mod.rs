//! Genetic and memetic algorithms over permutation tours.
//!
//! - [`GaConfig`] — population, rates and operator choice
//! - [`crossover`] — cut-and-fill, PMX and three-parent recombination
//! - [`mutate`] — swap, inversion and successor-exchange mutation
//! - [`roulette_select`] / [`survivor_selection`] — fitness-proportional
//!   parent choice and elitist replacement
//! - [`genetic_algorithm`] / [`memetic_algorithm`] — the generational loop,
//!   the latter with 2-opt on every offspring

mod config;
mod crossover;
mod mutation;
mod runner;
mod selection;

pub use config::{CrossoverMethod, GaConfig, MutationMethod};
pub use crossover::{crossover, cut_fill_crossover, pmx_crossover, triple_crossover};
pub use mutation::{edge_recombination_mutation, inversion_mutation, mutate, swap_mutation};
pub use runner::{genetic_algorithm, genetic_algorithm_with_rng, memetic_algorithm, GeneticAlgorithm};
pub use selection::{fitness_probabilities, roulette_select, survivor_selection};

pub(crate) use config::check_unit;
