//! Genetic / memetic algorithm configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Recombination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverMethod {
    /// One cut point; prefix of one parent, rest in the other parent's order.
    CutFill,
    /// Partially mapped crossover.
    Pmx,
    /// Segment of parent 1, gaps filled in order from parents 2 and 3.
    Triple,
}

impl CrossoverMethod {
    /// Number of parents the operator consumes.
    pub fn arity(self) -> usize {
        match self {
            Self::CutFill | Self::Pmx => 2,
            Self::Triple => 3,
        }
    }
}

/// Mutation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationMethod {
    /// Exchange two random positions.
    Swap,
    /// Reverse a random segment.
    Inversion,
    /// Exchange the successors of two random positions.
    EdgeRecombination,
}

/// Configuration for the genetic algorithm and its memetic variant.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::{CrossoverMethod, GaConfig, MutationMethod};
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_generations(100)
///     .with_crossover(CrossoverMethod::Pmx)
///     .with_mutation(MutationMethod::Inversion);
/// assert!(!config.local_search);
/// assert!(GaConfig::memetic().local_search);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals kept each generation.
    pub population_size: usize,
    /// Number of generations.
    pub generations: usize,
    /// Fraction of `population_size` drawn as parents each generation.
    pub crossover_rate: f64,
    /// Probability that an offspring is mutated.
    pub mutation_rate: f64,
    /// Fraction of the next generation taken as the best of the pool; the
    /// rest is sampled from the previous generation.
    pub elite_fraction: f64,
    /// Recombination operator.
    pub crossover: CrossoverMethod,
    /// Mutation operator.
    pub mutation: MutationMethod,
    /// Apply 2-opt to every offspring (memetic algorithm).
    pub local_search: bool,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            crossover_rate: 0.9,
            mutation_rate: 0.2,
            elite_fraction: 0.8,
            crossover: CrossoverMethod::Triple,
            mutation: MutationMethod::EdgeRecombination,
            local_search: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Memetic preset: defaults plus 2-opt on every offspring.
    pub fn memetic() -> Self {
        Self {
            local_search: true,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
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

    /// Sets the elite fraction.
    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, method: CrossoverMethod) -> Self {
        self.crossover = method;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, method: MutationMethod) -> Self {
        self.mutation = method;
        self
    }

    /// Enables or disables 2-opt on offspring.
    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
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
        check_unit("crossover_rate", self.crossover_rate)?;
        check_unit("mutation_rate", self.mutation_rate)?;
        check_unit("elite_fraction", self.elite_fraction)?;
        Ok(())
    }
}

pub(crate) fn check_unit(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(TspError::invalid_parameter(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}
