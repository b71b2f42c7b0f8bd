//! Ant System for the symmetric TSP.
//!
//! # Algorithm
//!
//! Each iteration, `n_ants` ants build tours from city 0. An ant at city `i`
//! moves to an unvisited city `j` with probability proportional to
//! `τ(i,j)^α · η(i,j)^β`, where `η = 1 / d(i,j)`. Once every ant has
//! finished, all trails evaporate by `(1 - ρ)` and each ant deposits
//! `Q / L` on every edge of its closed tour, `L` being the tour length. The
//! shortest tour seen over all ants and iterations is returned.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system: optimization
//! by a colony of cooperating agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use log::{debug, trace};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::{Result, TspError};
use crate::ga::check_unit;
use crate::models::{SearchResult, TourConstructor, TourResult};
use crate::random::rng_from;

use super::pheromone::PheromoneMatrix;

/// Distances below this are clamped when computing visibility, so that
/// coincident cities get a large but finite attraction.
const MIN_DISTANCE: f64 = 1e-10;

/// Configuration for ant colony optimization.
///
/// # Examples
///
/// ```
/// use u_tsp::aco::AcoConfig;
///
/// let config = AcoConfig::default().with_n_ants(20).with_rho(0.1);
/// assert!(config.validate().is_ok());
/// assert!(AcoConfig::default().with_rho(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Ants per iteration.
    pub n_ants: usize,
    /// Number of iterations.
    pub iterations: usize,
    /// Pheromone exponent.
    pub alpha: f64,
    /// Visibility exponent.
    pub beta: f64,
    /// Evaporation rate in `[0, 1]`.
    pub rho: f64,
    /// Deposit constant.
    pub q: f64,
    /// Starting pheromone on every edge.
    pub initial_pheromone: f64,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 10,
            iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.5,
            q: 100.0,
            initial_pheromone: 1.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants.
    pub fn with_n_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the visibility exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the deposit constant.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.n_ants == 0 {
            return Err(TspError::invalid_parameter("n_ants must be at least 1"));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TspError::invalid_parameter(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        check_unit("rho", self.rho)?;
        for (name, value) in [("q", self.q), ("initial_pheromone", self.initial_pheromone)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TspError::invalid_parameter(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Builds one ant's tour from `start`.
///
/// The next city is drawn by roulette over `τ^α · η^β`. If the weights
/// cannot be normalized the draw is uniform over the unvisited cities.
pub fn construct_ant_tour<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    alpha: f64,
    beta: f64,
    start: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = distances.size();
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = start;
    visited[current] = true;
    tour.push(current);

    let mut weights: Vec<(usize, f64)> = Vec::with_capacity(n);
    while tour.len() < n {
        weights.clear();
        for city in (0..n).filter(|&c| !visited[c]) {
            let eta = 1.0 / distances.get(current, city).max(MIN_DISTANCE);
            let w = pheromone.get(current, city).powf(alpha) * eta.powf(beta);
            weights.push((city, w));
        }
        let total: f64 = weights.iter().map(|(_, w)| w).sum();

        let next = if total.is_finite() && total > 0.0 {
            let r = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            let mut chosen = weights[weights.len() - 1].0;
            for &(city, w) in &weights {
                cumulative += w;
                if r < cumulative {
                    chosen = city;
                    break;
                }
            }
            chosen
        } else {
            trace!("aco: degenerate weights at city {current}, drawing uniformly");
            weights[rng.random_range(0..weights.len())].0
        };

        visited[next] = true;
        tour.push(next);
        current = next;
    }
    tour
}

/// Runs ant colony optimization, seeding its generator from the configuration.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::aco::{ant_colony, AcoConfig};
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let result = ant_colony(&dm, &AcoConfig::default().with_iterations(10).with_seed(4)).unwrap();
/// assert!((result.best.distance - 4.0).abs() < 1e-10);
/// ```
pub fn ant_colony(distances: &DistanceMatrix, config: &AcoConfig) -> Result<SearchResult> {
    let mut rng = rng_from(config.seed);
    ant_colony_with_rng(distances, config, &mut rng)
}

/// Runs ant colony optimization with a caller-supplied generator.
pub fn ant_colony_with_rng<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    config: &AcoConfig,
    rng: &mut R,
) -> Result<SearchResult> {
    config.validate()?;
    let n = distances.size();
    check_city_count(n)?;
    debug!(
        "aco: n={n} ants={} iterations={} alpha={} beta={} rho={} q={}",
        config.n_ants, config.iterations, config.alpha, config.beta, config.rho, config.q
    );

    let mut pheromone = PheromoneMatrix::new(n, config.initial_pheromone);
    let mut best: Option<TourResult> = None;
    let mut history = Vec::with_capacity(config.iterations);

    for iteration in 0..config.iterations {
        let ants: Vec<TourResult> = (0..config.n_ants)
            .map(|_| {
                let tour = construct_ant_tour(distances, &pheromone, config.alpha, config.beta, 0, rng);
                TourResult::new(distances.tour_length(&tour), tour)
            })
            .collect();

        for ant in &ants {
            if best.as_ref().is_none_or(|b| ant.distance < b.distance) {
                trace!("aco: iteration {iteration} new best {:.4}", ant.distance);
                best = Some(ant.clone());
            }
        }

        pheromone.evaporate(config.rho);
        for ant in &ants {
            pheromone.deposit(&ant.tour, config.q / ant.distance.max(MIN_DISTANCE));
        }
        if let Some(b) = &best {
            history.push(b.distance);
        }
    }

    // with zero iterations the colony has not moved; report the identity tour
    let best = best.unwrap_or_else(|| {
        let tour: Vec<usize> = (0..n).collect();
        TourResult::new(distances.tour_length(&tour), tour)
    });
    debug!("aco: best={:.4}", best.distance);
    Ok(SearchResult {
        best,
        history,
        iterations: config.iterations,
    })
}

/// Ant colony optimization as a [`TourConstructor`].
#[derive(Debug, Clone, Default)]
pub struct AntColony {
    /// Run parameters; the seed is ignored in favour of the caller's generator.
    pub config: AcoConfig,
}

impl AntColony {
    /// Creates the constructor from a configuration.
    pub fn new(config: AcoConfig) -> Self {
        Self { config }
    }
}

impl TourConstructor for AntColony {
    fn name(&self) -> &str {
        "ant_colony"
    }

    fn construct(&self, distances: &DistanceMatrix, rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        ant_colony_with_rng(distances, &self.config, rng).map(|r| r.best.tour)
    }
}
