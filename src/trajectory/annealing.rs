//! Simulated annealing with a random-swap neighbourhood.
//!
//! # Algorithm
//!
//! Each iteration swaps two random positions of the current tour. Shorter
//! tours are always accepted; longer ones with probability
//! `exp((current - candidate) / T)` (Metropolis criterion). The temperature
//! decays geometrically, `T *= cooling_rate`, after every iteration. The
//! best tour ever visited is returned even if the walk later moves away
//! from it.
//!
//! Distances feed the exponent directly, so the initial temperature has to
//! be on the scale of typical edge lengths of the instance.
//!
//! # Reference
//!
//! Kirkpatrick, S., Gelatt, C.D. & Vecchi, M.P. (1983). "Optimization by
//! simulated annealing", *Science* 220(4598), 671-680.

use log::{debug, trace};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::{Result, TspError};
use crate::evaluation::validate_tour;
use crate::models::{SearchResult, TourImprover, TourResult};
use crate::random::rng_from;

/// Configuration for simulated annealing.
///
/// # Examples
///
/// ```
/// use u_tsp::trajectory::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.995)
///     .with_max_iterations(2_000);
/// assert!(config.validate().is_ok());
/// assert!(SaConfig::default().with_cooling_rate(1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaConfig {
    /// Starting temperature, in distance units.
    pub initial_temperature: f64,
    /// Geometric cooling factor in `(0, 1)`.
    pub cooling_rate: f64,
    /// Number of iterations.
    pub max_iterations: usize,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.99,
            max_iterations: 10_000,
            seed: None,
        }
    }
}

impl SaConfig {
    /// Sets the initial temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(TspError::invalid_parameter(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(TspError::invalid_parameter(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}

/// Metropolis acceptance test.
///
/// Improvements are always accepted. With a temperature that has decayed to
/// zero only improvements pass.
pub fn accept<R: Rng + ?Sized>(current: f64, candidate: f64, temperature: f64, rng: &mut R) -> bool {
    if candidate < current {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    rng.random::<f64>() < ((current - candidate) / temperature).exp()
}

/// Runs simulated annealing from `initial`.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::trajectory::{simulated_annealing, SaConfig};
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let config = SaConfig::default().with_initial_temperature(1.0).with_max_iterations(500).with_seed(1);
/// let result = simulated_annealing(&dm, &[0, 2, 1, 3], &config).unwrap();
/// assert!((result.best.distance - 4.0).abs() < 1e-10);
/// ```
pub fn simulated_annealing(
    distances: &DistanceMatrix,
    initial: &[usize],
    config: &SaConfig,
) -> Result<SearchResult> {
    let mut rng = rng_from(config.seed);
    simulated_annealing_with_rng(distances, initial, config, &mut rng)
}

/// Runs simulated annealing with a caller-supplied generator.
pub fn simulated_annealing_with_rng<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    initial: &[usize],
    config: &SaConfig,
    rng: &mut R,
) -> Result<SearchResult> {
    config.validate()?;
    let n = distances.size();
    check_city_count(n)?;
    validate_tour(initial, n)?;
    debug!(
        "sa: n={n} t0={} cooling={} iterations={}",
        config.initial_temperature, config.cooling_rate, config.max_iterations
    );

    let mut current = initial.to_vec();
    let mut current_distance = distances.tour_length(&current);
    let mut best = TourResult::new(current_distance, current.clone());
    let mut temperature = config.initial_temperature;
    let mut history = Vec::with_capacity(config.max_iterations + 1);
    history.push(best.distance);

    for iteration in 0..config.max_iterations {
        let i = rng.random_range(0..n);
        let mut j = rng.random_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        current.swap(i, j);
        let candidate_distance = distances.tour_length(&current);

        if accept(current_distance, candidate_distance, temperature, rng) {
            current_distance = candidate_distance;
            if current_distance < best.distance {
                trace!("sa: iteration {iteration} new best {current_distance:.4} at T={temperature:.4}");
                best = TourResult::new(current_distance, current.clone());
            }
        } else {
            current.swap(i, j);
        }

        temperature *= config.cooling_rate;
        history.push(best.distance);
    }

    debug!("sa: best={:.4} final T={temperature:.6}", best.distance);
    Ok(SearchResult {
        best,
        history,
        iterations: config.max_iterations,
    })
}

/// Simulated annealing as a [`TourImprover`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealing {
    /// Search parameters; the seed is ignored in favour of the caller's generator.
    pub config: SaConfig,
}

impl SimulatedAnnealing {
    /// Creates the improver from a configuration.
    pub fn new(config: SaConfig) -> Self {
        Self { config }
    }
}

impl TourImprover for SimulatedAnnealing {
    fn name(&self) -> &str {
        "simulated_annealing"
    }

    fn improve(
        &self,
        distances: &DistanceMatrix,
        tour: Vec<usize>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        simulated_annealing_with_rng(distances, &tour, &self.config, rng).map(|r| r.best.tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::is_valid_tour;
    use crate::random::create_rng;

    fn circle(n: usize) -> DistanceMatrix {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|k| {
                let a = k as f64 / n as f64 * std::f64::consts::TAU;
                (10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect();
        DistanceMatrix::from_coords(&coords).expect("valid")
    }

    #[test]
    fn test_accept_improvement_always() {
        let mut rng = create_rng(0);
        assert!(accept(10.0, 9.0, 0.0, &mut rng));
        assert!(!accept(10.0, 11.0, 0.0, &mut rng));
    }

    #[test]
    fn test_accept_worse_at_high_temperature() {
        let mut rng = create_rng(1);
        let accepted = (0..1000).filter(|_| accept(10.0, 11.0, 1e6, &mut rng)).count();
        assert!(accepted > 990);
    }

    #[test]
    fn test_best_never_worse_than_initial() {
        let dm = circle(15);
        let initial: Vec<usize> = (0..15).map(|k| (k * 7) % 15).collect();
        let config = SaConfig::default()
            .with_initial_temperature(5.0)
            .with_max_iterations(3_000)
            .with_seed(3);
        let result = simulated_annealing(&dm, &initial, &config).expect("valid");
        assert!(result.best.distance <= dm.tour_length(&initial));
        assert!(is_valid_tour(&result.best.tour, 15));
        assert!((result.best.distance - dm.tour_length(&result.best.tour)).abs() < 1e-9);
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_deterministic_given_seed() {
        let dm = circle(10);
        let initial: Vec<usize> = (0..10).rev().collect();
        let config = SaConfig::default().with_max_iterations(500).with_seed(12);
        let a = simulated_annealing(&dm, &initial, &config).expect("valid");
        let b = simulated_annealing(&dm, &initial, &config).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_parameters() {
        let dm = circle(5);
        let initial = vec![0, 1, 2, 3, 4];
        let bad_t = SaConfig::default().with_initial_temperature(0.0);
        assert!(simulated_annealing(&dm, &initial, &bad_t).is_err());
        let bad_rate = SaConfig::default().with_cooling_rate(0.0);
        assert!(simulated_annealing(&dm, &initial, &bad_rate).is_err());
        assert!(simulated_annealing(&dm, &[0, 1, 2], &SaConfig::default()).is_err());
    }

    #[test]
    fn test_single_city_rejected() {
        let dm = DistanceMatrix::new(1);
        let config = SaConfig::default().with_seed(1);
        assert!(matches!(
            simulated_annealing(&dm, &[0], &config),
            Err(TspError::InvalidInput(_))
        ));
    }
}
