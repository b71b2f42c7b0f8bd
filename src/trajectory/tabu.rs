//! Tabu search over the 2-opt neighbourhood.
//!
//! # Algorithm
//!
//! Every iteration evaluates the full 2-opt neighbourhood of the current
//! tour and applies the best admissible move, even if it makes the tour
//! longer. A move `(i, j)` (reverse `t[i+1..=j]`) is admissible unless it
//! is in the tabu list; a tabu move is still admissible when it would
//! produce a new global best (aspiration). Applied moves enter a FIFO tabu
//! list of fixed capacity, `round(sqrt(n))` by default.
//!
//! The search stops at `max_iterations`, or earlier once at least
//! `patience` iterations failed to improve the global best *and* the
//! relative improvement of the best distance over the last `patience`
//! iterations is below `improvement_threshold`.
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing*
//! 1(3), 190-206.

use std::collections::VecDeque;

use log::{debug, trace};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::{Result, TspError};
use crate::evaluation::validate_tour;
use crate::local_search::{two_opt_delta, IMPROVEMENT_EPS};
use crate::models::{SearchResult, TourImprover, TourResult};

/// Configuration for tabu search.
///
/// # Examples
///
/// ```
/// use u_tsp::trajectory::TabuConfig;
///
/// let config = TabuConfig::default().with_max_iterations(200).with_tenure(5);
/// assert_eq!(config.tenure_for(100), 5);
/// assert_eq!(TabuConfig::default().tenure_for(52), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Hard iteration budget.
    pub max_iterations: usize,
    /// Tabu list capacity; `None` uses `round(sqrt(n))`.
    pub tenure: Option<usize>,
    /// Non-improving iterations tolerated before the threshold test applies
    /// (at least 1).
    pub patience: usize,
    /// Minimum relative improvement over the last `patience` iterations.
    pub improvement_threshold: f64,
    /// Whether a tabu move that yields a new global best is allowed.
    pub aspiration: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tenure: None,
            patience: 50,
            improvement_threshold: 0.01,
            aspiration: true,
        }
    }
}

impl TabuConfig {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Overrides the tabu list capacity.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = Some(tenure);
        self
    }

    /// Sets the patience.
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Sets the relative improvement threshold.
    pub fn with_improvement_threshold(mut self, threshold: f64) -> Self {
        self.improvement_threshold = threshold;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Tabu list capacity for an instance with `n` cities (at least 1).
    pub fn tenure_for(&self, n: usize) -> usize {
        self.tenure
            .unwrap_or_else(|| (n as f64).sqrt().round() as usize)
            .max(1)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.tenure == Some(0) {
            return Err(TspError::invalid_parameter("tenure must be at least 1"));
        }
        if self.patience == 0 {
            return Err(TspError::invalid_parameter("patience must be at least 1"));
        }
        if self.improvement_threshold.is_nan() || self.improvement_threshold < 0.0 {
            return Err(TspError::invalid_parameter(format!(
                "improvement_threshold must be non-negative, got {}",
                self.improvement_threshold
            )));
        }
        Ok(())
    }
}

/// Fixed-capacity FIFO of recently applied 2-opt moves.
#[derive(Debug, Clone)]
pub struct TabuList {
    moves: VecDeque<(usize, usize)>,
    capacity: usize,
}

impl TabuList {
    /// Creates an empty list holding at most `capacity` moves.
    pub fn new(capacity: usize) -> Self {
        Self {
            moves: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a move, evicting the oldest one when full.
    pub fn push(&mut self, mv: (usize, usize)) {
        if self.capacity == 0 {
            return;
        }
        if self.moves.len() == self.capacity {
            self.moves.pop_front();
        }
        self.moves.push_back(mv);
    }

    /// Returns `true` if `(i, j)` or `(j, i)` is tabu.
    pub fn contains(&self, (i, j): (usize, usize)) -> bool {
        self.moves.iter().any(|&m| m == (i, j) || m == (j, i))
    }

    /// Number of moves currently held.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if no move is tabu.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// A candidate 2-opt move with the tour length it would produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabuMove {
    /// Edge positions `(i, j)`; the move reverses `t[i+1..=j]`.
    pub positions: (usize, usize),
    /// Tour length after the move.
    pub distance: f64,
}

/// Picks the best admissible 2-opt move of `tour`.
///
/// Returns `None` when every move is tabu and none qualifies for
/// aspiration (or the tour is too short to have any move).
pub fn select_move(
    distances: &DistanceMatrix,
    tour: &[usize],
    current_distance: f64,
    best_distance: f64,
    tabu: &TabuList,
    aspiration: bool,
) -> Option<TabuMove> {
    let n = tour.len();
    if n < 4 {
        return None;
    }
    let mut chosen: Option<TabuMove> = None;
    for i in 0..n - 1 {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let distance = current_distance + two_opt_delta(tour, distances, i, j);
            if tabu.contains((i, j)) {
                let aspires = aspiration && distance < best_distance - IMPROVEMENT_EPS;
                if !aspires {
                    continue;
                }
            }
            match chosen {
                Some(c) if distance >= c.distance => {}
                _ => {
                    chosen = Some(TabuMove {
                        positions: (i, j),
                        distance,
                    })
                }
            }
        }
    }
    chosen
}

/// Runs tabu search from `initial`. Tabu search is deterministic.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::trajectory::{tabu_search, TabuConfig};
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let result = tabu_search(&dm, &[0, 2, 1, 3], &TabuConfig::default()).unwrap();
/// assert!((result.best.distance - 4.0).abs() < 1e-10);
/// ```
pub fn tabu_search(
    distances: &DistanceMatrix,
    initial: &[usize],
    config: &TabuConfig,
) -> Result<SearchResult> {
    config.validate()?;
    let n = distances.size();
    check_city_count(n)?;
    validate_tour(initial, n)?;
    let tenure = config.tenure_for(n);
    debug!(
        "tabu: n={n} tenure={tenure} max_iterations={} patience={}",
        config.max_iterations, config.patience
    );

    let mut current = initial.to_vec();
    let mut current_distance = distances.tour_length(&current);
    let mut best = TourResult::new(current_distance, current.clone());
    let mut tabu = TabuList::new(tenure);
    let mut history = vec![best.distance];
    let mut no_improvement = 0;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        match select_move(
            distances,
            &current,
            current_distance,
            best.distance,
            &tabu,
            config.aspiration,
        ) {
            Some(mv) => {
                let (i, j) = mv.positions;
                current[i + 1..=j].reverse();
                current_distance = distances.tour_length(&current);
                tabu.push(mv.positions);

                if current_distance < best.distance - IMPROVEMENT_EPS {
                    trace!("tabu: iteration {iterations} new best {current_distance:.4}");
                    best = TourResult::new(current_distance, current.clone());
                } else {
                    no_improvement += 1;
                }
            }
            None => no_improvement += 1,
        }
        history.push(best.distance);

        if no_improvement >= config.patience
            && recent_improvement(&history, config.patience) < config.improvement_threshold
        {
            debug!("tabu: stalled after {iterations} iterations");
            break;
        }
    }

    debug!("tabu: best={:.4}", best.distance);
    Ok(SearchResult {
        best,
        history,
        iterations,
    })
}

/// Relative decrease of the best distance over the last `window` entries.
fn recent_improvement(history: &[f64], window: usize) -> f64 {
    let last = history[history.len() - 1];
    let first = history[history.len().saturating_sub(window + 1)];
    if first <= 0.0 {
        return 0.0;
    }
    (first - last) / first
}

/// Tabu search as a [`TourImprover`].
#[derive(Debug, Clone, Default)]
pub struct TabuSearch {
    /// Search parameters.
    pub config: TabuConfig,
}

impl TabuSearch {
    /// Creates the improver from a configuration.
    pub fn new(config: TabuConfig) -> Self {
        Self { config }
    }
}

impl TourImprover for TabuSearch {
    fn name(&self) -> &str {
        "tabu_search"
    }

    fn improve(
        &self,
        distances: &DistanceMatrix,
        tour: Vec<usize>,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        tabu_search(distances, &tour, &self.config).map(|r| r.best.tour)
    }
}
