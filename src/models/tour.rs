//! Tour result type.

use serde::{Deserialize, Serialize};

/// The outcome of any construction or improvement run: a closed tour and
/// its total length.
///
/// `tour` holds each city exactly once; the edge from the last city back to
/// the first is implicit.
///
/// # Examples
///
/// ```
/// use u_tsp::models::TourResult;
///
/// let r = TourResult::new(4.0, vec![0, 1, 2, 3]);
/// assert_eq!(r.closed(), vec![0, 1, 2, 3, 0]);
/// assert_eq!(r.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourResult {
    /// Total cycle length.
    pub distance: f64,
    /// Visiting order, one entry per city.
    pub tour: Vec<usize>,
}

impl TourResult {
    /// Creates a result from a distance and a visiting order.
    pub fn new(distance: f64, tour: Vec<usize>) -> Self {
        Self { distance, tour }
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.tour.len()
    }

    /// Returns `true` if the tour has no cities.
    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }

    /// Returns the tour with the start city repeated at the end.
    pub fn closed(&self) -> Vec<usize> {
        let mut path = self.tour.clone();
        if let Some(&first) = self.tour.first() {
            path.push(first);
        }
        path
    }

    /// Returns the better (shorter) of two results, preferring `self` on ties.
    pub fn better_of(self, other: TourResult) -> TourResult {
        if other.distance < self.distance {
            other
        } else {
            self
        }
    }
}

/// Best result of a single-trajectory search (ILS, SA, tabu) with the
/// best-so-far distance recorded after every iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Best tour found.
    pub best: TourResult,
    /// Best-so-far distance after each iteration; non-increasing.
    pub history: Vec<f64>,
    /// Number of iterations executed.
    pub iterations: usize,
}

/// Best result of a population-based run together with the final
/// population and the best distance seen after each generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationResult {
    /// Best tour found over the whole run.
    pub best: TourResult,
    /// Final population, sorted by ascending distance.
    pub population: Vec<TourResult>,
    /// Best-so-far distance after each generation.
    pub history: Vec<f64>,
}

impl PopulationResult {
    /// Mean distance of the final population.
    pub fn mean_distance(&self) -> f64 {
        if self.population.is_empty() {
            return f64::INFINITY;
        }
        self.population.iter().map(|r| r.distance).sum::<f64>() / self.population.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_empty() {
        let r = TourResult::new(0.0, vec![]);
        assert!(r.closed().is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn test_better_of_prefers_self_on_tie() {
        let a = TourResult::new(5.0, vec![0, 1, 2]);
        let b = TourResult::new(5.0, vec![0, 2, 1]);
        assert_eq!(a.clone().better_of(b.clone()).tour, vec![0, 1, 2]);
        let c = TourResult::new(4.0, vec![1, 0, 2]);
        assert_eq!(a.better_of(c).distance, 4.0);
    }

    #[test]
    fn test_mean_distance() {
        let pr = PopulationResult {
            best: TourResult::new(2.0, vec![0, 1]),
            population: vec![
                TourResult::new(2.0, vec![0, 1]),
                TourResult::new(4.0, vec![1, 0]),
            ],
            history: vec![2.0],
        };
        assert!((pr.mean_distance() - 3.0).abs() < 1e-12);
    }
}
