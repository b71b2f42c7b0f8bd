//! 2-opt improvement on a closed tour.
//!
//! # Algorithm
//!
//! For each pair of edges (t[i], t[i+1]) and (t[j], t[j+1]) with `i < j`
//! (indices mod n), compute the change in length from reversing the segment
//! `t[i+1..=j]`:
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! If delta < 0, reverse the segment and restart the scan from the first
//! pair. The search ends when a full scan finds no improving pair, which is
//! a 2-opt local optimum (first-improvement strategy).
//!
//! # Complexity
//!
//! O(n²) per scan, no cap on the number of scans.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::RngCore;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::validate_tour;
use crate::models::{TourImprover, TourResult};

/// Improvements smaller than this are treated as ties.
pub(crate) const IMPROVEMENT_EPS: f64 = 1e-10;

/// Applies 2-opt to a tour until it is locally optimal.
///
/// Returns the improved tour and its total cycle length.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::two_opt_improve;
///
/// // Unit square visited in a crossing order.
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let result = two_opt_improve(&[0, 2, 1, 3], &dm);
/// assert!((result.distance - 4.0).abs() < 1e-10);
/// ```
pub fn two_opt_improve(tour: &[usize], distances: &DistanceMatrix) -> TourResult {
    let mut current = tour.to_vec();
    two_opt_in_place(&mut current, distances);
    let distance = distances.tour_length(&current);
    TourResult::new(distance, current)
}

/// Applies 2-opt in place and returns the number of improving swaps made.
pub fn two_opt_in_place(tour: &mut [usize], distances: &DistanceMatrix) -> usize {
    let n = tour.len();
    if n < 4 {
        return 0;
    }

    let mut swaps = 0;
    'scan: loop {
        for i in 0..n - 1 {
            for j in (i + 2)..n {
                // (0, n-1) shares city t[0]; reversing it is a no-op.
                if i == 0 && j == n - 1 {
                    continue;
                }
                if two_opt_delta(tour, distances, i, j) < -IMPROVEMENT_EPS {
                    tour[i + 1..=j].reverse();
                    swaps += 1;
                    continue 'scan;
                }
            }
        }
        break;
    }
    swaps
}

/// Length change from replacing edges (t[i], t[i+1]) and (t[j], t[j+1]) by
/// (t[i], t[j]) and (t[i+1], t[j+1]), i.e. reversing `t[i+1..=j]`.
///
/// Requires `i < j < tour.len()`; `j + 1` wraps to the start.
#[inline]
pub fn two_opt_delta(tour: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = tour.len();
    let a = tour[i];
    let b = tour[i + 1];
    let c = tour[j];
    let d = tour[(j + 1) % n];

    let old_cost = distances.get(a, b) + distances.get(c, d);
    let new_cost = distances.get(a, c) + distances.get(b, d);
    new_cost - old_cost
}

/// 2-opt as a [`TourImprover`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl TourImprover for TwoOpt {
    fn name(&self) -> &str {
        "two_opt"
    }

    fn improve(
        &self,
        distances: &DistanceMatrix,
        mut tour: Vec<usize>,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        validate_tour(&tour, distances.size())?;
        two_opt_in_place(&mut tour, distances);
        Ok(tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use rand::seq::SliceRandom;
    use rand::Rng;

    fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
        let mut rng = create_rng(seed);
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        DistanceMatrix::from_coords(&coords).expect("valid")
    }

    fn random_tour(n: usize, seed: u64) -> Vec<usize> {
        let mut tour: Vec<usize> = (0..n).collect();
        tour.shuffle(&mut create_rng(seed));
        tour
    }

    fn is_locally_optimal(tour: &[usize], dm: &DistanceMatrix) -> bool {
        let n = tour.len();
        let base = dm.tour_length(tour);
        for i in 0..n - 1 {
            for j in (i + 1)..n {
                let mut t = tour.to_vec();
                t[i + 1..=j].reverse();
                if dm.tour_length(&t) < base - 1e-9 {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_2opt_already_optimal() {
        let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
            .expect("valid");
        let result = two_opt_improve(&[0, 1, 2, 3], &dm);
        assert_eq!(result.tour, vec![0, 1, 2, 3]);
        assert!((result.distance - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_removes_crossing() {
        let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
            .expect("valid");
        let mut tour = vec![0, 2, 1, 3];
        let swaps = two_opt_in_place(&mut tour, &dm);
        assert_eq!(swaps, 1);
        assert!((dm.tour_length(&tour) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_small_tours_untouched() {
        let dm = random_instance(3, 1);
        let result = two_opt_improve(&[2, 0, 1], &dm);
        assert_eq!(result.tour, vec![2, 0, 1]);
    }

    #[test]
    fn test_delta_matches_full_recomputation() {
        let n = 12;
        let dm = random_instance(n, 7);
        for seed in 0..20 {
            let tour = random_tour(n, seed);
            let base = dm.tour_length(&tour);
            for i in 0..n - 1 {
                for j in (i + 1)..n {
                    let mut t = tour.clone();
                    t[i + 1..=j].reverse();
                    let delta = two_opt_delta(&tour, &dm, i, j);
                    assert!((dm.tour_length(&t) - (base + delta)).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_local_optimality_small_instances() {
        for n in 4..=10 {
            for seed in 0..5 {
                let dm = random_instance(n, 100 + seed);
                let start = random_tour(n, seed);
                let result = two_opt_improve(&start, &dm);
                assert!(is_locally_optimal(&result.tour, &dm));
                assert!(result.distance <= dm.tour_length(&start) + 1e-10);
                assert!((result.distance - dm.tour_length(&result.tour)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_improver_rejects_invalid_tour() {
        let dm = random_instance(5, 3);
        let mut rng = create_rng(0);
        assert!(TwoOpt.improve(&dm, vec![0, 1, 1, 2, 3], &mut rng).is_err());
    }

    mod proptests {
        use super::*;
        use crate::evaluation::is_valid_tour;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_two_opt_preserves_permutation(n in 4usize..30, seed in 0u64..1000) {
                let dm = random_instance(n, seed);
                let result = two_opt_improve(&random_tour(n, seed ^ 0xff), &dm);
                prop_assert!(is_valid_tour(&result.tour, n));
            }
        }
    }
}
