//! Permutation mutation operators.
//!
//! All operators act in place and leave tours of fewer than two cities
//! untouched.

use rand::Rng;

use crate::error::Result;
use crate::evaluation::validate_tour;

use super::config::MutationMethod;

/// Applies the given mutation operator in place.
pub fn mutate<R: Rng + ?Sized>(method: MutationMethod, tour: &mut [usize], rng: &mut R) -> Result<()> {
    match method {
        MutationMethod::Swap => {
            swap_mutation(tour, rng);
            Ok(())
        }
        MutationMethod::Inversion => {
            inversion_mutation(tour, rng);
            Ok(())
        }
        MutationMethod::EdgeRecombination => edge_recombination_mutation(tour, rng),
    }
}

/// Exchanges the cities at two distinct random positions.
pub fn swap_mutation<R: Rng + ?Sized>(tour: &mut [usize], rng: &mut R) {
    if let Some((i, j)) = distinct_pair(tour.len(), rng) {
        tour.swap(i, j);
    }
}

/// Reverses the segment between two distinct random positions (inclusive).
pub fn inversion_mutation<R: Rng + ?Sized>(tour: &mut [usize], rng: &mut R) {
    if let Some((i, j)) = distinct_pair(tour.len(), rng) {
        tour[i..=j].reverse();
    }
}

/// Exchanges the successors of two random positions.
///
/// For positions `i < j` the cities at `(i + 1) % n` and `(j + 1) % n` trade
/// places, which rewires the edges leaving `t[i]` and `t[j]`. The result is
/// validated.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::edge_recombination_mutation;
/// use u_tsp::evaluation::is_valid_tour;
/// use u_tsp::random::create_rng;
///
/// let mut tour = vec![0, 1, 2, 3, 4, 5];
/// edge_recombination_mutation(&mut tour, &mut create_rng(2)).unwrap();
/// assert!(is_valid_tour(&tour, 6));
/// ```
pub fn edge_recombination_mutation<R: Rng + ?Sized>(tour: &mut [usize], rng: &mut R) -> Result<()> {
    let n = tour.len();
    if let Some((i, j)) = distinct_pair(n, rng) {
        tour.swap((i + 1) % n, (j + 1) % n);
    }
    validate_tour(tour, n)
}

/// Two distinct positions in ascending order, or `None` when `n < 2`.
fn distinct_pair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    Some((i.min(j), i.max(j)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::is_valid_tour;
    use crate::random::create_rng;

    fn changed_positions(a: &[usize], b: &[usize]) -> usize {
        a.iter().zip(b).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let original: Vec<usize> = (0..8).collect();
        let mut rng = create_rng(5);
        for _ in 0..50 {
            let mut tour = original.clone();
            swap_mutation(&mut tour, &mut rng);
            assert_eq!(changed_positions(&original, &tour), 2);
        }
    }

    #[test]
    fn test_inversion_reverses_a_contiguous_block() {
        let original: Vec<usize> = (0..10).collect();
        let mut rng = create_rng(6);
        for _ in 0..50 {
            let mut tour = original.clone();
            inversion_mutation(&mut tour, &mut rng);
            let first = tour.iter().zip(&original).position(|(a, b)| a != b);
            let last = tour.iter().zip(&original).rposition(|(a, b)| a != b);
            if let (Some(i), Some(j)) = (first, last) {
                let mut expected = original.clone();
                expected[i..=j].reverse();
                assert_eq!(tour, expected);
            }
        }
    }

    #[test]
    fn test_edge_recombination_swaps_successors() {
        let original: Vec<usize> = (0..7).collect();
        let mut rng = create_rng(11);
        for _ in 0..50 {
            let mut tour = original.clone();
            edge_recombination_mutation(&mut tour, &mut rng).expect("valid");
            assert!(is_valid_tour(&tour, 7));
            assert_eq!(changed_positions(&original, &tour), 2);
        }
    }

    #[test]
    fn test_tiny_tours_untouched() {
        let mut rng = create_rng(0);
        let mut one = vec![0];
        swap_mutation(&mut one, &mut rng);
        inversion_mutation(&mut one, &mut rng);
        edge_recombination_mutation(&mut one, &mut rng).expect("valid");
        assert_eq!(one, vec![0]);
    }

    #[test]
    fn test_edge_recombination_reports_invalid_input() {
        let mut rng = create_rng(0);
        let mut broken = vec![0, 1, 1, 3];
        assert!(edge_recombination_mutation(&mut broken, &mut rng).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_mutations_preserve_permutation(n in 2usize..50, seed in 0u64..10_000) {
                let mut rng = create_rng(seed);
                for method in [MutationMethod::Swap, MutationMethod::Inversion, MutationMethod::EdgeRecombination] {
                    let mut tour: Vec<usize> = (0..n).rev().collect();
                    mutate(method, &mut tour, &mut rng).unwrap();
                    prop_assert!(is_valid_tour(&tour, n));
                }
            }
        }
    }
}
