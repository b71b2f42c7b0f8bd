//! Permutation invariant for tours.

use crate::error::{Result, TspError};

/// Returns `true` if `tour` contains every city in `0..n` exactly once.
///
/// # Examples
///
/// ```
/// use u_tsp::evaluation::is_valid_tour;
///
/// assert!(is_valid_tour(&[2, 0, 1], 3));
/// assert!(!is_valid_tour(&[2, 2, 1], 3));
/// assert!(!is_valid_tour(&[0, 1], 3));
/// ```
pub fn is_valid_tour(tour: &[usize], n: usize) -> bool {
    validate_tour(tour, n).is_ok()
}

/// Checks that `tour` is a permutation of `0..n`.
///
/// # Errors
///
/// Returns [`TspError::InvalidTour`] naming the first problem found: wrong
/// length, an out-of-range city, or a duplicated city (which implies a
/// missing one).
pub fn validate_tour(tour: &[usize], n: usize) -> Result<()> {
    if tour.len() != n {
        return Err(TspError::invalid_tour(
            n,
            format!("tour has {} entries", tour.len()),
        ));
    }
    let mut seen = vec![false; n];
    for (pos, &city) in tour.iter().enumerate() {
        if city >= n {
            return Err(TspError::invalid_tour(
                n,
                format!("city {city} at position {pos} is out of range"),
            ));
        }
        if seen[city] {
            let missing = first_absent(tour, n).unwrap_or(city);
            return Err(TspError::invalid_tour(
                n,
                format!("city {city} repeated at position {pos}, city {missing} missing"),
            ));
        }
        seen[city] = true;
    }
    Ok(())
}

/// Lowest city in `0..n` that appears nowhere in `tour`.
fn first_absent(tour: &[usize], n: usize) -> Option<usize> {
    let mut present = vec![false; n];
    for &city in tour.iter().filter(|&&c| c < n) {
        present[city] = true;
    }
    present.iter().position(|&p| !p)
}
