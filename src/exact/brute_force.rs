use log::{debug, warn};

use crate::distance::{check_city_count, DistanceMatrix};
use crate::error::{Result, TspError};
use crate::models::TourResult;

/// Largest instance [`brute_force`] accepts.
pub const MAX_BRUTE_FORCE_CITIES: usize = 12;

/// Instances above this size are slow enough to warn about.
const SLOW_BRUTE_FORCE_CITIES: usize = 10;

/// Returns an optimal tour by enumerating every ordering.
///
/// Among equally short tours the lexicographically first (with city 0
/// leading) is returned.
///
/// # Errors
///
/// Fails with [`TspError::InvalidInput`] above
/// [`MAX_BRUTE_FORCE_CITIES`] cities.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::exact::brute_force;
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let result = brute_force(&dm).unwrap();
/// assert_eq!(result.tour, vec![0, 1, 2, 3]);
/// assert!((result.distance - 4.0).abs() < 1e-10);
/// ```
pub fn brute_force(distances: &DistanceMatrix) -> Result<TourResult> {
    let n = distances.size();
    check_city_count(n)?;
    if n > MAX_BRUTE_FORCE_CITIES {
        return Err(TspError::invalid_input(format!(
            "brute force is limited to {MAX_BRUTE_FORCE_CITIES} cities, got {n}"
        )));
    }
    if n > SLOW_BRUTE_FORCE_CITIES {
        warn!("brute force over {n} cities enumerates {} tours", factorial(n - 1));
    }

    let mut tour: Vec<usize> = (0..n).collect();
    let mut best = TourResult::new(distances.tour_length(&tour), tour.clone());
    let mut evaluated: u64 = 1;
    while next_permutation(&mut tour[1..]) {
        evaluated += 1;
        let distance = distances.tour_length(&tour);
        if distance < best.distance {
            best = TourResult::new(distance, tour.clone());
        }
    }
    debug!("brute force: n={n} evaluated={evaluated} best={:.4}", best.distance);
    Ok(best)
}

/// Advances `items` to the next lexicographic permutation. Returns `false`
/// (leaving `items` sorted ascending) after the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }
    let Some(i) = (0..n - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        items.reverse();
        return false;
    };
    let j = (i + 1..n)
        .rev()
        .find(|&j| items[j] > items[i])
        .unwrap_or(i + 1);
    items.swap(i, j);
    items[i + 1..].reverse();
    true
}

fn factorial(k: usize) -> u64 {
    (1..=k as u64).product()
}
