//! Path-relinking between two tours.

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::validate_tour;
use crate::local_search::IMPROVEMENT_EPS;
use crate::models::TourResult;

/// Walks from `start` toward `guide` by single swaps.
///
/// Each step considers, for every position where the walk still differs
/// from `guide`, the swap that puts the guide's city there, and applies the
/// shortest resulting tour. The walk stops at the guide or as soon as no
/// such swap shortens the tour, so the tour returned is the best
/// intermediate visited and is never longer than `start`.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::scatter::path_relinking;
///
/// let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let result = path_relinking(&dm, &[0, 2, 1, 3], &[0, 1, 2, 3]).unwrap();
/// assert_eq!(result.tour, vec![0, 1, 2, 3]);
/// ```
pub fn path_relinking(
    distances: &DistanceMatrix,
    start: &[usize],
    guide: &[usize],
) -> Result<TourResult> {
    let n = distances.size();
    validate_tour(start, n)?;
    validate_tour(guide, n)?;

    let mut current = start.to_vec();
    let mut position = vec![0; n];
    for (k, &city) in current.iter().enumerate() {
        position[city] = k;
    }

    loop {
        let mut step: Option<(usize, usize, f64)> = None;
        for k in 0..n {
            if current[k] == guide[k] {
                continue;
            }
            let j = position[guide[k]];
            let delta = swap_delta(&current, distances, k, j);
            if step.is_none_or(|(_, _, best)| delta < best) {
                step = Some((k, j, delta));
            }
        }
        match step {
            Some((k, j, delta)) if delta < -IMPROVEMENT_EPS => {
                current.swap(k, j);
                position[current[k]] = k;
                position[current[j]] = j;
            }
            _ => break,
        }
    }

    let distance = distances.tour_length(&current);
    Ok(TourResult::new(distance, current))
}

/// Length change from swapping the cities at positions `a` and `b`.
pub(crate) fn swap_delta(tour: &[usize], distances: &DistanceMatrix, a: usize, b: usize) -> f64 {
    let n = tour.len();
    if a == b || n < 2 {
        return 0.0;
    }
    let city_at = |p: usize| {
        if p == a {
            tour[b]
        } else if p == b {
            tour[a]
        } else {
            tour[p]
        }
    };
    // edges leaving the predecessors of a and b and a and b themselves
    let mut starts = [(a + n - 1) % n, a, (b + n - 1) % n, b];
    starts.sort_unstable();

    let mut delta = 0.0;
    for (idx, &k) in starts.iter().enumerate() {
        if idx > 0 && starts[idx - 1] == k {
            continue;
        }
        let next = (k + 1) % n;
        delta += distances.get(city_at(k), city_at(next)) - distances.get(tour[k], tour[next]);
    }
    delta
}
