//! Reference-set maintenance balancing quality and diversity.

use std::collections::HashSet;

use crate::models::TourResult;

/// Number of positions at which two tours hold different cities.
///
/// # Examples
///
/// ```
/// use u_tsp::scatter::hamming_distance;
///
/// assert_eq!(hamming_distance(&[0, 1, 2, 3], &[0, 2, 1, 3]), 2);
/// assert_eq!(hamming_distance(&[0, 1, 2], &[0, 1, 2]), 0);
/// ```
pub fn hamming_distance(a: &[usize], b: &[usize]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
        + a.len().abs_diff(b.len())
}

/// Rebuilds a reference set of `size` tours from `candidates`.
///
/// Candidates are ranked by length and exact duplicates dropped. A tour is
/// diverse when its Hamming distance to every diverse tour chosen before
/// it exceeds `size / 2`. The set is the best quarter by length, then
/// diverse tours in rank order, then the next best by length until `size`
/// tours are held, sorted by ascending length. Returns fewer than `size`
/// tours only when there are not enough distinct candidates.
pub fn update_reference_set(mut candidates: Vec<TourResult>, size: usize) -> Vec<TourResult> {
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(c.tour.clone()));
    if candidates.len() <= size {
        return candidates;
    }

    let threshold = size / 2;
    let mut diverse: Vec<usize> = Vec::new();
    for (i, c) in candidates.iter().enumerate() {
        if diverse
            .iter()
            .all(|&d| hamming_distance(&candidates[d].tour, &c.tour) > threshold)
        {
            diverse.push(i);
        }
    }

    let mut chosen = vec![false; candidates.len()];
    let mut count = 0;
    for i in (0..size / 4).chain(diverse).chain(0..candidates.len()) {
        if count == size {
            break;
        }
        if !chosen[i] {
            chosen[i] = true;
            count += 1;
        }
    }

    candidates
        .into_iter()
        .enumerate()
        .filter(|(i, _)| chosen[*i])
        .map(|(_, c)| c)
        .collect()
}
