//! Fitness-proportional parent selection and generational replacement.

use log::warn;
use rand::Rng;

use crate::models::TourResult;

/// Selection probabilities from tour lengths.
///
/// Fitness is the inverse length, normalized to sum to one. When the
/// fitness vector cannot be normalized (a zero-length tour, or every
/// fitness zero) the probabilities fall back to uniform.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::fitness_probabilities;
///
/// let p = fitness_probabilities(&[1.0, 2.0, 4.0]);
/// assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// assert!(p[0] > p[1] && p[1] > p[2]);
/// ```
pub fn fitness_probabilities(distances: &[f64]) -> Vec<f64> {
    let fitness: Vec<f64> = distances.iter().map(|&d| 1.0 / d).collect();
    let total: f64 = fitness.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        if !distances.is_empty() {
            warn!("fitness of {} tours cannot be normalized, using uniform selection", distances.len());
        }
        return uniform(distances.len());
    }
    fitness.into_iter().map(|f| f / total).collect()
}

fn uniform(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}

/// Roulette-wheel selection.
///
/// Draws `r` uniformly in `[0, 1)` and returns the first index whose
/// cumulative probability reaches `r`. Rounding slack at the end of the
/// wheel falls on the last index.
///
/// # Panics
///
/// Panics if `probabilities` is empty.
pub fn roulette_select<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.random();
    let mut cumulative = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r <= cumulative {
            return i;
        }
    }
    probabilities.len() - 1
}

/// Builds the next generation of `size` tours.
///
/// The best `round(elite_fraction * size)` tours of `pool` (offspring and
/// their parents) survive. Remaining slots are filled with uniformly random
/// members of `previous`, or from `pool` when `previous` is empty.
pub fn survivor_selection<R: Rng + ?Sized>(
    mut pool: Vec<TourResult>,
    previous: &[TourResult],
    size: usize,
    elite_fraction: f64,
    rng: &mut R,
) -> Vec<TourResult> {
    pool.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    let elite = ((elite_fraction * size as f64).round() as usize).min(size);

    let mut next: Vec<TourResult> = pool.iter().take(elite).cloned().collect();
    let donors = if previous.is_empty() { &pool[..] } else { previous };
    if donors.is_empty() {
        return next;
    }
    while next.len() < size {
        let pick = rng.random_range(0..donors.len());
        next.push(donors[pick].clone());
    }
    next
}
