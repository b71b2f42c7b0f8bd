//! Double-bridge perturbation.
//!
//! Cuts the cycle into four segments `A B C D` and reconnects them as
//! `A C B D`. This 4-opt move cannot be undone by any sequence of 2-opt
//! moves, which is what lets iterated local search leave a 2-opt local
//! optimum.
//!
//! # Reference
//!
//! Martin, O., Otto, S.W. & Felten, E.W. (1991). "Large-step Markov chains
//! for the traveling salesman problem", *Complex Systems* 5(3), 299-326.

use rand::Rng;

/// Returns a double-bridge perturbation of `tour`.
///
/// The three cut points are drawn from disjoint quarters of the tour, so
/// every segment is non-empty. Tours with fewer than 4 cities are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::double_bridge;
/// use u_tsp::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let tour: Vec<usize> = (0..12).collect();
/// let perturbed = double_bridge(&tour, &mut rng);
/// let mut sorted = perturbed.clone();
/// sorted.sort();
/// assert_eq!(sorted, tour);
/// assert_ne!(perturbed, tour);
/// ```
pub fn double_bridge<R: Rng + ?Sized>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    let n = tour.len();
    if n < 4 {
        return tour.to_vec();
    }
    let (p1, p2, p3) = cut_points(n, rng);
    reconnect(tour, p1, p2, p3)
}

/// Draws `p1 < p2 < p3`, with `p1` in `[1, q]`, `p2` in `[q+1, 2q]` and
/// `p3` in `[2q+1, 3q]` where `q = n / 4`.
fn cut_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize, usize) {
    let q = n / 4;
    let p1 = rng.random_range(1..=q);
    let p2 = rng.random_range(q + 1..=2 * q);
    let p3 = rng.random_range(2 * q + 1..=3 * q);
    (p1, p2, p3)
}

/// Splices `A = t[..p1]`, `B = t[p1..p2]`, `C = t[p2..p3]`, `D = t[p3..]`
/// into `A C B D`.
fn reconnect(tour: &[usize], p1: usize, p2: usize, p3: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(tour.len());
    out.extend_from_slice(&tour[..p1]);
    out.extend_from_slice(&tour[p2..p3]);
    out.extend_from_slice(&tour[p1..p2]);
    out.extend_from_slice(&tour[p3..]);
    out
}
