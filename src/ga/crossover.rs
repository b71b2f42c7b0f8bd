//! Permutation crossover operators.
//!
//! Every operator checks that its parents are permutations of the same city
//! set and validates the offspring before returning it, so a broken child
//! surfaces as [`TspError::InvalidTour`](crate::error::TspError) instead of
//! leaking into the population.

use rand::Rng;

use crate::error::{Result, TspError};
use crate::evaluation::validate_tour;

use super::config::CrossoverMethod;

/// Recombines `parents` with the given operator.
///
/// `parents.len()` must equal [`CrossoverMethod::arity`]. Two-parent
/// operators return two children, the triple crossover returns one.
pub fn crossover<R: Rng + ?Sized>(
    method: CrossoverMethod,
    parents: &[&[usize]],
    rng: &mut R,
) -> Result<Vec<Vec<usize>>> {
    if parents.len() != method.arity() {
        return Err(TspError::invalid_parameter(format!(
            "{method:?} crossover takes {} parents, got {}",
            method.arity(),
            parents.len()
        )));
    }
    match method {
        CrossoverMethod::CutFill => {
            let (a, b) = cut_fill_crossover(parents[0], parents[1], rng)?;
            Ok(vec![a, b])
        }
        CrossoverMethod::Pmx => {
            let (a, b) = pmx_crossover(parents[0], parents[1], rng)?;
            Ok(vec![a, b])
        }
        CrossoverMethod::Triple => {
            Ok(vec![triple_crossover(parents[0], parents[1], parents[2], rng)?])
        }
    }
}

/// One-point cut-and-fill crossover.
///
/// Picks a cut `c` in `1..n`. The first child keeps `p1[..c]` and appends
/// the missing cities in the order they appear in `p2`; the second child is
/// built the same way with the parents' roles exchanged.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::cut_fill_crossover;
/// use u_tsp::evaluation::is_valid_tour;
/// use u_tsp::random::create_rng;
///
/// let (a, b) = cut_fill_crossover(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], &mut create_rng(1)).unwrap();
/// assert!(is_valid_tour(&a, 5) && is_valid_tour(&b, 5));
/// ```
pub fn cut_fill_crossover<R: Rng + ?Sized>(
    p1: &[usize],
    p2: &[usize],
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let n = check_parents(&[p1, p2])?;
    if n < 2 {
        return Ok((p1.to_vec(), p2.to_vec()));
    }
    let cut = rng.random_range(1..n);
    let first = prefix_fill(&p1[..cut], p2, n);
    let second = prefix_fill(&p2[..cut], p1, n);
    validate_tour(&first, n)?;
    validate_tour(&second, n)?;
    Ok((first, second))
}

fn prefix_fill(prefix: &[usize], donor: &[usize], n: usize) -> Vec<usize> {
    let mut used = vec![false; n];
    let mut child = Vec::with_capacity(n);
    for &c in prefix {
        used[c] = true;
        child.push(c);
    }
    child.extend(donor.iter().copied().filter(|&c| !used[c]));
    child
}

/// Partially mapped crossover (PMX).
///
/// A random segment `[a, b]` of one parent is copied into the child at the
/// same positions. The remaining positions take the other parent's city,
/// following the segment's mapping until the city is not in the segment.
///
/// # Reference
///
/// Goldberg, D.E. & Lingle, R. (1985). "Alleles, loci, and the traveling
/// salesman problem", *Proc. ICGA*, 154-159.
pub fn pmx_crossover<R: Rng + ?Sized>(
    p1: &[usize],
    p2: &[usize],
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let n = check_parents(&[p1, p2])?;
    if n < 2 {
        return Ok((p1.to_vec(), p2.to_vec()));
    }
    let x = rng.random_range(0..n);
    let y = rng.random_range(0..n);
    let (a, b) = (x.min(y), x.max(y));
    let first = pmx_child(p1, p2, a, b);
    let second = pmx_child(p2, p1, a, b);
    validate_tour(&first, n)?;
    validate_tour(&second, n)?;
    Ok((first, second))
}

fn pmx_child(donor: &[usize], other: &[usize], a: usize, b: usize) -> Vec<usize> {
    let n = donor.len();
    // position of each city inside the donor segment
    let mut in_segment: Vec<Option<usize>> = vec![None; n];
    for (k, &c) in donor.iter().enumerate().take(b + 1).skip(a) {
        in_segment[c] = Some(k);
    }
    let mut child = other.to_vec();
    child[a..=b].copy_from_slice(&donor[a..=b]);
    for k in (0..a).chain(b + 1..n) {
        let mut city = other[k];
        while let Some(pos) = in_segment[city] {
            city = other[pos];
        }
        child[k] = city;
    }
    child
}

/// Three-parent crossover.
///
/// Copies a random segment `[cp1, cp2]` of `p1` into the child, then fills
/// positions `cp2 + 1, cp2 + 2, ...` (wrapping) with the cities of `p2` and
/// then `p3`, in order of appearance, skipping cities already placed.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::triple_crossover;
/// use u_tsp::evaluation::is_valid_tour;
/// use u_tsp::random::create_rng;
///
/// let child = triple_crossover(
///     &[0, 1, 2, 3, 4, 5],
///     &[5, 4, 3, 2, 1, 0],
///     &[2, 0, 4, 1, 5, 3],
///     &mut create_rng(9),
/// )
/// .unwrap();
/// assert!(is_valid_tour(&child, 6));
/// ```
pub fn triple_crossover<R: Rng + ?Sized>(
    p1: &[usize],
    p2: &[usize],
    p3: &[usize],
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n = check_parents(&[p1, p2, p3])?;
    if n < 2 {
        return Ok(p1.to_vec());
    }
    let cp1 = rng.random_range(0..n);
    let cp2 = rng.random_range(cp1..n);

    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut used = vec![false; n];
    for k in cp1..=cp2 {
        child[k] = Some(p1[k]);
        used[p1[k]] = true;
    }

    let mut pos = (cp2 + 1) % n;
    for &city in p2.iter().chain(p3) {
        if used[city] {
            continue;
        }
        while child[pos].is_some() {
            pos = (pos + 1) % n;
        }
        child[pos] = Some(city);
        used[city] = true;
    }

    let child: Vec<usize> = child.into_iter().flatten().collect();
    validate_tour(&child, n)?;
    Ok(child)
}

/// Checks that all parents are permutations of the same `0..n`.
fn check_parents(parents: &[&[usize]]) -> Result<usize> {
    let n = parents.first().map_or(0, |p| p.len());
    for p in parents {
        validate_tour(p, n)?;
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::is_valid_tour;
    use crate::random::create_rng;
    use rand::seq::SliceRandom;

    fn shuffled(n: usize, seed: u64) -> Vec<usize> {
        let mut t: Vec<usize> = (0..n).collect();
        t.shuffle(&mut create_rng(seed));
        t
    }

    #[test]
    fn test_cut_fill_keeps_prefix() {
        let p1 = vec![0, 1, 2, 3, 4, 5];
        let p2 = vec![5, 4, 3, 2, 1, 0];
        let mut rng = create_rng(4);
        let (a, b) = cut_fill_crossover(&p1, &p2, &mut rng).expect("valid");
        // cut >= 1, so both children start with their own parent's first city
        assert_eq!(a[0], 0);
        assert_eq!(b[0], 5);
        // reversed donor: the tail of `a` is descending
        let cut = a.iter().zip(&p1).take_while(|(x, y)| x == y).count();
        assert!(a[cut..].windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_pmx_identical_parents() {
        let p = shuffled(9, 3);
        let mut rng = create_rng(8);
        let (a, b) = pmx_crossover(&p, &p, &mut rng).expect("valid");
        assert_eq!(a, p);
        assert_eq!(b, p);
    }

    #[test]
    fn test_triple_keeps_segment_of_first_parent() {
        let p1 = shuffled(10, 1);
        let p2 = shuffled(10, 2);
        let p3 = shuffled(10, 3);
        for seed in 0..20 {
            let child = triple_crossover(&p1, &p2, &p3, &mut create_rng(seed)).expect("valid");
            assert!(is_valid_tour(&child, 10));
            // at least one position copied from p1
            assert!(child.iter().zip(&p1).any(|(a, b)| a == b));
        }
    }

    #[test]
    fn test_mismatched_parents_rejected() {
        let mut rng = create_rng(0);
        assert!(cut_fill_crossover(&[0, 1, 2], &[0, 1], &mut rng).is_err());
        assert!(pmx_crossover(&[0, 1, 2], &[0, 0, 2], &mut rng).is_err());
        assert!(triple_crossover(&[0, 1, 2], &[2, 1, 0], &[0, 1, 3], &mut rng).is_err());
    }

    #[test]
    fn test_dispatch_checks_arity() {
        let p = [0usize, 1, 2, 3];
        let mut rng = create_rng(0);
        let two: [&[usize]; 2] = [&p, &p];
        assert!(crossover(CrossoverMethod::Triple, &two, &mut rng).is_err());
        assert_eq!(
            crossover(CrossoverMethod::Pmx, &two, &mut rng).expect("valid").len(),
            2
        );
        let three: [&[usize]; 3] = [&p, &p, &p];
        assert_eq!(
            crossover(CrossoverMethod::Triple, &three, &mut rng).expect("valid").len(),
            1
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_offspring_are_permutations(n in 2usize..40, seed in 0u64..10_000) {
                let p1 = shuffled(n, seed);
                let p2 = shuffled(n, seed.wrapping_add(1));
                let p3 = shuffled(n, seed.wrapping_add(2));
                let mut rng = create_rng(seed);
                let (a, b) = cut_fill_crossover(&p1, &p2, &mut rng).unwrap();
                prop_assert!(is_valid_tour(&a, n) && is_valid_tour(&b, n));
                let (a, b) = pmx_crossover(&p1, &p2, &mut rng).unwrap();
                prop_assert!(is_valid_tour(&a, n) && is_valid_tour(&b, n));
                let c = triple_crossover(&p1, &p2, &p3, &mut rng).unwrap();
                prop_assert!(is_valid_tour(&c, n));
            }
        }
    }
}
