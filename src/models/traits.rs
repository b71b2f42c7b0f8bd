//! Composition contracts for heuristics.
//!
//! Every construction heuristic can be driven through [`TourConstructor`]
//! and every improvement method through [`TourImprover`], so a driver can
//! chain them without knowing which algorithm sits behind each step.
//! Both traits take the generator as `&mut dyn RngCore` to stay object safe.

use rand::RngCore;

use crate::distance::DistanceMatrix;
use crate::error::Result;

/// Builds a tour from scratch.
pub trait TourConstructor {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Produces a permutation of `0..distances.size()`.
    fn construct(&self, distances: &DistanceMatrix, rng: &mut dyn RngCore) -> Result<Vec<usize>>;
}

/// Transforms an existing tour into one that is no worse under its own
/// acceptance rule.
pub trait TourImprover {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Improves `tour`, returning a permutation of the same cities.
    fn improve(
        &self,
        distances: &DistanceMatrix,
        tour: Vec<usize>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>>;
}
