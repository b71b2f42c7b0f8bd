//! Constructive heuristics for building initial tours.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbour path, O(n²)
//! - [`cheapest_insertion`] — Cheapest insertion into a growing cycle, O(n³)
//! - [`random_tour`] — Uniform random permutation
//! - [`grasp_construction`] / [`grasp`] — Randomized greedy with a restricted
//!   candidate list, optionally repeated with 2-opt

mod grasp;
mod insertion;
mod nearest_neighbor;
mod random_tour;

pub use grasp::{
    grasp, grasp_construction, grasp_with_rng, restricted_candidate_list, GraspConfig,
    GraspConstructor,
};
pub use insertion::{cheapest_insertion, cheapest_insertion_best_start, CheapestInsertion};
pub use nearest_neighbor::{nearest_neighbor, nearest_neighbor_best_start, NearestNeighbor};
pub use random_tour::{random_tour, RandomTour};

pub(crate) use random_tour::random_permutation;
