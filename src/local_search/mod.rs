//! Local search and perturbation operators for closed tours.
//!
//! - [`two_opt`](two_opt_improve) — 2-opt edge exchange to a local optimum
//! - [`double_bridge`] — 4-opt kick that 2-opt cannot undo
//! - [`iterated_local_search`] — double-bridge + 2-opt with a stall limit

mod double_bridge;
mod iterated;
mod two_opt;

pub use double_bridge::double_bridge;
pub use iterated::{
    iterated_local_search, iterated_local_search_with_rng, IlsConfig, IteratedLocalSearch,
};
pub use two_opt::{two_opt_delta, two_opt_improve, two_opt_in_place, TwoOpt};

pub(crate) use two_opt::IMPROVEMENT_EPS;
