//! Tour validation and solution-quality scoring.
//!
//! - [`validate_tour`] — permutation invariant check used as a postcondition
//!   by every operator that rebuilds a tour
//! - [`closeness`] / [`gap_percent`] — quality relative to a reference tour

mod gap;
mod validity;

pub use gap::{closeness, gap_percent};
pub use validity::{is_valid_tour, validate_tour};
