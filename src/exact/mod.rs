//! Exhaustive search for tiny instances.
//!
//! Used as ground truth when checking heuristics. City 0 is fixed in the
//! first position, since every rotation of a cycle has the same length, and
//! the remaining `(n - 1)!` orderings are enumerated in lexicographic order.

mod brute_force;

pub use brute_force::{brute_force, MAX_BRUTE_FORCE_CITIES};
