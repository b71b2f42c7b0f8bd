//! Domain model types for the travelling salesman problem.
//!
//! Provides city coordinates, the result type every algorithm returns, and
//! the two composition traits ([`TourConstructor`], [`TourImprover`]) that
//! tie heuristics together.

mod point;
mod tour;
mod traits;

pub use point::Point;
pub use tour::{PopulationResult, SearchResult, TourResult};
pub use traits::{TourConstructor, TourImprover};
