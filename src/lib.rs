//! # u-tsp
//!
//! Heuristics and metaheuristics for the symmetric Euclidean Traveling
//! Salesman Problem. Every algorithm consumes a [`DistanceMatrix`] and
//! produces a [`TourResult`]: a permutation of `0..n` (the closing edge back
//! to the first city is implicit) together with its cycle length.
//!
//! ## Modules
//!
//! - [`models`] — Cities, tour results and the constructor/improver traits
//! - [`distance`] — Dense distance matrix and cycle length
//! - [`evaluation`] — Permutation check, closeness and gap to a reference
//! - [`constructive`] — Nearest neighbour, cheapest insertion, random, GRASP
//! - [`local_search`] — 2-opt, double-bridge, iterated local search
//! - [`trajectory`] — Simulated annealing and tabu search
//! - [`ga`] — Genetic and memetic algorithms
//! - [`scatter`] — Scatter search with path-relinking
//! - [`aco`] — Ant colony optimization
//! - [`fermentation`] — Fermentation optimization
//! - [`exact`] — Brute force for tiny instances
//! - [`pipeline`] — Chaining a constructor with improvers
//!
//! ## Example
//!
//! ```
//! use u_tsp::constructive::nearest_neighbor;
//! use u_tsp::distance::DistanceMatrix;
//! use u_tsp::local_search::two_opt_improve;
//!
//! let dm = DistanceMatrix::from_coords(&[
//!     (0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0), (2.0, 1.0),
//! ])?;
//! let start = nearest_neighbor(&dm, 0)?;
//! let improved = two_opt_improve(&start.tour, &dm);
//! assert!(improved.distance <= start.distance);
//! # Ok::<(), u_tsp::TspError>(())
//! ```

pub mod aco;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod fermentation;
pub mod ga;
pub mod local_search;
pub mod models;
pub mod pipeline;
pub mod random;
pub mod scatter;
pub mod trajectory;

pub use distance::DistanceMatrix;
pub use error::{Result, TspError};
pub use models::TourResult;
