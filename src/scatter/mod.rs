//! Scatter search with path-relinking.
//!
//! - [`scatter_search`] — reference-set driven search with 2-opt trials
//! - [`update_reference_set`] — quality/diversity rebuild by [`hamming_distance`]
//! - [`path_relinking`] — swap walk from one tour toward another

mod reference_set;
mod relinking;
mod search;

pub use reference_set::{hamming_distance, update_reference_set};
pub use relinking::path_relinking;
pub use search::{scatter_search, scatter_search_with_rng, ScatterConfig, ScatterSearch};
