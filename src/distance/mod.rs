//! Distance model.
//!
//! Provides a dense, read-only distance matrix built from city coordinates
//! or supplied explicitly, plus closed-tour length evaluation.

mod matrix;

pub use matrix::{DistanceMatrix, MIN_CITIES};

pub(crate) use matrix::check_city_count;
