//! Error types shared by every solver entry point.

use thiserror::Error;

/// Errors surfaced by tour construction, improvement and validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// Empty city list, too few cities, or non-finite coordinates.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Non-square matrix, negative, NaN or infinite entries.
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),
    /// A tour is not a permutation of `0..expected`.
    #[error("invalid tour over {expected} cities: {reason}")]
    InvalidTour {
        /// Number of cities the tour must cover.
        expected: usize,
        /// What is wrong with it.
        reason: String,
    },
    /// A configuration value is out of its admissible range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_matrix(message: impl Into<String>) -> Self {
        Self::InvalidMatrix(message.into())
    }

    pub fn invalid_tour(expected: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTour {
            expected,
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}
