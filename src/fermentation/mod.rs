//! Fermentation optimization: a population of 2-opt-improved tours
//! perturbed by segment reversal under a decaying nutrient level.

mod process;

pub use process::{fermentation, fermentation_with_rng, metabolize, Fermentation, FermentationConfig};
