//! Ant colony optimization.
//!
//! - [`ant_colony`] — Ant System with evaporation and tour-length deposits
//! - [`construct_ant_tour`] — one ant's probabilistic tour
//! - [`PheromoneMatrix`] — symmetric trail levels

mod colony;
mod pheromone;

pub use colony::{ant_colony, ant_colony_with_rng, construct_ant_tour, AcoConfig, AntColony};
pub use pheromone::PheromoneMatrix;
