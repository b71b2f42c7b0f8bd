//! Single-trajectory metaheuristics.
//!
//! - [`simulated_annealing`] — random-swap moves with Metropolis acceptance
//!   and geometric cooling
//! - [`tabu_search`] — best admissible 2-opt move with a FIFO tabu list and
//!   aspiration

mod annealing;
mod tabu;

pub use annealing::{
    accept, simulated_annealing, simulated_annealing_with_rng, SaConfig, SimulatedAnnealing,
};
pub use tabu::{select_move, tabu_search, TabuConfig, TabuList, TabuMove, TabuSearch};
