//! Construction followed by a chain of improvement steps.

use std::fmt;

use log::debug;
use rand::RngCore;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::validate_tour;
use crate::models::{TourConstructor, TourImprover, TourResult};
use crate::random::rng_from;

/// One [`TourConstructor`] followed by any number of [`TourImprover`]s.
///
/// The tour is checked against the permutation invariant after every step,
/// so a misbehaving step fails the run with
/// [`TspError::InvalidTour`](crate::error::TspError) naming the problem.
///
/// # Examples
///
/// ```
/// use u_tsp::constructive::NearestNeighbor;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{IlsConfig, IteratedLocalSearch, TwoOpt};
/// use u_tsp::pipeline::Pipeline;
///
/// let dm = DistanceMatrix::from_coords(&[
///     (0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (1.0, 3.0), (1.0, -1.0),
/// ]).unwrap();
/// let pipeline = Pipeline::new(NearestNeighbor::default())
///     .then(TwoOpt)
///     .then(IteratedLocalSearch::new(IlsConfig::default().with_max_no_improvement(5)));
/// assert_eq!(pipeline.steps(), vec!["nearest_neighbor", "two_opt", "iterated_local_search"]);
///
/// let result = pipeline.run_seeded(&dm, Some(1)).unwrap();
/// assert_eq!(result.tour.len(), 6);
/// ```
pub struct Pipeline {
    constructor: Box<dyn TourConstructor>,
    improvers: Vec<Box<dyn TourImprover>>,
}

impl Pipeline {
    /// Starts a pipeline from a construction heuristic.
    pub fn new(constructor: impl TourConstructor + 'static) -> Self {
        Self {
            constructor: Box::new(constructor),
            improvers: Vec::new(),
        }
    }

    /// Appends an improvement step.
    pub fn then(mut self, improver: impl TourImprover + 'static) -> Self {
        self.improvers.push(Box::new(improver));
        self
    }

    /// Names of the steps in execution order.
    pub fn steps(&self) -> Vec<&str> {
        std::iter::once(self.constructor.name())
            .chain(self.improvers.iter().map(|i| i.name()))
            .collect()
    }

    /// Runs every step with the caller's generator.
    pub fn run(&self, distances: &DistanceMatrix, rng: &mut dyn RngCore) -> Result<TourResult> {
        let n = distances.size();
        let mut tour = self.constructor.construct(distances, rng)?;
        validate_tour(&tour, n)?;
        debug!(
            "pipeline: {} -> {:.4}",
            self.constructor.name(),
            distances.tour_length(&tour)
        );

        for improver in &self.improvers {
            tour = improver.improve(distances, tour, rng)?;
            validate_tour(&tour, n)?;
            debug!("pipeline: {} -> {:.4}", improver.name(), distances.tour_length(&tour));
        }

        let distance = distances.tour_length(&tour);
        Ok(TourResult::new(distance, tour))
    }

    /// Runs every step with a generator built from `seed` (OS entropy when
    /// `None`).
    pub fn run_seeded(&self, distances: &DistanceMatrix, seed: Option<u64>) -> Result<TourResult> {
        let mut rng = rng_from(seed);
        self.run(distances, &mut rng)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("steps", &self.steps()).finish()
    }
}
