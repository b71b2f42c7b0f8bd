//! End-to-end checks on instances with a known optimum.
//!
//! The unit square (0,0), (0,1), (1,1), (1,0) has optimal length 4; every
//! method must reach it. Small random instances are checked against brute
//! force.

use rand::Rng;
use u_tsp::aco::{ant_colony, AcoConfig};
use u_tsp::constructive::{
    cheapest_insertion, grasp, nearest_neighbor, nearest_neighbor_best_start, GraspConfig,
};
use u_tsp::distance::DistanceMatrix;
use u_tsp::evaluation::{closeness, gap_percent};
use u_tsp::exact::brute_force;
use u_tsp::fermentation::{fermentation, FermentationConfig};
use u_tsp::ga::{genetic_algorithm, memetic_algorithm, GaConfig};
use u_tsp::local_search::{iterated_local_search, two_opt_improve, IlsConfig};
use u_tsp::random::create_rng;
use u_tsp::scatter::{scatter_search, ScatterConfig};
use u_tsp::trajectory::{simulated_annealing, tabu_search, SaConfig, TabuConfig};

fn unit_square() -> DistanceMatrix {
    DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
        .expect("valid coordinates")
}

fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = create_rng(seed);
    let coords: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    DistanceMatrix::from_coords(&coords).expect("valid coordinates")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn nearest_neighbor_walks_the_square() {
    let result = nearest_neighbor(&unit_square(), 0).expect("valid");
    assert_eq!(result.tour, vec![0, 1, 2, 3]);
    assert_close(result.distance, 4.0);
    assert_eq!(result.closed(), vec![0, 1, 2, 3, 0]);
}

#[test]
fn brute_force_agrees_on_the_square() {
    let result = brute_force(&unit_square()).expect("valid");
    assert_close(result.distance, 4.0);
}

#[test]
fn two_opt_uncrosses_the_square() {
    let result = two_opt_improve(&[0, 2, 1, 3], &unit_square());
    assert_close(result.distance, 4.0);
}

#[test]
fn every_method_solves_the_square() {
    let dm = unit_square();
    let crossed = [0, 2, 1, 3];

    assert_close(cheapest_insertion(&dm, 0).expect("valid").distance, 4.0);
    assert_close(
        grasp(&dm, &GraspConfig::default().with_iterations(5).with_seed(1))
            .expect("valid")
            .distance,
        4.0,
    );
    assert_close(
        iterated_local_search(&dm, &crossed, &IlsConfig::default().with_seed(1))
            .expect("valid")
            .best
            .distance,
        4.0,
    );
    assert_close(
        simulated_annealing(
            &dm,
            &crossed,
            &SaConfig::default().with_initial_temperature(1.0).with_seed(1),
        )
        .expect("valid")
        .best
        .distance,
        4.0,
    );
    assert_close(
        tabu_search(&dm, &crossed, &TabuConfig::default())
            .expect("valid")
            .best
            .distance,
        4.0,
    );
    let ga = GaConfig::default()
        .with_population_size(10)
        .with_generations(10)
        .with_seed(1);
    assert_close(genetic_algorithm(&dm, &ga).expect("valid").best.distance, 4.0);
    assert_close(memetic_algorithm(&dm, &ga).expect("valid").best.distance, 4.0);
    assert_close(
        scatter_search(
            &dm,
            &ScatterConfig::default()
                .with_ref_set_size(4)
                .with_iterations(5)
                .with_seed(1),
        )
        .expect("valid")
        .best
        .distance,
        4.0,
    );
    assert_close(
        ant_colony(&dm, &AcoConfig::default().with_iterations(5).with_seed(1))
            .expect("valid")
            .best
            .distance,
        4.0,
    );
    assert_close(
        fermentation(&dm, &FermentationConfig::default().with_seed(1))
            .expect("valid")
            .best
            .distance,
        4.0,
    );
}

#[test]
fn heuristics_never_beat_brute_force() {
    for seed in 0..5 {
        let dm = random_instance(8, seed);
        let optimum = brute_force(&dm).expect("valid").distance;

        let nn = nearest_neighbor_best_start(&dm).expect("valid");
        assert!(nn.distance >= optimum - 1e-9);

        let memetic = memetic_algorithm(
            &dm,
            &GaConfig::default()
                .with_population_size(20)
                .with_generations(30)
                .with_seed(seed),
        )
        .expect("valid");
        assert!(memetic.best.distance >= optimum - 1e-9);
        assert!(closeness(optimum, memetic.best.distance) <= 100.0 + 1e-9);
        assert!(gap_percent(optimum, memetic.best.distance) >= -1e-9);
    }
}

#[test]
fn ils_lands_between_optimum_and_its_start() {
    for seed in 0..5 {
        let dm = random_instance(9, 100 + seed);
        let optimum = brute_force(&dm).expect("valid").distance;
        let start = nearest_neighbor(&dm, 0).expect("valid");
        let config = IlsConfig::default().with_max_no_improvement(30).with_seed(seed);
        let result = iterated_local_search(&dm, &start.tour, &config).expect("valid");
        assert!(result.best.distance >= optimum - 1e-9);
        assert!(result.best.distance <= start.distance + 1e-9);
    }
}
