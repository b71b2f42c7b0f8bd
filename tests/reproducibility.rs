//! Determinism under a fixed seed, composition through the constructor and
//! improver traits, and configuration loading.

use rand::Rng;
use u_tsp::aco::{ant_colony, AcoConfig, AntColony};
use u_tsp::constructive::{
    grasp, CheapestInsertion, GraspConfig, GraspConstructor, NearestNeighbor, RandomTour,
};
use u_tsp::distance::DistanceMatrix;
use u_tsp::evaluation::is_valid_tour;
use u_tsp::fermentation::{fermentation, Fermentation, FermentationConfig};
use u_tsp::ga::{genetic_algorithm, CrossoverMethod, GaConfig, GeneticAlgorithm, MutationMethod};
use u_tsp::local_search::{iterated_local_search, IlsConfig, IteratedLocalSearch, TwoOpt};
use u_tsp::models::{TourConstructor, TourImprover};
use u_tsp::pipeline::Pipeline;
use u_tsp::random::create_rng;
use u_tsp::scatter::{scatter_search, ScatterConfig, ScatterSearch};
use u_tsp::trajectory::{
    select_move, simulated_annealing, tabu_search, SaConfig, SimulatedAnnealing, TabuConfig,
    TabuList, TabuSearch,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = create_rng(seed);
    let coords: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    DistanceMatrix::from_coords(&coords).expect("valid coordinates")
}

fn constructors() -> Vec<Box<dyn TourConstructor>> {
    vec![
        Box::new(NearestNeighbor::from_start(0)),
        Box::new(NearestNeighbor::best_start()),
        Box::new(CheapestInsertion::default()),
        Box::new(RandomTour),
        Box::new(GraspConstructor::new(0.3)),
        Box::new(GeneticAlgorithm::new(
            GaConfig::default().with_population_size(12).with_generations(5),
        )),
        Box::new(GeneticAlgorithm::new(
            GaConfig::memetic().with_population_size(12).with_generations(3),
        )),
        Box::new(ScatterSearch::new(
            ScatterConfig::default().with_ref_set_size(6).with_iterations(3),
        )),
        Box::new(AntColony::new(AcoConfig::default().with_iterations(3))),
        Box::new(Fermentation::new(
            FermentationConfig::default().with_iterations(2),
        )),
    ]
}

fn improvers() -> Vec<Box<dyn TourImprover>> {
    vec![
        Box::new(TwoOpt),
        Box::new(IteratedLocalSearch::new(
            IlsConfig::default().with_max_no_improvement(5),
        )),
        Box::new(SimulatedAnnealing::new(
            SaConfig::default().with_max_iterations(300),
        )),
        Box::new(TabuSearch::new(TabuConfig::default().with_max_iterations(10))),
    ]
}

#[test]
fn same_seed_same_result() {
    init_logging();
    let dm = random_instance(14, 3);
    let start: Vec<usize> = (0..14).collect();

    let grasp_config = GraspConfig::default().with_iterations(5).with_seed(8);
    assert_eq!(grasp(&dm, &grasp_config), grasp(&dm, &grasp_config));

    let ils = IlsConfig::default().with_max_no_improvement(10).with_seed(8);
    assert_eq!(
        iterated_local_search(&dm, &start, &ils),
        iterated_local_search(&dm, &start, &ils)
    );

    let sa = SaConfig::default().with_max_iterations(1_000).with_seed(8);
    assert_eq!(
        simulated_annealing(&dm, &start, &sa),
        simulated_annealing(&dm, &start, &sa)
    );

    let tabu = TabuConfig::default().with_max_iterations(20);
    assert_eq!(tabu_search(&dm, &start, &tabu), tabu_search(&dm, &start, &tabu));

    let ga = GaConfig::default()
        .with_population_size(16)
        .with_generations(10)
        .with_seed(8);
    assert_eq!(genetic_algorithm(&dm, &ga), genetic_algorithm(&dm, &ga));

    let scatter = ScatterConfig::default()
        .with_ref_set_size(6)
        .with_iterations(5)
        .with_seed(8);
    assert_eq!(scatter_search(&dm, &scatter), scatter_search(&dm, &scatter));

    let aco = AcoConfig::default().with_iterations(5).with_seed(8);
    assert_eq!(ant_colony(&dm, &aco), ant_colony(&dm, &aco));

    let ferm = FermentationConfig::default().with_seed(8);
    assert_eq!(fermentation(&dm, &ferm), fermentation(&dm, &ferm));
}

#[test]
fn every_constructor_and_improver_yields_a_permutation() {
    init_logging();
    let dm = random_instance(11, 21);
    let mut rng = create_rng(5);
    for constructor in constructors() {
        let tour = constructor.construct(&dm, &mut rng).expect("valid");
        assert!(is_valid_tour(&tour, 11), "{} broke the tour", constructor.name());
        for improver in improvers() {
            let improved = improver.improve(&dm, tour.clone(), &mut rng).expect("valid");
            assert!(is_valid_tour(&improved, 11), "{} broke the tour", improver.name());
            assert!(
                dm.tour_length(&improved) <= dm.tour_length(&tour) + 1e-9,
                "{} made the tour longer",
                improver.name()
            );
        }
    }
}

#[test]
fn pipeline_is_reproducible() {
    let dm = random_instance(16, 4);
    let pipeline = Pipeline::new(RandomTour)
        .then(TwoOpt)
        .then(SimulatedAnnealing::new(SaConfig::default().with_max_iterations(500)));
    assert_eq!(
        pipeline.run_seeded(&dm, Some(12)).expect("valid"),
        pipeline.run_seeded(&dm, Some(12)).expect("valid")
    );
}

#[test]
fn tabu_aspiration_admits_new_best() {
    let dm = DistanceMatrix::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
        .expect("valid coordinates");
    let tour = [0, 2, 1, 3];
    let current = dm.tour_length(&tour);
    let mut tabu = TabuList::new(2);
    tabu.push((0, 2));

    let with = select_move(&dm, &tour, current, current, &tabu, true).expect("move");
    assert_eq!(with.positions, (0, 2));
    assert!((with.distance - 4.0).abs() < 1e-10);

    let without = select_move(&dm, &tour, current, current, &tabu, false).expect("move");
    assert_ne!(without.positions, (0, 2));
}

#[test]
fn configs_load_from_partial_json() {
    let ga: GaConfig = serde_json::from_str(
        r#"{"population_size": 50, "crossover": "cut_fill", "mutation": "inversion", "seed": 3}"#,
    )
    .expect("valid json");
    assert_eq!(ga.population_size, 50);
    assert_eq!(ga.crossover, CrossoverMethod::CutFill);
    assert_eq!(ga.mutation, MutationMethod::Inversion);
    assert_eq!(ga.seed, Some(3));
    assert!((ga.crossover_rate - 0.9).abs() < 1e-12);

    let aco: AcoConfig = serde_json::from_str(r#"{"rho": 0.1}"#).expect("valid json");
    assert_eq!(aco.n_ants, 10);
    assert!((aco.rho - 0.1).abs() < 1e-12);

    let tabu: TabuConfig = serde_json::from_str(r#"{"tenure": 4}"#).expect("valid json");
    assert_eq!(tabu.tenure_for(100), 4);

    let sa: SaConfig = serde_json::from_str("{}").expect("valid json");
    assert_eq!(sa, SaConfig::default());

    let round_trip: ScatterConfig =
        serde_json::from_str(&serde_json::to_string(&ScatterConfig::default()).expect("serialize"))
            .expect("valid json");
    assert_eq!(round_trip, ScatterConfig::default());
}
