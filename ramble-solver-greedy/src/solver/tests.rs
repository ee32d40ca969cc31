//! Tests for the `GreedySolver`.

use super::*;
use geo::Coord;
use ramble_core::test_support::{ConstantScorer, catalogue, grid_id, grid_network};
use ramble_core::{Category, Edge, Node, PointOfInterest};
use rstest::{fixture, rstest};

const COLS: u64 = 8;

#[fixture]
fn grid() -> Network {
    grid_network(3, COLS)
}

#[fixture]
fn pois() -> PoiCatalogue {
    catalogue(&[
        ("Station", 0, 0, Category::Other),
        ("Gallery", 1, 2, Category::Gallery),
        ("Museum", 2, 4, Category::Museum),
        ("Mural", 1, 5, Category::Artwork),
        ("Harbour", 0, 7, Category::Other),
    ])
}

fn two_node_city() -> (Network, PoiCatalogue) {
    let network = Network::new(
        vec![
            Node::new(1, Coord { x: 0.0, y: 0.0 }),
            Node::new(2, Coord { x: 0.009, y: 0.0 }),
        ],
        vec![Edge::with_length(1, 2, 1000.0)],
    )
    .expect("network");
    let pois = [
        PointOfInterest::new("A", Coord { x: 0.0, y: 0.0 }, Category::Other),
        PointOfInterest::new("B", Coord { x: 0.009, y: 0.0 }, Category::Other),
    ]
    .into_iter()
    .collect();
    (network, pois)
}

#[rstest]
fn single_edge_tour_walks_the_edge() {
    let (network, pois) = two_node_city();
    let solver = GreedySolver::attraction(&network, &pois, TourConfig::default());
    let response = solver
        .solve(&SolveRequest::new("A", "B", 60.0))
        .expect("plan");
    let plan = response.plan;
    assert_eq!(plan.stop_names().collect::<Vec<_>>(), ["A", "B"]);
    assert_eq!(plan.path, vec![1, 2]);
    assert!((plan.total_distance_km - 1.0).abs() < 1e-9);
    let leg = plan.itinerary.legs().first().expect("one leg");
    assert_eq!(leg.visit_minutes, 0.0);
    assert!((leg.walk_minutes - 12.0).abs() < 1e-9);
    let baseline = plan.baseline.expect("baseline");
    assert!((baseline.distance_km - 1.0).abs() < 1e-9);
    assert!((baseline.minutes - 12.0).abs() < 1e-9);
    assert_eq!(response.diagnostics.fallback_legs, 0);
}

#[rstest]
fn intermediate_legs_include_visit_time(grid: Network, pois: PoiCatalogue) {
    let solver = GreedySolver::new(&grid, &pois, ConstantScorer(1.0));
    let plan = solver
        .solve(&SolveRequest::new("Station", "Harbour", 240.0))
        .expect("plan")
        .plan;
    let legs = plan.itinerary.legs();
    assert_eq!(legs.len(), plan.stops.len() - 1);
    let (last, earlier) = legs.split_last().expect("legs");
    assert_eq!(last.visit_minutes, 0.0);
    assert!(earlier.iter().all(|leg| leg.visit_minutes == 15.0));
    assert!(!earlier.is_empty());
}

#[rstest]
fn legs_join_into_a_continuous_path(grid: Network, pois: PoiCatalogue) {
    let solver = GreedySolver::new(&grid, &pois, ConstantScorer(1.0));
    let plan = solver
        .solve(&SolveRequest::new("Station", "Harbour", 240.0))
        .expect("plan")
        .plan;
    assert_eq!(plan.path.first(), Some(&grid_id(0, 0, COLS)));
    assert_eq!(plan.path.last(), Some(&grid_id(0, 7, COLS)));
    for pair in plan.path.windows(2) {
        let [from, to] = pair else {
            panic!("windows yield pairs");
        };
        assert!(grid.edge_km(*from, *to).is_some(), "{from} -> {to} is not an edge");
    }
    let sum: f64 = plan.itinerary.legs().iter().map(|leg| leg.distance_km).sum();
    assert!((plan.total_distance_km - sum).abs() < 1e-9);
}

#[rstest]
fn tight_budget_goes_straight_to_the_end(grid: Network, pois: PoiCatalogue) {
    let solver = GreedySolver::new(&grid, &pois, ConstantScorer(1.0));
    let response = solver
        .solve(&SolveRequest::new("Station", "Harbour", 20.0))
        .expect("plan");
    assert_eq!(
        response.plan.stop_names().collect::<Vec<_>>(),
        ["Station", "Harbour"]
    );
    assert_eq!(response.diagnostics.candidates_accepted, 0);
}

#[rstest]
fn unknown_start_is_reported(grid: Network, pois: PoiCatalogue) {
    let solver = GreedySolver::new(&grid, &pois, ConstantScorer(1.0));
    let err = solver
        .solve(&SolveRequest::new("Atlantis", "Harbour", 120.0))
        .expect_err("unknown start");
    assert_eq!(
        err,
        SolveError::AttractionNotFound {
            name: "Atlantis".to_owned()
        }
    );
}

#[rstest]
fn disconnected_endpoints_fall_back_to_an_estimate() {
    let network = Network::new(
        vec![
            Node::new(1, Coord { x: 0.0, y: 0.0 }),
            Node::new(2, Coord { x: 0.001, y: 0.0 }),
            Node::new(3, Coord { x: 0.008, y: 0.0 }),
            Node::new(4, Coord { x: 0.009, y: 0.0 }),
        ],
        vec![Edge::unmeasured(1, 2), Edge::unmeasured(3, 4)],
    )
    .expect("network");
    let pois: PoiCatalogue = [
        PointOfInterest::new("West", Coord { x: 0.0, y: 0.0 }, Category::Other),
        PointOfInterest::new("East", Coord { x: 0.009, y: 0.0 }, Category::Other),
    ]
    .into_iter()
    .collect();
    let solver = GreedySolver::attraction(&network, &pois, TourConfig::default());
    let response = solver
        .solve(&SolveRequest::new("West", "East", 90.0))
        .expect("fallback plan");
    let plan = response.plan;
    assert!(plan.baseline.is_none());
    assert_eq!(plan.path, vec![1, 4]);
    let leg = plan.itinerary.legs().first().expect("one leg");
    assert!(leg.estimated);
    assert_eq!(leg.scenic_score, 0);
    assert!((leg.distance_km - 1.0).abs() < 0.01);
    assert_eq!(response.diagnostics.fallback_legs, 1);
}

#[rstest]
fn more_stops_never_shorten_the_walk(grid: Network, pois: PoiCatalogue) {
    let exact = TourConfig {
        attraction_weight: 0.0,
        heuristic_weight: 1.0,
        ..TourConfig::default()
    };
    let direct = GreedySolver::with_config(
        &grid,
        &pois,
        ConstantScorer(1.0),
        TourConfig {
            max_stops: 0,
            ..exact
        },
    );
    let touring = GreedySolver::with_config(&grid, &pois, ConstantScorer(1.0), exact);
    let request = SolveRequest::new("Station", "Harbour", 240.0);
    let short = direct.solve(&request).expect("direct").plan;
    let long = touring.solve(&request).expect("touring").plan;
    assert!(long.stops.len() > short.stops.len());
    assert!(long.total_distance_km + 1e-9 >= short.total_distance_km);
}

#[rstest]
fn repeated_solves_agree(grid: Network, pois: PoiCatalogue) {
    let solver = GreedySolver::attraction(&grid, &pois, TourConfig::default());
    let request = SolveRequest::new("Station", "Harbour", 180.0);
    let first = solver.solve(&request).expect("first").plan;
    let second = solver.solve(&request).expect("second").plan;
    assert_eq!(first, second);
}

#[rstest]
fn unusable_config_is_rejected(grid: Network, pois: PoiCatalogue) {
    let config = TourConfig {
        buffer_fraction: 1.0,
        ..TourConfig::default()
    };
    let solver = GreedySolver::with_config(&grid, &pois, ConstantScorer(1.0), config);
    let err = solver
        .solve(&SolveRequest::new("Station", "Harbour", 120.0))
        .expect_err("bad buffer");
    assert!(matches!(err, SolveError::InvalidConfig(_)));
}

#[rstest]
#[case(SolveRequest::new("Station", "station", 120.0))]
#[case(SolveRequest::new("Station", "Harbour", 0.0))]
#[case(SolveRequest::new("Station", "Harbour", 800.0))]
fn invalid_requests_are_rejected(grid: Network, pois: PoiCatalogue, #[case] request: SolveRequest) {
    let solver = GreedySolver::new(&grid, &pois, ConstantScorer(1.0));
    let err = solver.solve(&request).expect_err("invalid request");
    assert!(matches!(
        err,
        SolveError::IdenticalEndpoints { .. } | SolveError::InvalidBudget { .. }
    ));
}

#[rstest]
fn plan_tour_matches_the_solver(grid: Network, pois: PoiCatalogue) {
    let config = TourConfig::default();
    let plan = plan_tour(&grid, &pois, "Station", "Harbour", 180.0, &config).expect("plan");
    let solved = GreedySolver::attraction(&grid, &pois, config)
        .solve(&SolveRequest::new("Station", "Harbour", 180.0))
        .expect("solve")
        .plan;
    assert_eq!(plan, solved);
}
