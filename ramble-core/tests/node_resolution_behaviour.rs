//! Behavioural tests for placing attraction names on the street network.

use std::cell::RefCell;

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use ramble_core::{
    Category, Edge, Network, Node, NodeId, NodeLocator, NodeResolver, PoiCatalogue,
    PointOfInterest, SolveError, nearest_node_linear,
};

#[derive(Debug, Default)]
struct ResolutionWorld {
    network: RefCell<Network>,
    pois: RefCell<PoiCatalogue>,
    resolved: RefCell<Option<Result<NodeId, SolveError>>>,
    comparisons: RefCell<Vec<(Option<NodeId>, Option<NodeId>)>>,
}

#[fixture]
fn world() -> ResolutionWorld {
    ResolutionWorld::default()
}

#[given("a three node street with a museum beside the middle node")]
fn given_street(world: &ResolutionWorld) {
    let network = Network::new(
        vec![
            Node::new(100, Coord { x: 0.0, y: 0.0 }),
            Node::new(200, Coord { x: 0.002, y: 0.0 }),
            Node::new(300, Coord { x: 0.004, y: 0.0 }),
        ],
        vec![
            Edge::with_length(100, 200, 222.0),
            Edge::with_length(200, 300, 222.0),
        ],
    )
    .expect("valid street");
    world.network.replace(network);
    world.pois.replace(PoiCatalogue::from_iter([PointOfInterest::new(
        "City Museum",
        Coord {
            x: 0.0021,
            y: 0.0003,
        },
        Category::Museum,
    )]));
}

fn resolve(world: &ResolutionWorld, name: &str) {
    let network = world.network.borrow();
    let pois = world.pois.borrow();
    let resolver = NodeResolver::new(&network, &pois);
    world.resolved.replace(Some(resolver.resolve_name(name)));
}

#[when("I resolve the museum in lower case")]
fn when_resolve_museum(world: &ResolutionWorld) {
    resolve(world, "city museum");
}

#[when("I resolve an attraction that is not in the catalogue")]
fn when_resolve_unknown(world: &ResolutionWorld) {
    resolve(world, "Lost Temple");
}

#[when("I locate the nearest node to points along the street")]
fn when_locate_along(world: &ResolutionWorld) {
    let network = world.network.borrow();
    let locator = NodeLocator::new(&network);
    let samples = (0..=40).map(|step| Coord {
        x: f64::from(step) * 0.0001,
        y: 0.0005,
    });
    let comparisons = samples
        .map(|target| (locator.nearest(target), nearest_node_linear(&network, target)))
        .collect();
    world.comparisons.replace(comparisons);
}

#[then("the middle node is returned")]
fn then_middle(world: &ResolutionWorld) {
    assert_eq!(*world.resolved.borrow(), Some(Ok(200)));
}

#[then("resolution fails naming the missing attraction")]
fn then_not_found(world: &ResolutionWorld) {
    assert_eq!(
        *world.resolved.borrow(),
        Some(Err(SolveError::AttractionNotFound {
            name: "Lost Temple".to_owned()
        }))
    );
}

#[then("every indexed answer matches the linear scan")]
fn then_locator_matches(world: &ResolutionWorld) {
    let comparisons = world.comparisons.borrow();
    assert_eq!(comparisons.len(), 41);
    for (indexed, linear) in comparisons.iter() {
        assert!(indexed.is_some());
        assert_eq!(indexed, linear);
    }
}

#[scenario(path = "tests/features/node_resolution.feature", index = 0)]
fn resolves_named_attraction(world: ResolutionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/node_resolution.feature", index = 1)]
fn reports_unknown_attraction(world: ResolutionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/node_resolution.feature", index = 2)]
fn locator_matches_linear_scan(world: ResolutionWorld) {
    let _ = world;
}
