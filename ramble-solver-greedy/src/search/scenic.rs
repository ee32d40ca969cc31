//! Best-first search trading distance for POI density.
//!
//! Entries are ordered by
//! `distance - attraction_weight * scenic + heuristic_weight * straight_line_to_goal`,
//! where `scenic` accumulates the POI density sampled along the path. A node
//! is closed the first time it pops; later entries for it are discarded.
//!
//! Density samples are the expensive step, so they run only when the pop
//! counter is a multiple of [`ScenicParams::scenic_interval`]; other
//! expansions contribute zero. This makes the score an approximation that
//! depends on expansion order, which is deterministic for a given network.

use log::debug;
use ramble_core::geodesy::haversine_km;
use ramble_core::{DensityIndex, Network, NodeId};

use super::frontier::{Frontier, PathArena};
use super::{ScenicParams, ScenicPath, SearchError};

#[derive(Debug, Clone, Copy)]
struct Walk {
    node: usize,
    slot: usize,
    distance_km: f64,
    scenic: u32,
}

/// Find a scenic path from `start` to `goal`.
///
/// # Errors
/// Returns [`SearchError::UnknownNode`] for endpoints outside the network and
/// [`SearchError::NoPath`] when the frontier empties, every path exceeds
/// [`ScenicParams::max_km`], or the iteration budget runs out.
#[expect(
    clippy::float_arithmetic,
    reason = "path costs combine distances, weights, and the heuristic"
)]
pub fn scenic_path(
    network: &Network,
    density: &DensityIndex,
    start: NodeId,
    goal: NodeId,
    params: &ScenicParams,
) -> Result<ScenicPath, SearchError> {
    let start_idx = network
        .index_of(start)
        .ok_or(SearchError::UnknownNode { id: start })?;
    let goal_idx = network
        .index_of(goal)
        .ok_or(SearchError::UnknownNode { id: goal })?;
    let goal_at = network
        .location(goal)
        .ok_or(SearchError::UnknownNode { id: goal })?;

    let mut arena = PathArena::default();
    let mut closed = vec![false; network.len()];
    let mut frontier = Frontier::new();
    frontier.push(
        0.0,
        Walk {
            node: start_idx,
            slot: arena.root(start_idx),
            distance_km: 0.0,
            scenic: 0,
        },
    );

    let interval = params.scenic_interval.get();
    let mut iterations: u32 = 0;
    while iterations < params.max_iterations {
        let Some(walk) = frontier.pop() else {
            break;
        };
        iterations += 1;

        let Some(seen) = closed.get_mut(walk.node) else {
            continue;
        };
        if *seen {
            continue;
        }
        *seen = true;

        if walk.node == goal_idx {
            debug!("scenic search {start} -> {goal} finished after {iterations} pops");
            return Ok(ScenicPath {
                nodes: arena.path(network, walk.slot),
                distance_km: walk.distance_km,
                scenic_score: walk.scenic,
            });
        }
        if walk.distance_km > params.max_km {
            continue;
        }

        let sample = iterations.is_multiple_of(interval);
        for adjacent in network.neighbours(walk.node) {
            if closed.get(adjacent.index).copied().unwrap_or(true) {
                continue;
            }
            let distance_km = walk.distance_km + adjacent.length_km;
            if distance_km > params.max_km {
                continue;
            }
            let Some(next) = network.node_at(adjacent.index) else {
                continue;
            };
            let attraction = if sample {
                density.count_within(next.location, params.scenic_radius_km)
            } else {
                0
            };
            let scenic = walk.scenic.saturating_add(attraction);
            let heuristic = haversine_km(next.location, goal_at);
            let cost = distance_km - params.attraction_weight * f64::from(scenic)
                + params.heuristic_weight * heuristic;
            frontier.push(
                cost,
                Walk {
                    node: adjacent.index,
                    slot: arena.extend(Some(walk.slot), adjacent.index),
                    distance_km,
                    scenic,
                },
            );
        }
    }

    debug!("scenic search {start} -> {goal} gave up after {iterations} pops");
    Err(SearchError::NoPath {
        from: start,
        to: goal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use ramble_core::test_support::{catalogue, grid_id, grid_network};
    use ramble_core::{Category, Edge, Node, PoiCatalogue};
    use rstest::{fixture, rstest};
    use std::num::NonZeroU32;

    #[fixture]
    fn no_pois() -> DensityIndex {
        DensityIndex::new(&PoiCatalogue::default())
    }

    fn two_nodes(length_m: f64) -> Network {
        Network::new(
            vec![
                Node::new(1, Coord { x: 0.0, y: 0.0 }),
                Node::new(2, Coord { x: 0.009, y: 0.0 }),
            ],
            vec![Edge::with_length(1, 2, length_m)],
        )
        .expect("network")
    }

    #[rstest]
    fn single_edge_is_walked(no_pois: DensityIndex) {
        let network = two_nodes(1000.0);
        let path = scenic_path(&network, &no_pois, 1, 2, &ScenicParams::default()).expect("path");
        assert_eq!(path.nodes, vec![1, 2]);
        assert!((path.distance_km - 1.0).abs() < 1e-12);
        assert_eq!(path.scenic_score, 0);
    }

    #[rstest]
    fn start_equal_to_goal_is_trivial(no_pois: DensityIndex) {
        let network = two_nodes(1000.0);
        let path = scenic_path(&network, &no_pois, 2, 2, &ScenicParams::default()).expect("path");
        assert_eq!(path.nodes, vec![2]);
        assert_eq!(path.distance_km, 0.0);
    }

    #[rstest]
    fn overlong_edges_are_pruned(no_pois: DensityIndex) {
        let network = two_nodes(3500.0);
        let err = scenic_path(&network, &no_pois, 1, 2, &ScenicParams::default())
            .expect_err("beyond leg cap");
        assert_eq!(err, SearchError::NoPath { from: 1, to: 2 });
    }

    #[rstest]
    fn disconnected_nodes_have_no_path(no_pois: DensityIndex) {
        let network = Network::new(
            vec![
                Node::new(1, Coord { x: 0.0, y: 0.0 }),
                Node::new(2, Coord { x: 0.001, y: 0.0 }),
            ],
            Vec::new(),
        )
        .expect("network");
        let err = scenic_path(&network, &no_pois, 1, 2, &ScenicParams::default())
            .expect_err("disconnected");
        assert_eq!(err, SearchError::NoPath { from: 1, to: 2 });
    }

    #[rstest]
    fn unknown_endpoints_are_reported(no_pois: DensityIndex) {
        let network = two_nodes(1000.0);
        let err = scenic_path(&network, &no_pois, 1, 7, &ScenicParams::default())
            .expect_err("unknown goal");
        assert_eq!(err, SearchError::UnknownNode { id: 7 });
    }

    #[rstest]
    fn iteration_budget_is_enforced(no_pois: DensityIndex) {
        let network = grid_network(6, 6);
        let params = ScenicParams {
            max_iterations: 3,
            ..ScenicParams::default()
        };
        let goal = grid_id(5, 5, 6);
        let err = scenic_path(&network, &no_pois, 0, goal, &params).expect_err("budget");
        assert_eq!(err, SearchError::NoPath { from: 0, to: goal });
    }

    #[rstest]
    fn dense_rows_attract_the_path() {
        // Every POI sits on the middle row of a 3x5 grid. With density
        // sampled on every pop, the walk between two corners of the bottom
        // row detours through the middle row instead of taking the straight
        // bottom edge.
        let network = grid_network(3, 5);
        let pois = catalogue(&[
            ("a", 1, 0, Category::Other),
            ("b", 1, 1, Category::Other),
            ("c", 1, 2, Category::Other),
            ("d", 1, 3, Category::Other),
            ("e", 1, 4, Category::Other),
        ]);
        let density = DensityIndex::new(&pois);
        let params = ScenicParams {
            scenic_interval: NonZeroU32::MIN,
            scenic_radius_km: 0.05,
            attraction_weight: 5.0,
            ..ScenicParams::default()
        };
        let start = grid_id(0, 0, 5);
        let goal = grid_id(0, 4, 5);
        let path = scenic_path(&network, &density, start, goal, &params).expect("path");
        assert_eq!(path.scenic_score, 5);
        assert!(path.nodes.contains(&grid_id(1, 2, 5)));
        assert_eq!(path.nodes.first(), Some(&start));
        assert_eq!(path.nodes.last(), Some(&goal));
    }

    #[rstest]
    #[case::every_pop(1, 5)]
    #[case::every_second_pop(2, 2)]
    #[case::every_third_pop(3, 1)]
    #[case::default_cadence(10, 0)]
    fn density_is_sampled_at_the_configured_cadence(
        #[case] interval: u32,
        #[case] expected: u32,
    ) {
        // On a single street the k-th pop is the k-th node, and it pushes
        // only the next node. With one POI on every node and a sample radius
        // too small to reach a neighbour, the score counts the sampled pops
        // among the five that expand towards the goal.
        let network = grid_network(1, 6);
        let pois = catalogue(&[
            ("a", 0, 0, Category::Other),
            ("b", 0, 1, Category::Other),
            ("c", 0, 2, Category::Other),
            ("d", 0, 3, Category::Other),
            ("e", 0, 4, Category::Other),
            ("f", 0, 5, Category::Other),
        ]);
        let density = DensityIndex::new(&pois);
        let params = ScenicParams {
            scenic_interval: NonZeroU32::new(interval).expect("non-zero interval"),
            scenic_radius_km: 0.05,
            ..ScenicParams::default()
        };
        let path = scenic_path(&network, &density, grid_id(0, 0, 6), grid_id(0, 5, 6), &params)
            .expect("path");
        assert_eq!(path.nodes, (0..6_u64).collect::<Vec<_>>());
        assert_eq!(path.scenic_score, expected);
    }

    #[rstest]
    fn path_distance_matches_edges(no_pois: DensityIndex) {
        let network = grid_network(4, 4);
        let goal = grid_id(3, 3, 4);
        let path = scenic_path(&network, &no_pois, 0, goal, &ScenicParams::default()).expect("path");
        let walked: f64 = path
            .nodes
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] => network.edge_km(*a, *b),
                _ => None,
            })
            .sum();
        assert!((walked - path.distance_km).abs() < 1e-9);
        assert!(path.distance_km <= ScenicParams::default().max_km);
    }
}
