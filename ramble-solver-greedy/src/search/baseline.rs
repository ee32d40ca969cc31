//! Shortest walking path, used as the direct-route comparison.

use ramble_core::geodesy::haversine_km;
use ramble_core::{Network, NodeId};

use super::frontier::Frontier;
use super::{RoutedPath, SearchError};

/// A* over true edge lengths with a straight-line heuristic.
///
/// # Errors
/// Returns [`SearchError::UnknownNode`] for endpoints outside the network and
/// [`SearchError::NoPath`] when the goal is unreachable.
///
/// # Examples
/// ```
/// use ramble_core::test_support::{grid_id, grid_network};
/// use ramble_solver_greedy::search::shortest_path;
///
/// let network = grid_network(3, 3);
/// let route = shortest_path(&network, grid_id(0, 0, 3), grid_id(2, 2, 3)).expect("route");
/// assert_eq!(route.nodes.len(), 5);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "A* accumulates distances and adds the heuristic"
)]
pub fn shortest_path(
    network: &Network,
    start: NodeId,
    goal: NodeId,
) -> Result<RoutedPath, SearchError> {
    let start_idx = network
        .index_of(start)
        .ok_or(SearchError::UnknownNode { id: start })?;
    let goal_idx = network
        .index_of(goal)
        .ok_or(SearchError::UnknownNode { id: goal })?;
    let goal_at = network
        .location(goal)
        .ok_or(SearchError::UnknownNode { id: goal })?;

    let mut best = vec![f64::INFINITY; network.len()];
    let mut parent: Vec<Option<usize>> = vec![None; network.len()];
    let mut closed = vec![false; network.len()];
    let mut frontier = Frontier::new();
    if let Some(slot) = best.get_mut(start_idx) {
        *slot = 0.0;
    }
    frontier.push(0.0, (start_idx, 0.0_f64));

    while let Some((node, distance_km)) = frontier.pop() {
        let Some(seen) = closed.get_mut(node) else {
            continue;
        };
        if *seen {
            continue;
        }
        *seen = true;

        if node == goal_idx {
            return Ok(RoutedPath {
                nodes: unwind(network, &parent, goal_idx),
                distance_km,
            });
        }

        for adjacent in network.neighbours(node) {
            let candidate = distance_km + adjacent.length_km;
            let Some(known) = best.get_mut(adjacent.index) else {
                continue;
            };
            if candidate >= *known {
                continue;
            }
            *known = candidate;
            if let Some(link) = parent.get_mut(adjacent.index) {
                *link = Some(node);
            }
            let heuristic = network
                .node_at(adjacent.index)
                .map_or(0.0, |next| haversine_km(next.location, goal_at));
            frontier.push(candidate + heuristic, (adjacent.index, candidate));
        }
    }

    Err(SearchError::NoPath {
        from: start,
        to: goal,
    })
}

fn unwind(network: &Network, parent: &[Option<usize>], goal: usize) -> Vec<NodeId> {
    let mut indices = vec![goal];
    let mut cursor = parent.get(goal).copied().flatten();
    while let Some(idx) = cursor {
        indices.push(idx);
        cursor = parent.get(idx).copied().flatten();
    }
    indices
        .into_iter()
        .rev()
        .filter_map(|idx| network.node_at(idx).map(|node| node.id))
        .collect()
}
