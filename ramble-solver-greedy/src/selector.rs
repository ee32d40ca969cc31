//! Greedy stop selection under a time budget.
//!
//! Candidates are ranked once against the straight corridor from start to
//! end, then accepted in rank order while the touring budget lasts. Walking
//! time to each candidate is estimated from the straight-line hop inflated
//! by [`TourConfig::detour_factor`]; the real street distance is only known
//! once the scenic search runs.

use log::debug;
use ramble_core::geodesy::haversine_km;
use ramble_core::{
    Corridor, Network, NodeId, NodeResolver, PoiCatalogue, Scorer, SolveError, TourConfig,
    same_name, validate_budget,
};
use ramble_scorer::AttractionScorer;
use rayon::prelude::*;

use crate::search::{RoutedPath, shortest_path};

/// Stops chosen for a tour together with selection counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Stop names in visiting order, start and end included.
    pub stops: Vec<String>,
    /// Candidates that were scored.
    pub candidates_scored: usize,
    /// Candidates accepted between start and end.
    pub candidates_accepted: usize,
}

impl Selection {
    pub(crate) fn direct(start: &str, end: &str) -> Self {
        Self {
            stops: vec![start.to_owned(), end.to_owned()],
            ..Self::default()
        }
    }
}

/// Requested endpoints and the nodes they were placed on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Endpoints<'n> {
    pub start: &'n str,
    pub end: &'n str,
    pub start_node: NodeId,
    pub end_node: NodeId,
}

/// Choose stops for a tour from `start` to `end`.
///
/// The returned list always begins with `start`, ends with `end`, and holds
/// at most [`TourConfig::max_stops`] stops in between.
///
/// # Errors
/// Returns [`SolveError::AttractionNotFound`] when an endpoint cannot be
/// placed, [`SolveError::NoPathFound`] when no street path joins the
/// endpoints, [`SolveError::InvalidBudget`] for an unusable budget, and
/// [`SolveError::InvalidConfig`] for unusable tunables.
///
/// # Examples
/// ```
/// use ramble_core::test_support::{catalogue, grid_network};
/// use ramble_core::{Category, TourConfig};
/// use ramble_solver_greedy::select_stops;
///
/// let network = grid_network(3, 6);
/// let pois = catalogue(&[
///     ("Station", 0, 0, Category::Other),
///     ("Museum", 1, 2, Category::Museum),
///     ("Harbour", 0, 5, Category::Other),
/// ]);
/// let stops = select_stops(&network, &pois, "Station", "Harbour", 120.0, &TourConfig::default())
///     .expect("selection");
/// assert_eq!(stops, ["Station", "Museum", "Harbour"]);
/// ```
pub fn select_stops(
    network: &Network,
    pois: &PoiCatalogue,
    start: &str,
    end: &str,
    budget_minutes: f64,
    config: &TourConfig,
) -> Result<Vec<String>, SolveError> {
    validate_budget(budget_minutes)?;
    config.validate()?;
    let resolver = NodeResolver::new(network, pois);
    let scorer = AttractionScorer::from_config(network, pois, config);
    let endpoints = Endpoints {
        start,
        end,
        start_node: resolver.resolve_name(start)?,
        end_node: resolver.resolve_name(end)?,
    };
    let baseline = shortest_path(network, endpoints.start_node, endpoints.end_node).ok();
    let selection = select_with_baseline(
        &resolver,
        &scorer,
        &endpoints,
        baseline.as_ref(),
        budget_minutes,
        config,
    )?;
    Ok(selection.stops)
}

/// Selection proper, reusing an already computed baseline.
#[expect(
    clippy::float_arithmetic,
    reason = "budget bookkeeping subtracts and accumulates minutes"
)]
pub(crate) fn select_with_baseline<C: Scorer>(
    resolver: &NodeResolver<'_>,
    scorer: &C,
    endpoints: &Endpoints<'_>,
    baseline: Option<&RoutedPath>,
    budget_minutes: f64,
    config: &TourConfig,
) -> Result<Selection, SolveError> {
    let Some(direct) = baseline else {
        return Err(SolveError::NoPathFound {
            from: endpoints.start.to_owned(),
            to: endpoints.end.to_owned(),
        });
    };
    let pace = config.pace()?;
    let touring =
        budget_minutes * (1.0 - config.buffer_fraction) - pace.minutes_for(direct.distance_km);
    if touring < config.visit_minutes {
        debug!("touring budget of {touring:.1} min leaves no room for a visit");
        return Ok(Selection::direct(endpoints.start, endpoints.end));
    }

    let network = resolver.network();
    let not_found = |name: &str| SolveError::AttractionNotFound {
        name: name.to_owned(),
    };
    let start_at = network
        .location(endpoints.start_node)
        .ok_or_else(|| not_found(endpoints.start))?;
    let end_at = network
        .location(endpoints.end_node)
        .ok_or_else(|| not_found(endpoints.end))?;

    let ranked = rank_candidates(
        resolver.pois(),
        scorer,
        endpoints,
        Corridor::new(start_at, end_at),
        config.min_score,
    );
    let candidates_scored = ranked.scored;

    let mut stops = vec![endpoints.start.to_owned()];
    let mut current = start_at;
    let mut time_used = 0.0;
    for (name, score) in ranked.accepted {
        if stops.len() > config.max_stops {
            break;
        }
        let Some(at) = resolver
            .lookup(name)
            .and_then(|node| network.location(node))
        else {
            continue;
        };
        let straight = haversine_km(current, at);
        if straight > config.max_leg_km {
            continue;
        }
        let stop_minutes = pace.minutes_for(straight * config.detour_factor) + config.visit_minutes;
        if time_used + stop_minutes > touring {
            continue;
        }
        debug!("accepting '{name}' (score {score:.2}, {stop_minutes:.1} min)");
        time_used += stop_minutes;
        current = at;
        stops.push(name.to_owned());
    }
    let candidates_accepted = stops.len().saturating_sub(1);
    stops.push(endpoints.end.to_owned());

    debug!(
        "selected {candidates_accepted} of {candidates_scored} candidates using {time_used:.1} of {touring:.1} min"
    );
    Ok(Selection {
        stops,
        candidates_scored,
        candidates_accepted,
    })
}

struct Ranking<'p> {
    accepted: Vec<(&'p str, f64)>,
    scored: usize,
}

/// Score every distinct name except the endpoints and keep those reaching
/// `min_score`, best first. Equal scores keep catalogue order.
fn rank_candidates<'p, C: Scorer>(
    pois: &'p PoiCatalogue,
    scorer: &C,
    endpoints: &Endpoints<'_>,
    corridor: Corridor,
    min_score: f64,
) -> Ranking<'p> {
    let names: Vec<&str> = pois
        .distinct_names()
        .into_iter()
        .filter(|name| !same_name(name, endpoints.start) && !same_name(name, endpoints.end))
        .collect();
    let scored = names.len();
    let mut accepted: Vec<(&str, f64)> = names
        .par_iter()
        .map(|&name| {
            let score = pois
                .find(name)
                .map_or(0.0, |poi| scorer.score(poi, &corridor));
            (name, score)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .filter(|&(_, score)| score >= min_score)
        .collect();
    accepted.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ranking { accepted, scored }
}
