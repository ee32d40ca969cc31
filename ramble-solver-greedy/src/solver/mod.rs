//! `GreedySolver`: stop selection followed by per-leg scenic routing.

use std::time::Instant;

use log::{debug, warn};
use ramble_core::geodesy::WalkingPace;
use ramble_core::{
    Baseline, DensityIndex, Diagnostics, Leg, Network, NodeResolver, PoiCatalogue, Scorer,
    SolveError, SolveRequest, SolveResponse, Solver, Stop, TourConfig, TourPlan,
};
use ramble_scorer::AttractionScorer;
use rayon::prelude::*;

use crate::search::{ScenicParams, scenic_path, shortest_path};
use crate::selector::{Endpoints, Selection, select_with_baseline};

/// Solver that picks stops greedily and joins them with scenic paths.
///
/// The solver borrows one city snapshot and owns the lookup structures built
/// over it, so a single instance can serve many requests, from several
/// threads if needed. It is generic over the [`Scorer`] used to rank
/// candidates.
pub struct GreedySolver<'a, C>
where
    C: Scorer,
{
    network: &'a Network,
    scorer: C,
    resolver: NodeResolver<'a>,
    density: DensityIndex,
    config: TourConfig,
}

impl<'a, C> GreedySolver<'a, C>
where
    C: Scorer,
{
    /// Construct a solver using the default [`TourConfig`].
    #[must_use]
    pub fn new(network: &'a Network, pois: &'a PoiCatalogue, scorer: C) -> Self {
        Self::with_config(network, pois, scorer, TourConfig::default())
    }

    /// Construct a solver with explicit tunables.
    ///
    /// The configuration is validated on every solve rather than here.
    #[must_use]
    pub fn with_config(
        network: &'a Network,
        pois: &'a PoiCatalogue,
        scorer: C,
        config: TourConfig,
    ) -> Self {
        Self {
            network,
            scorer,
            resolver: NodeResolver::new(network, pois),
            density: DensityIndex::new(pois),
            config,
        }
    }

    /// Tunables in use.
    #[must_use]
    pub const fn config(&self) -> &TourConfig {
        &self.config
    }

    fn leg(&self, from: &Stop, to: &Stop, visit_minutes: f64, pace: WalkingPace) -> Leg {
        let params = ScenicParams::from(&self.config);
        match scenic_path(self.network, &self.density, from.node, to.node, &params) {
            Ok(found) => Leg {
                from: from.name.clone(),
                to: to.name.clone(),
                distance_km: found.distance_km,
                walk_minutes: pace.minutes_for(found.distance_km),
                visit_minutes,
                scenic_score: found.scenic_score,
                path: found.nodes,
                estimated: false,
            },
            Err(err) => {
                warn!(
                    "{err}; estimating the leg from '{}' to '{}' as a straight line",
                    from.name, to.name
                );
                let distance_km = self
                    .network
                    .straight_line_km(from.node, to.node)
                    .unwrap_or_default();
                Leg {
                    from: from.name.clone(),
                    to: to.name.clone(),
                    distance_km,
                    walk_minutes: pace.minutes_for(distance_km),
                    visit_minutes,
                    scenic_score: 0,
                    path: vec![from.node, to.node],
                    estimated: true,
                }
            }
        }
    }
}

impl<'a> GreedySolver<'a, AttractionScorer<'a>> {
    /// Construct a solver ranking candidates with [`AttractionScorer`].
    ///
    /// The scorer's density radius comes from
    /// [`TourConfig::scoring_radius_km`].
    #[must_use]
    pub fn attraction(network: &'a Network, pois: &'a PoiCatalogue, config: TourConfig) -> Self {
        let scorer = AttractionScorer::from_config(network, pois, &config);
        Self::with_config(network, pois, scorer, config)
    }
}

impl<C> Solver for GreedySolver<'_, C>
where
    C: Scorer,
{
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let started_at = Instant::now();
        self.config.validate()?;
        request.validate()?;
        let pace = self.config.pace()?;

        let endpoints = Endpoints {
            start: &request.start,
            end: &request.end,
            start_node: self.resolver.resolve_name(&request.start)?,
            end_node: self.resolver.resolve_name(&request.end)?,
        };
        let direct = match shortest_path(self.network, endpoints.start_node, endpoints.end_node) {
            Ok(route) => Some(route),
            Err(err) => {
                debug!("no baseline route: {err}");
                None
            }
        };

        let selection = match select_with_baseline(
            &self.resolver,
            &self.scorer,
            &endpoints,
            direct.as_ref(),
            request.budget_minutes,
            &self.config,
        ) {
            Ok(selection) => selection,
            Err(SolveError::NoPathFound { from, to }) => {
                warn!("'{from}' and '{to}' are not connected; planning a direct tour");
                Selection::direct(&request.start, &request.end)
            }
            Err(err) => return Err(err),
        };
        if selection.stops.len() < 2 {
            return Err(SolveError::InsufficientSelection {
                stops: selection.stops.len(),
            });
        }

        let stops = selection
            .stops
            .iter()
            .map(|name| {
                self.resolver.resolve_name(name).map(|node| Stop {
                    name: name.clone(),
                    node,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let leg_count = stops.len().saturating_sub(1);
        let legs: Vec<Leg> = stops
            .par_windows(2)
            .enumerate()
            .filter_map(|(index, pair)| {
                let [from, to] = pair else {
                    return None;
                };
                let visit_minutes = if index + 1 == leg_count {
                    0.0
                } else {
                    self.config.visit_minutes
                };
                Some(self.leg(from, to, visit_minutes, pace))
            })
            .collect();

        let baseline = direct.map(|route| Baseline {
            distance_km: route.distance_km,
            minutes: pace.minutes_for(route.distance_km),
            path: route.nodes,
        });
        let plan = TourPlan::from_legs(legs, stops, baseline);
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            candidates_scored: selection.candidates_scored,
            candidates_accepted: selection.candidates_accepted,
            fallback_legs: plan.itinerary.estimated_legs(),
        };
        debug!(
            "planned {} legs over {:.2} km in {:?}",
            plan.itinerary.len(),
            plan.total_distance_km,
            diagnostics.solve_time
        );
        Ok(SolveResponse { plan, diagnostics })
    }
}

/// Plan a tour from `start` to `end` within `budget_minutes`.
///
/// Convenience wrapper building a [`GreedySolver`] with the default
/// [`AttractionScorer`].
///
/// # Errors
/// Returns [`SolveError`] when the request or configuration is invalid or an
/// endpoint cannot be placed on the network.
///
/// # Examples
/// ```
/// use ramble_core::test_support::{catalogue, grid_network};
/// use ramble_core::{Category, TourConfig};
/// use ramble_solver_greedy::plan_tour;
///
/// let network = grid_network(3, 6);
/// let pois = catalogue(&[
///     ("Station", 0, 0, Category::Other),
///     ("Museum", 1, 2, Category::Museum),
///     ("Harbour", 0, 5, Category::Other),
/// ]);
/// let plan = plan_tour(&network, &pois, "Station", "Harbour", 120.0, &TourConfig::default())
///     .expect("plan");
/// assert_eq!(plan.stops.len(), 3);
/// assert_eq!(plan.itinerary.len(), 2);
/// ```
pub fn plan_tour(
    network: &Network,
    pois: &PoiCatalogue,
    start: &str,
    end: &str,
    budget_minutes: f64,
    config: &TourConfig,
) -> Result<TourPlan, SolveError> {
    let solver = GreedySolver::attraction(network, pois, *config);
    solver
        .solve(&SolveRequest::new(start, end, budget_minutes))
        .map(|response| response.plan)
}

#[cfg(test)]
mod tests;
