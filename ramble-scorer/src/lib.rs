//! Attraction scoring for Ramble tour candidates.
//!
//! A candidate's score blends three signals:
//! - **Density**: how many POIs cluster around the candidate's street node,
//!   favouring lively neighbourhoods.
//! - **Corridor**: how little the candidate bends the walk away from the
//!   straight line between start and end.
//! - **Category**: a multiplier favouring museums, galleries, attractions,
//!   and viewpoints.
//!
//! The score is a ranking signal only; it carries no unit. [`AttractionScorer`]
//! implements the [`Scorer`](ramble_core::Scorer) trait so solvers can rank
//! candidates without knowing the formula.
//!
//! # Examples
//!
//! ```
//! use ramble_core::{Category, Corridor, Scorer};
//! use ramble_core::test_support::{catalogue, grid_coord, grid_network};
//! use ramble_scorer::AttractionScorer;
//!
//! let network = grid_network(3, 3);
//! let pois = catalogue(&[
//!     ("Gate", 0, 0, Category::Other),
//!     ("Gallery", 1, 1, Category::Gallery),
//!     ("Quay", 2, 2, Category::Other),
//! ]);
//! let scorer = AttractionScorer::new(&network, &pois);
//! let corridor = Corridor::new(grid_coord(0, 0), grid_coord(2, 2));
//! let gallery = pois.find("Gallery").expect("present");
//! assert!(scorer.score(gallery, &corridor) > 0.0);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use log::debug;
use ramble_core::geodesy::haversine_km;
use ramble_core::{
    Category, Corridor, DensityIndex, Network, NodeId, NodeResolver, PoiCatalogue,
    PointOfInterest, Scorer, TourConfig,
};

mod types;

pub use types::{AttractionWeights, ScorerError};

/// Number of POIs strictly within `radius_km` of `node`.
///
/// Unknown nodes score zero.
#[must_use]
pub fn density_score(network: &Network, node: NodeId, index: &DensityIndex, radius_km: f64) -> u32 {
    network
        .location(node)
        .map_or(0, |location| index.count_within(location, radius_km))
}

/// Score how close a candidate lies to the direct corridor.
///
/// `from_start` and `from_end` are straight-line distances from the tour's
/// endpoints to the candidate, `direct` the distance between the endpoints.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "detour is the excess of the two-hop distance over the direct one"
)]
pub const fn corridor_score(from_start: f64, from_end: f64, direct: f64) -> f64 {
    let detour = from_start + from_end - direct;
    if detour < 0.5 {
        3.0
    } else if detour < 1.0 {
        2.0
    } else if detour < 2.0 {
        1.0
    } else {
        0.3
    }
}

/// Multiplier applied to a candidate's score for its category.
#[must_use]
pub const fn category_bonus(category: Category) -> f64 {
    match category {
        Category::Museum | Category::Gallery => 1.5,
        Category::Attraction | Category::Viewpoint => 1.3,
        Category::Artwork | Category::Other => 1.0,
    }
}

/// Scorer ranking candidates by density, corridor fit, and category.
///
/// The scorer owns a [`NodeResolver`] and a [`DensityIndex`] built over one
/// city snapshot; both are read-only after construction, so a single scorer
/// can rank candidates from several threads.
#[derive(Debug)]
pub struct AttractionScorer<'a> {
    network: &'a Network,
    resolver: NodeResolver<'a>,
    density: DensityIndex,
    weights: AttractionWeights,
}

impl<'a> AttractionScorer<'a> {
    /// Build a scorer with default weights.
    #[must_use]
    pub fn new(network: &'a Network, pois: &'a PoiCatalogue) -> Self {
        Self {
            network,
            resolver: NodeResolver::new(network, pois),
            density: DensityIndex::new(pois),
            weights: AttractionWeights::default(),
        }
    }

    /// Build a scorer using the density radius from `config`.
    ///
    /// The radius is taken as given; a radius that is not positive makes
    /// every density count zero.
    #[must_use]
    pub fn from_config(network: &'a Network, pois: &'a PoiCatalogue, config: &TourConfig) -> Self {
        Self {
            weights: AttractionWeights::from(config),
            ..Self::new(network, pois)
        }
    }

    /// Build a scorer with explicit weights.
    ///
    /// # Errors
    /// Returns [`ScorerError`] when the weights fail validation.
    pub fn with_weights(
        network: &'a Network,
        pois: &'a PoiCatalogue,
        weights: AttractionWeights,
    ) -> Result<Self, ScorerError> {
        let validated = weights.validate()?;
        Ok(Self {
            weights: validated,
            ..Self::new(network, pois)
        })
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> AttractionWeights {
        self.weights
    }

    /// Score `poi` for a tour along `corridor`.
    ///
    /// The POI is placed on the network by name, so duplicate names share
    /// the first entry's node. Candidates that cannot be placed score zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the score is a weighted sum scaled by the category bonus"
    )]
    pub fn score_poi(&self, poi: &PointOfInterest, corridor: &Corridor) -> f64 {
        let Some(node) = self.resolver.lookup(&poi.name) else {
            debug!("'{}' is not on the network; scoring zero", poi.name);
            return 0.0;
        };
        let Some(at) = self.network.location(node) else {
            return 0.0;
        };
        let density = density_score(
            self.network,
            node,
            &self.density,
            self.weights.density_radius_km,
        );
        let corridor_fit = corridor_score(
            haversine_km(corridor.start, at),
            haversine_km(at, corridor.end),
            corridor.direct_km(),
        );
        (f64::from(density) * self.weights.density + corridor_fit * self.weights.corridor)
            * category_bonus(poi.category)
    }
}

impl Scorer for AttractionScorer<'_> {
    fn score(&self, poi: &PointOfInterest, corridor: &Corridor) -> f64 {
        Self::sanitise(self.score_poi(poi, corridor))
    }
}
