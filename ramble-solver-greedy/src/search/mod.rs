//! Path searches over the street network.
//!
//! Both searches run on dense node indices and report paths as provider
//! node identifiers.

mod baseline;
mod frontier;
mod scenic;

use std::num::NonZeroU32;

use ramble_core::{NodeId, TourConfig};
use thiserror::Error;

pub use baseline::shortest_path;
pub use scenic::scenic_path;

/// Errors raised by the path searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// An endpoint is not part of the network.
    #[error("node {id} is not in the network")]
    UnknownNode {
        /// Missing identifier.
        id: NodeId,
    },
    /// The search exhausted its frontier or iteration budget.
    #[error("no path from node {from} to node {to}")]
    NoPath {
        /// Search origin.
        from: NodeId,
        /// Search goal.
        to: NodeId,
    },
}

/// A path found by the baseline search.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedPath {
    /// Nodes walked, endpoints included.
    pub nodes: Vec<NodeId>,
    /// Street distance in km.
    pub distance_km: f64,
}

/// A path found by the scenic search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenicPath {
    /// Nodes walked, endpoints included.
    pub nodes: Vec<NodeId>,
    /// Street distance in km.
    pub distance_km: f64,
    /// POI density accumulated at sampled expansions.
    pub scenic_score: u32,
}

/// Tuning for [`scenic_path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenicParams {
    /// Paths longer than this are abandoned, in km.
    pub max_km: f64,
    /// Reward applied to accumulated scenic density.
    pub attraction_weight: f64,
    /// Weight of the straight-line distance-to-goal term.
    pub heuristic_weight: f64,
    /// Density is sampled when the pop counter is a multiple of this.
    pub scenic_interval: NonZeroU32,
    /// Radius of the density sample in km.
    pub scenic_radius_km: f64,
    /// Maximum number of frontier pops.
    pub max_iterations: u32,
}

impl From<&TourConfig> for ScenicParams {
    fn from(config: &TourConfig) -> Self {
        Self {
            max_km: config.max_leg_km,
            attraction_weight: config.attraction_weight,
            heuristic_weight: config.heuristic_weight,
            scenic_interval: config.scenic_interval,
            scenic_radius_km: config.scenic_radius_km,
            max_iterations: config.max_search_iterations,
        }
    }
}

impl Default for ScenicParams {
    fn default() -> Self {
        Self::from(&TourConfig::default())
    }
}
