//! Core domain types for the Ramble walking-tour planner.
//!
//! The crate holds the read-only city snapshot (street [`Network`] and
//! [`PoiCatalogue`]), the spatial lookups built over it, and the seams
//! between planning stages: the [`Scorer`] trait that ranks candidate stops
//! and the [`Solver`] trait that turns a [`SolveRequest`] into a
//! [`TourPlan`]. Constructors return `Result` to surface invalid input
//! early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod category;
mod config;
pub mod geodesy;
mod network;
mod plan;
mod poi;
mod scorer;
mod solver;
pub mod spatial;
mod summary;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use category::Category;
pub use config::{TourConfig, TourConfigError};
pub use geodesy::WalkingPace;
pub use network::{Adjacent, Edge, Network, NetworkError, Node, NodeId};
pub use plan::{Baseline, Itinerary, Leg, Stop, TourPlan};
pub use poi::{PoiCatalogue, PointOfInterest, PointOfInterestError, same_name};
pub use scorer::{Corridor, Scorer};
pub use solver::{
    Diagnostics, MAX_BUDGET_MINUTES, RECOMMENDED_BUDGET_MINUTES, SolveError, SolveRequest,
    SolveResponse, Solver, validate_budget,
};
pub use spatial::{DensityIndex, NodeLocator, NodeResolver, nearest_node_linear, resolve_node};
pub use summary::{BaselineComparison, TourSummary};
