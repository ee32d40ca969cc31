//! Facade crate for the Ramble walking-tour planner.
//!
//! This crate re-exports the core domain types and exposes the greedy
//! planner behind the `solver-greedy` feature.

#![forbid(unsafe_code)]

pub use ramble_core::{
    Baseline, BaselineComparison, Category, Diagnostics, Edge, Itinerary, Leg, Network,
    NetworkError, Node, NodeId, PoiCatalogue, PointOfInterest, Scorer, SolveError, SolveRequest,
    SolveResponse, Solver, Stop, TourConfig, TourConfigError, TourPlan, TourSummary, WalkingPace,
    validate_budget,
};

#[cfg(feature = "solver-greedy")]
pub use ramble_scorer::{AttractionScorer, AttractionWeights};

#[cfg(feature = "solver-greedy")]
pub use ramble_solver_greedy::{GreedySolver, plan_tour, select_stops};
