//! Greedy scenic tour solver for Ramble.
//!
//! Planning runs in two phases. [`select_stops`] ranks every named POI
//! against the corridor between start and end and accepts candidates in
//! rank order while an estimated time budget lasts. Each consecutive pair
//! of stops is then joined by [`search::scenic_path`], a best-first search
//! that trades distance for POI density. The shortest direct path,
//! [`search::shortest_path`], is kept alongside the tour for comparison.
//!
//! [`GreedySolver`] implements the [`Solver`](ramble_core::Solver) trait;
//! [`plan_tour`] wraps it for one-off calls.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod search;
mod selector;
mod solver;

pub use selector::{Selection, select_stops};
pub use solver::{GreedySolver, plan_tour};
