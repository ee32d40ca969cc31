//! Solver abstraction and request/response types.

use std::time::Duration;

use log::warn;
use thiserror::Error;

use crate::poi::same_name;
use crate::{TourConfigError, TourPlan};

/// Longest budget accepted, in minutes.
pub const MAX_BUDGET_MINUTES: f64 = 720.0;

/// Budgets outside this range are accepted with a warning.
pub const RECOMMENDED_BUDGET_MINUTES: std::ops::RangeInclusive<f64> = 30.0..=480.0;

/// Parameters for a solve request.
///
/// # Examples
/// ```rust
/// use ramble_core::SolveRequest;
///
/// let request = SolveRequest::new("Central Station", "Vondelpark", 180.0);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Name of the point of interest the tour starts at.
    pub start: String,
    /// Name of the point of interest the tour ends at.
    pub end: String,
    /// Total time available, visits included, in minutes.
    pub budget_minutes: f64,
}

impl SolveRequest {
    /// Construct a request.
    pub fn new(start: impl Into<String>, end: impl Into<String>, budget_minutes: f64) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            budget_minutes,
        }
    }

    /// Check the budget and endpoints.
    ///
    /// Budgets outside the recommended 30 to 480 minute band are logged at
    /// `warn` but accepted.
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidBudget`] for non-finite, non-positive, or
    /// over-long budgets and [`SolveError::IdenticalEndpoints`] when start and
    /// end name the same place.
    pub fn validate(&self) -> Result<(), SolveError> {
        validate_budget(self.budget_minutes)?;
        if same_name(&self.start, &self.end) {
            return Err(SolveError::IdenticalEndpoints {
                name: self.start.clone(),
            });
        }
        Ok(())
    }
}

/// Check that a time budget is usable.
///
/// Budgets outside [`RECOMMENDED_BUDGET_MINUTES`] are logged at `warn` but
/// accepted.
///
/// # Errors
/// Returns [`SolveError::InvalidBudget`] for non-finite, non-positive, or
/// over-long budgets.
///
/// # Examples
/// ```
/// use ramble_core::{SolveError, validate_budget};
///
/// assert!(validate_budget(90.0).is_ok());
/// assert!(matches!(validate_budget(f64::NAN), Err(SolveError::InvalidBudget { .. })));
/// ```
pub fn validate_budget(minutes: f64) -> Result<(), SolveError> {
    if !minutes.is_finite() || minutes <= 0.0 || minutes > MAX_BUDGET_MINUTES {
        return Err(SolveError::InvalidBudget { minutes });
    }
    if !RECOMMENDED_BUDGET_MINUTES.contains(&minutes) {
        warn!("budget of {minutes} min is outside the recommended 30-480 min range");
    }
    Ok(())
}

/// Counters describing how a plan was produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
    /// Candidate stops that were scored.
    pub candidates_scored: usize,
    /// Candidate stops accepted into the tour.
    pub candidates_accepted: usize,
    /// Legs that fell back to a straight-line estimate.
    pub fallback_legs: usize,
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// The assembled tour.
    pub plan: TourPlan,
    /// How the tour was produced.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A named place could not be found or placed on the network.
    #[error("attraction '{name}' not found")]
    AttractionNotFound {
        /// Requested name.
        name: String,
    },
    /// No walkable path connects two stops.
    #[error("no path found from '{from}' to '{to}'")]
    NoPathFound {
        /// Origin of the failed search.
        from: String,
        /// Destination of the failed search.
        to: String,
    },
    /// Stop selection produced too few stops for a tour.
    #[error("tour needs at least 2 stops, selection produced {stops}")]
    InsufficientSelection {
        /// Number of stops produced.
        stops: usize,
    },
    /// The time budget was unusable.
    #[error("invalid time budget of {minutes} min; expected more than 0 and at most 720")]
    InvalidBudget {
        /// Rejected budget.
        minutes: f64,
    },
    /// Start and end name the same place.
    #[error("start and end are both '{name}'")]
    IdenticalEndpoints {
        /// The shared name.
        name: String,
    },
    /// The solver was configured with unusable parameters.
    #[error(transparent)]
    InvalidConfig(#[from] TourConfigError),
}

/// Find a tour satisfying the caller's constraints.
///
/// Implementations should return [`SolveError`] for invalid parameters
/// rather than panicking. Solvers must be `Send + Sync` so one instance can
/// serve requests across threads.
pub trait Solver: Send + Sync {
    /// Solve a request, producing a tour or an error.
    ///
    /// # Errors
    /// Returns [`SolveError`] when the request cannot be satisfied.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}
