//! Budget report and baseline comparison for a finished plan.

use crate::TourPlan;

/// How a scenic tour compares with walking straight to the end.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineComparison {
    /// Additional street distance in km.
    pub extra_distance_km: f64,
    /// Additional distance relative to the direct route, in percent.
    pub extra_distance_percent: f64,
    /// Total tour time, buffer included, minus the direct walking time.
    pub extra_minutes: f64,
    /// Intermediate stops gained.
    pub extra_stops: usize,
}

/// Time budget report derived from a [`TourPlan`].
///
/// The buffer is sized so that it makes up `buffer_fraction` of the total:
/// `active * fraction / (1 - fraction)`.
///
/// # Examples
/// ```
/// use ramble_core::{TourPlan, TourSummary};
///
/// let plan = TourPlan::from_legs(Vec::new(), Vec::new(), None);
/// let summary = TourSummary::new(&plan, 60.0, 0.15);
/// assert!(summary.fits_budget);
/// assert_eq!(summary.stops, 1);
/// assert!(summary.comparison.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourSummary {
    /// Total tour distance in km.
    pub distance_km: f64,
    /// Walking plus visiting minutes.
    pub active_minutes: f64,
    /// Minutes held back for breaks and delays.
    pub buffer_minutes: f64,
    /// Active plus buffer minutes.
    pub total_minutes: f64,
    /// Requested budget in minutes.
    pub budget_minutes: f64,
    /// Whether the buffered total fits the budget.
    pub fits_budget: bool,
    /// Stops visited, start and end included.
    pub stops: usize,
    /// Comparison with the direct route, when one was found.
    pub comparison: Option<BaselineComparison>,
}

impl TourSummary {
    /// Summarise `plan` against a budget.
    #[must_use]
    pub fn new(plan: &TourPlan, budget_minutes: f64, buffer_fraction: f64) -> Self {
        let legs = plan.itinerary.len();
        let active_minutes = plan.total_minutes;
        let buffer_minutes = if buffer_fraction < 1.0 {
            active_minutes * buffer_fraction / (1.0 - buffer_fraction)
        } else {
            0.0
        };
        let total_minutes = active_minutes + buffer_minutes;
        let comparison = plan
            .baseline
            .as_ref()
            .filter(|baseline| baseline.distance_km > 0.0)
            .map(|baseline| {
                let extra_distance_km = plan.total_distance_km - baseline.distance_km;
                BaselineComparison {
                    extra_distance_km,
                    extra_distance_percent: extra_distance_km / baseline.distance_km * 100.0,
                    extra_minutes: total_minutes - baseline.minutes,
                    extra_stops: legs.saturating_sub(1),
                }
            });
        Self {
            distance_km: plan.total_distance_km,
            active_minutes,
            buffer_minutes,
            total_minutes,
            budget_minutes,
            fits_budget: total_minutes <= budget_minutes,
            stops: legs + 1,
            comparison,
        }
    }
}
