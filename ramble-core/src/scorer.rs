//! Rank candidate stops for a tour.
//!
//! The `Scorer` trait assigns a ranking score to a
//! [`PointOfInterest`](crate::PointOfInterest) given the [`Corridor`]
//! between the tour's start and end.

use geo::Coord;

use crate::PointOfInterest;
use crate::geodesy::haversine_km;

/// The straight line a tour would follow without detours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corridor {
    /// Location of the start node.
    pub start: Coord<f64>,
    /// Location of the end node.
    pub end: Coord<f64>,
}

impl Corridor {
    /// Construct a corridor between two node locations.
    #[must_use]
    pub const fn new(start: Coord<f64>, end: Coord<f64>) -> Self {
        Self { start, end }
    }

    /// Straight-line length of the corridor in km.
    #[must_use]
    pub fn direct_km(&self) -> f64 {
        haversine_km(self.start, self.end)
    }
}

/// Calculate a ranking score for a candidate stop.
///
/// Higher scores make a stop more attractive. Implementations must be
/// thread-safe (`Send` + `Sync`) so candidates can be scored in parallel.
/// The method is infallible; implementers must return `0.0` when no
/// information is available.
///
/// Implementations must produce finite, non-negative scores. Use
/// [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use ramble_core::{Category, Corridor, PointOfInterest, Scorer};
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn score(&self, _poi: &PointOfInterest, _corridor: &Corridor) -> f64 {
///         1.0
///     }
/// }
///
/// let poi = PointOfInterest::new("Mill", Coord { x: 0.0, y: 0.0 }, Category::Other);
/// let corridor = Corridor::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 });
/// assert_eq!(FlatScorer.score(&poi, &corridor), 1.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `poi` on a tour along `corridor`.
    fn score(&self, poi: &PointOfInterest, corridor: &Corridor) -> f64;

    /// Validate a raw score.
    ///
    /// Returns `0.0` for non-finite or negative values.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.max(0.0)
    }
}
