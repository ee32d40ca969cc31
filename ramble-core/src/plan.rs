//! Tour plans produced by solvers.

use crate::NodeId;

/// One walk between consecutive stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Name of the stop the leg starts at.
    pub from: String,
    /// Name of the stop the leg ends at.
    pub to: String,
    /// Walking distance in km.
    pub distance_km: f64,
    /// Walking time in minutes.
    pub walk_minutes: f64,
    /// Time spent at `to`; zero for the final leg.
    pub visit_minutes: f64,
    /// POI density sampled along the leg.
    pub scenic_score: u32,
    /// Network nodes walked, endpoints included.
    pub path: Vec<NodeId>,
    /// Set when no path was found and the leg is a straight-line estimate.
    pub estimated: bool,
}

impl Leg {
    /// Walking plus visiting time.
    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.walk_minutes + self.visit_minutes
    }
}

/// Ordered legs of a tour.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Itinerary(Vec<Leg>);

impl Itinerary {
    /// Wrap an ordered list of legs.
    #[must_use]
    pub const fn new(legs: Vec<Leg>) -> Self {
        Self(legs)
    }

    /// Legs in walking order.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.0
    }

    /// Number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Report whether the itinerary has no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of legs that used the straight-line fallback.
    #[must_use]
    pub fn estimated_legs(&self) -> usize {
        self.0.iter().filter(|leg| leg.estimated).count()
    }
}

/// Shortest direct walk from start to end, kept for comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Baseline {
    /// Street distance in km.
    pub distance_km: f64,
    /// Walking time in minutes.
    pub minutes: f64,
    /// Network nodes walked.
    pub path: Vec<NodeId>,
}

/// A stop and the node it was placed on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// POI name as requested or selected.
    pub name: String,
    /// Nearest network node.
    pub node: NodeId,
}

/// A complete walking tour.
///
/// `path` concatenates the legs' node paths with each shared boundary node
/// kept once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourPlan {
    /// Every node walked, in order.
    pub path: Vec<NodeId>,
    /// Sum of leg distances in km.
    pub total_distance_km: f64,
    /// Sum of walking and visiting time in minutes.
    pub total_minutes: f64,
    /// Sum of leg scenic scores.
    pub total_scenic_score: u32,
    /// Per-leg breakdown.
    pub itinerary: Itinerary,
    /// Direct route, when one exists.
    pub baseline: Option<Baseline>,
    /// Stops in visiting order.
    pub stops: Vec<Stop>,
}

impl TourPlan {
    /// Build a plan by accumulating `legs`.
    #[must_use]
    pub fn from_legs(legs: Vec<Leg>, stops: Vec<Stop>, baseline: Option<Baseline>) -> Self {
        let mut path: Vec<NodeId> = Vec::new();
        let mut total_distance_km = 0.0;
        let mut total_minutes = 0.0;
        let mut total_scenic_score: u32 = 0;
        for leg in &legs {
            total_distance_km += leg.distance_km;
            total_minutes += leg.total_minutes();
            total_scenic_score = total_scenic_score.saturating_add(leg.scenic_score);
            let skip = usize::from(!path.is_empty());
            path.extend(leg.path.iter().skip(skip));
        }
        Self {
            path,
            total_distance_km,
            total_minutes,
            total_scenic_score,
            itinerary: Itinerary::new(legs),
            baseline,
            stops,
        }
    }

    /// Stop names in visiting order.
    pub fn stop_names(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|stop| stop.name.as_str())
    }
}
