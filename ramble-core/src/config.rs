//! Tunable planning parameters.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::geodesy::WalkingPace;

/// Parameters steering stop selection and the scenic search.
///
/// Every field has a default suited to a compact historic city centre.
///
/// # Examples
/// ```
/// use ramble_core::TourConfig;
///
/// let config = TourConfig {
///     max_stops: 5,
///     ..TourConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.visit_minutes, 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct TourConfig {
    /// Walking speed in km/h.
    pub walking_speed_kmh: f64,
    /// Minutes spent at every intermediate stop.
    pub visit_minutes: f64,
    /// Share of the budget held back for unplanned delays, in `[0, 1)`.
    pub buffer_fraction: f64,
    /// Longest straight-line hop to a candidate stop, and the scenic search
    /// distance cap, in km.
    pub max_leg_km: f64,
    /// Candidates scoring below this are never visited.
    pub min_score: f64,
    /// Maximum number of intermediate stops.
    pub max_stops: usize,
    /// Reward applied to scenic density during search.
    pub attraction_weight: f64,
    /// Weight of the straight-line distance-to-goal term.
    pub heuristic_weight: f64,
    /// Scenic density is sampled on every n-th expansion.
    pub scenic_interval: NonZeroU32,
    /// Radius of the scenic density sample in km.
    pub scenic_radius_km: f64,
    /// Radius used when scoring candidate density in km.
    pub scoring_radius_km: f64,
    /// Ratio of street distance to straight-line distance assumed when
    /// estimating walking time during selection.
    pub detour_factor: f64,
    /// Runaway guard on scenic search expansions.
    pub max_search_iterations: u32,
}

const DEFAULT_SCENIC_INTERVAL: NonZeroU32 = match NonZeroU32::new(10) {
    Some(interval) => interval,
    None => NonZeroU32::MIN,
};

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            walking_speed_kmh: 5.0,
            visit_minutes: 15.0,
            buffer_fraction: 0.15,
            max_leg_km: 3.0,
            min_score: 0.3,
            max_stops: 15,
            attraction_weight: 1.5,
            heuristic_weight: 1.2,
            scenic_interval: DEFAULT_SCENIC_INTERVAL,
            scenic_radius_km: 0.4,
            scoring_radius_km: 0.5,
            detour_factor: 1.3,
            max_search_iterations: 30_000,
        }
    }
}

/// Errors returned by [`TourConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourConfigError {
    /// Walking speed was zero, negative, or not finite.
    #[error("walking speed must be positive, got {speed_kmh} km/h")]
    InvalidSpeed {
        /// Rejected speed.
        speed_kmh: f64,
    },
    /// Visit time was negative or not finite.
    #[error("visit time must be non-negative, got {minutes} min")]
    InvalidVisitTime {
        /// Rejected duration.
        minutes: f64,
    },
    /// Buffer fraction fell outside `[0, 1)`.
    #[error("buffer fraction must be in [0, 1), got {fraction}")]
    InvalidBuffer {
        /// Rejected fraction.
        fraction: f64,
    },
    /// Leg cap was zero, negative, or not finite.
    #[error("maximum leg distance must be positive, got {km} km")]
    InvalidLegCap {
        /// Rejected cap.
        km: f64,
    },
    /// A weight, radius, or threshold was not finite.
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidParameter {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl TourConfig {
    /// Check every field for a usable value.
    ///
    /// # Errors
    /// Returns the first [`TourConfigError`] found.
    pub fn validate(&self) -> Result<(), TourConfigError> {
        if WalkingPace::new(self.walking_speed_kmh).is_none() {
            return Err(TourConfigError::InvalidSpeed {
                speed_kmh: self.walking_speed_kmh,
            });
        }
        if !self.visit_minutes.is_finite() || self.visit_minutes < 0.0 {
            return Err(TourConfigError::InvalidVisitTime {
                minutes: self.visit_minutes,
            });
        }
        if !(0.0..1.0).contains(&self.buffer_fraction) {
            return Err(TourConfigError::InvalidBuffer {
                fraction: self.buffer_fraction,
            });
        }
        if !self.max_leg_km.is_finite() || self.max_leg_km <= 0.0 {
            return Err(TourConfigError::InvalidLegCap {
                km: self.max_leg_km,
            });
        }
        let parameters = [
            ("min_score", self.min_score),
            ("attraction_weight", self.attraction_weight),
            ("heuristic_weight", self.heuristic_weight),
            ("scenic_radius_km", self.scenic_radius_km),
            ("scoring_radius_km", self.scoring_radius_km),
            ("detour_factor", self.detour_factor),
        ];
        for (field, value) in parameters {
            if !value.is_finite() || value < 0.0 {
                return Err(TourConfigError::InvalidParameter { field, value });
            }
        }
        Ok(())
    }

    /// Validated walking pace.
    ///
    /// # Errors
    /// Returns [`TourConfigError::InvalidSpeed`] when the speed is unusable.
    pub fn pace(&self) -> Result<WalkingPace, TourConfigError> {
        WalkingPace::new(self.walking_speed_kmh).ok_or(TourConfigError::InvalidSpeed {
            speed_kmh: self.walking_speed_kmh,
        })
    }
}
