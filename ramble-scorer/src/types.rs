//! Weights and errors for attraction scoring.

use ramble_core::TourConfig;
use thiserror::Error;

/// Relative weighting of the attraction score components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractionWeights {
    /// Multiplier applied to the POI density around a candidate.
    pub density: f64,
    /// Multiplier applied to the corridor score.
    pub corridor: f64,
    /// Radius of the density sample in km.
    pub density_radius_km: f64,
}

impl Default for AttractionWeights {
    fn default() -> Self {
        Self {
            density: 1.5,
            corridor: 3.0,
            density_radius_km: 0.5,
        }
    }
}

impl From<&TourConfig> for AttractionWeights {
    fn from(config: &TourConfig) -> Self {
        Self {
            density_radius_km: config.scoring_radius_km,
            ..Self::default()
        }
    }
}

impl AttractionWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScorerError::InvalidWeights`] when a multiplier is negative
    /// or not finite, and [`ScorerError::InvalidRadius`] when the density
    /// radius is not a positive finite number.
    pub fn validate(self) -> Result<Self, ScorerError> {
        let multipliers_ok = [self.density, self.corridor]
            .iter()
            .all(|weight| weight.is_finite() && *weight >= 0.0);
        if !multipliers_ok {
            return Err(ScorerError::InvalidWeights);
        }
        if !self.density_radius_km.is_finite() || self.density_radius_km <= 0.0 {
            return Err(ScorerError::InvalidRadius {
                km: self.density_radius_km,
            });
        }
        Ok(self)
    }
}

/// Errors raised when configuring an [`AttractionScorer`](crate::AttractionScorer).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScorerError {
    /// A component multiplier was unusable.
    #[error("attraction weights must be finite and non-negative")]
    InvalidWeights,
    /// The density sample radius was unusable.
    #[error("density radius must be positive, got {km} km")]
    InvalidRadius {
        /// Rejected radius.
        km: f64,
    },
}
