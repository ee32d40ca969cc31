//! Distance and walking-time conversions shared by every planning stage.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching
//! the rest of the crate.

use geo::Coord;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate length of one degree, used for planar proximity checks.
pub const KM_PER_DEGREE: f64 = 111.0;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Great-circle distance between two points in kilometres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ramble_core::geodesy::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let one_degree_north = Coord { x: 0.0, y: 1.0 };
/// let km = haversine_km(origin, one_degree_north);
/// assert!((km - 111.19).abs() < 0.01);
/// ```
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.x - from.x).to_radians();
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Straight-line distance in degree space scaled by [`KM_PER_DEGREE`].
///
/// This is the cheap proximity measure used for attraction density; it is
/// not a geodesic distance.
#[must_use]
pub fn planar_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    (to.x - from.x).hypot(to.y - from.y) * KM_PER_DEGREE
}

/// Walking time in minutes for `distance_km` at `speed_kmh`.
///
/// Returns `None` when the speed is not a positive finite number.
///
/// # Examples
/// ```
/// use ramble_core::geodesy::estimate_minutes;
///
/// assert_eq!(estimate_minutes(5.0, 5.0), Some(60.0));
/// assert_eq!(estimate_minutes(1.0, 0.0), None);
/// ```
#[must_use]
pub fn estimate_minutes(distance_km: f64, speed_kmh: f64) -> Option<f64> {
    if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
        return None;
    }
    Some(distance_km / speed_kmh * MINUTES_PER_HOUR)
}

/// Split a duration in minutes into whole hours and remaining whole minutes.
///
/// Missing input stays missing so callers can render "unknown" durations.
///
/// # Examples
/// ```
/// use ramble_core::geodesy::split_hours_minutes;
///
/// assert_eq!(split_hours_minutes(Some(135.7)), Some((2, 15)));
/// assert_eq!(split_hours_minutes(None), None);
/// ```
#[must_use]
pub fn split_hours_minutes(minutes: Option<f64>) -> Option<(u32, u32)> {
    let total = minutes.filter(|m| m.is_finite())?;
    // Floored and clamped into range, so the cast cannot truncate.
    let whole = total.floor().clamp(0.0, f64::from(u32::MAX)) as u32;
    Some((whole / 60, whole % 60))
}

/// A validated walking speed.
///
/// Holding a `WalkingPace` guarantees [`estimate_minutes`] would succeed, so
/// planning code can convert distances without re-checking the speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkingPace {
    speed_kmh: f64,
}

impl WalkingPace {
    /// Wrap `speed_kmh`, rejecting zero, negative, and non-finite speeds.
    #[must_use]
    pub fn new(speed_kmh: f64) -> Option<Self> {
        estimate_minutes(0.0, speed_kmh).map(|_| Self { speed_kmh })
    }

    /// Speed in kilometres per hour.
    #[must_use]
    pub const fn speed_kmh(self) -> f64 {
        self.speed_kmh
    }

    /// Minutes needed to walk `distance_km`.
    #[must_use]
    pub fn minutes_for(self, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh * MINUTES_PER_HOUR
    }
}
