//! Points of interest and the catalogue the planner draws them from.

use geo::{Centroid, Coord, Polygon};
use thiserror::Error;

use crate::Category;

/// A named place a tour may visit.
///
/// Names are the public key and compare case-insensitively. Area features
/// are located by the centroid of their footprint.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use ramble_core::{Category, PointOfInterest};
///
/// let poi = PointOfInterest::new("Rijksmuseum", Coord { x: 4.885, y: 52.36 }, Category::Museum);
/// assert!(poi.matches_name("RIJKSMUSEUM"));
/// assert!(poi.footprint.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Display name.
    pub name: String,
    /// Representative location; the centroid for area features.
    pub location: Coord<f64>,
    /// Broad kind of place.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Category,
    /// Outline for area features.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub footprint: Option<Polygon<f64>>,
}

/// Errors returned by [`PointOfInterest::area`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointOfInterestError {
    /// The footprint had no points to take a centroid of.
    #[error("area '{name}' has an empty footprint")]
    EmptyFootprint {
        /// Name of the rejected feature.
        name: String,
    },
}

impl PointOfInterest {
    /// Construct a point feature.
    pub fn new(name: impl Into<String>, location: Coord<f64>, category: Category) -> Self {
        Self {
            name: name.into(),
            location,
            category,
            footprint: None,
        }
    }

    /// Construct an area feature located at the centroid of `footprint`.
    ///
    /// # Errors
    /// Returns [`PointOfInterestError::EmptyFootprint`] when the polygon has
    /// no centroid.
    pub fn area(
        name: impl Into<String>,
        footprint: Polygon<f64>,
        category: Category,
    ) -> Result<Self, PointOfInterestError> {
        let name = name.into();
        let Some(centroid) = footprint.centroid() else {
            return Err(PointOfInterestError::EmptyFootprint { name });
        };
        Ok(Self {
            name,
            location: centroid.0,
            category,
            footprint: Some(footprint),
        })
    }

    /// Report whether `name` refers to this feature, ignoring case.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        same_name(&self.name, name)
    }
}

/// Case-insensitive name equality used for every POI lookup.
#[must_use]
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Ordered, read-only snapshot of the points of interest in a city.
///
/// Duplicate names are allowed; lookups return the first match in
/// insertion order.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use ramble_core::{Category, PoiCatalogue, PointOfInterest};
///
/// let catalogue = PoiCatalogue::from_iter([
///     PointOfInterest::new("Dam Square", Coord { x: 4.893, y: 52.373 }, Category::Attraction),
///     PointOfInterest::new("dam square", Coord { x: 9.0, y: 9.0 }, Category::Other),
/// ]);
/// let found = catalogue.find("DAM SQUARE").expect("present");
/// assert_eq!(found.category, Category::Attraction);
/// assert_eq!(catalogue.distinct_names(), vec!["Dam Square"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct PoiCatalogue {
    pois: Vec<PointOfInterest>,
}

impl PoiCatalogue {
    /// Wrap an ordered list of points of interest.
    #[must_use]
    pub const fn new(pois: Vec<PointOfInterest>) -> Self {
        Self { pois }
    }

    /// First POI whose name matches `name`, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&PointOfInterest> {
        let wanted = name.to_lowercase();
        self.pois.iter().find(|poi| poi.name.to_lowercase() == wanted)
    }

    /// Names in first-seen order with case-insensitive duplicates removed.
    ///
    /// The spelling of the first occurrence is kept.
    #[must_use]
    pub fn distinct_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.pois
            .iter()
            .filter(|poi| seen.insert(poi.name.to_lowercase()))
            .map(|poi| poi.name.as_str())
            .collect()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PointOfInterest> {
        self.pois.iter()
    }

    /// All points of interest as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PointOfInterest] {
        &self.pois
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pois.len()
    }

    /// Report whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }
}

impl FromIterator<PointOfInterest> for PoiCatalogue {
    fn from_iter<I: IntoIterator<Item = PointOfInterest>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PoiCatalogue {
    type Item = &'a PointOfInterest;
    type IntoIter = std::slice::Iter<'a, PointOfInterest>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
