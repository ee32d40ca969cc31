//! Broad kinds of point of interest.
//!
//! Categories come from free-form provider tags, so parsing never fails:
//! anything unrecognised becomes [`Category::Other`].
//!
//! # Examples
//! ```
//! use ramble_core::Category;
//!
//! assert_eq!("Museum".parse::<Category>(), Ok(Category::Museum));
//! assert_eq!("bakery".parse::<Category>(), Ok(Category::Other));
//! assert_eq!(Category::Viewpoint.to_string(), "viewpoint");
//! ```

use std::convert::Infallible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
/// Kind of point of interest.
pub enum Category {
    /// Museums and historic collections.
    Museum,
    /// Art galleries.
    Gallery,
    /// Tourist attractions.
    Attraction,
    /// Scenic viewpoints.
    Viewpoint,
    /// Public artworks.
    Artwork,
    /// Anything else.
    #[default]
    Other,
}

impl Category {
    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Museum => "museum",
            Self::Gallery => "gallery",
            Self::Attraction => "attraction",
            Self::Viewpoint => "viewpoint",
            Self::Artwork => "artwork",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "museum" => Self::Museum,
            "gallery" => Self::Gallery,
            "attraction" => Self::Attraction,
            "viewpoint" => Self::Viewpoint,
            "artwork" => Self::Artwork,
            _ => Self::Other,
        })
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        let Ok(category) = value.parse::<Self>();
        category
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_owned()
    }
}
