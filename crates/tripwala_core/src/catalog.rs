//! crates/tripwala_core/src/catalog.rs
//!
//! Search and filtering over catalog listings.

use crate::domain::Destination;

/// Shown wherever a destination has no usable image.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/3/3f/Placeholder_view_vector.svg/681px-Placeholder_view_vector.svg.png";

/// Narrowing criteria for a catalog listing. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the destination name.
    pub search: Option<String>,
    /// Exact region name.
    pub region: Option<String>,
    pub min_cost: Option<i64>,
    pub max_cost: Option<i64>,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, destination: &Destination) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !destination
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(region) = &self.region {
            if &destination.region != region {
                return false;
            }
        }
        if self.min_cost.is_some_and(|min| destination.cost < min) {
            return false;
        }
        if self.max_cost.is_some_and(|max| destination.cost > max) {
            return false;
        }
        true
    }

    /// Keeps the matching destinations in their original order.
    pub fn apply(&self, destinations: Vec<Destination>) -> Vec<Destination> {
        destinations.into_iter().filter(|d| self.matches(d)).collect()
    }
}

/// The image to render for a destination, falling back to the placeholder for
/// blank or non-http references.
pub fn display_image_url(destination: &Destination) -> &str {
    let url = destination.image_url.trim();
    if url.starts_with("http") {
        url
    } else {
        PLACEHOLDER_IMAGE_URL
    }
}
