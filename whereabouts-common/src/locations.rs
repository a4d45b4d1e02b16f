//! Position fixes and saved locations

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geocode::ResolvedAddress;

/// A single reading from the geolocation provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,
}

impl Fix {
    /// Create a fix from a latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Fix {
            latitude,
            longitude,
        }
    }

    /// The fix as a point, x is longitude and y is latitude.
    #[must_use]
    pub fn point(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// A snapshot of a location the user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocation {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Street name, or a placeholder if it could not be resolved.
    pub street: String,

    /// Postal code, or a placeholder if it could not be resolved.
    pub postal_code: String,
}

impl SavedLocation {
    /// Build a record from a fix and the address it resolved to.
    #[must_use]
    pub fn new(fix: Fix, address: ResolvedAddress) -> Self {
        SavedLocation {
            latitude: fix.latitude,
            longitude: fix.longitude,
            street: address.street,
            postal_code: address.postal_code,
        }
    }
}

/// An immutable, ordered list of saved locations.
///
/// Cloning is cheap. Changes produce a new snapshot, so anything still holding
/// the old one keeps seeing the old contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedLocations(Arc<Vec<SavedLocation>>);

impl SavedLocations {
    /// An empty list.
    #[must_use]
    pub fn empty() -> Self {
        SavedLocations::default()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SavedLocation> {
        self.0.iter()
    }

    /// The records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SavedLocation] {
        &self.0
    }

    /// Return a new snapshot with `location` added at the end.
    #[must_use]
    pub fn appended(&self, location: SavedLocation) -> Self {
        let mut locations = Vec::with_capacity(self.0.len() + 1);
        locations.extend(self.0.iter().cloned());
        locations.push(location);
        SavedLocations(Arc::new(locations))
    }
}

impl From<Vec<SavedLocation>> for SavedLocations {
    fn from(locations: Vec<SavedLocation>) -> Self {
        SavedLocations(Arc::new(locations))
    }
}

impl<'a> IntoIterator for &'a SavedLocations {
    type Item = &'a SavedLocation;
    type IntoIter = std::slice::Iter<'a, SavedLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
