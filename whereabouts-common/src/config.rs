//! Shared front end configuration

use serde::{Deserialize, Serialize};

use crate::persistence::SAVED_LOCATIONS_KEY;

/// Public Nominatim reverse geocoding endpoint.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// OpenStreetMap tiles.
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Configuration for the location screen
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Key the saved list is stored under
    pub storage_key: String,
    /// Nominatim compatible reverse geocoding URL
    pub geocoder_url: String,
    /// Leaflet tile URL template
    pub tile_url: String,
    /// Zoom level for the map
    pub zoom: f64,
    /// Ask the provider for a high accuracy fix
    pub high_accuracy: bool,
    /// Give up on the fix after this many milliseconds, wait forever if unset
    pub fix_timeout_ms: Option<u32>,
    /// How long the saved notice stays up
    pub notice_ms: u32,
    /// Marker title
    pub marker_title: String,
    /// Marker description
    pub marker_description: String,
    /// Save button color
    pub accent_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key: SAVED_LOCATIONS_KEY.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            tile_url: DEFAULT_TILE_URL.to_string(),
            zoom: 17.0,
            high_accuracy: false,
            fix_timeout_ms: None,
            notice_ms: 3000,
            marker_title: "My location".to_string(),
            marker_description: "I am here".to_string(),
            accent_color: "#ffc543".to_string(),
        }
    }
}

impl Config {
    /// Parse a JSON configuration, missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The defaults, with any overrides given at build time.
    #[must_use]
    pub fn from_build_env() -> Config {
        Config::default().with_overrides(|name| match name {
            "WHEREABOUTS_STORAGE_KEY" => option_env!("WHEREABOUTS_STORAGE_KEY"),
            "WHEREABOUTS_GEOCODER_URL" => option_env!("WHEREABOUTS_GEOCODER_URL"),
            "WHEREABOUTS_TILE_URL" => option_env!("WHEREABOUTS_TILE_URL"),
            _ => None,
        })
    }

    fn with_overrides<'a>(mut self, lookup: impl Fn(&str) -> Option<&'a str>) -> Config {
        if let Some(key) = lookup("WHEREABOUTS_STORAGE_KEY") {
            self.storage_key = key.to_string();
        }
        if let Some(url) = lookup("WHEREABOUTS_GEOCODER_URL") {
            self.geocoder_url = url.to_string();
        }
        if let Some(url) = lookup("WHEREABOUTS_TILE_URL") {
            self.tile_url = url.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(r#"{"zoom": 12.5, "fix_timeout_ms": 10000}"#).unwrap();
        assert_eq!(config.fix_timeout_ms, Some(10000));
        assert!((config.zoom - 12.5).abs() < f64::EPSILON);
        assert_eq!(config.storage_key, "savedLocations");
        assert_eq!(config.geocoder_url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(|name| match name {
            "WHEREABOUTS_GEOCODER_URL" => Some("http://localhost:8080/reverse"),
            _ => None,
        });
        assert_eq!(config.geocoder_url, "http://localhost:8080/reverse");
        assert_eq!(config.tile_url, DEFAULT_TILE_URL);
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(Config::from_json(r#"{"zoom": "near"}"#).is_err());
    }
}
