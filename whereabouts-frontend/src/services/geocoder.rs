use gloo_net::http::Request;
use tracing::debug;
use whereabouts_common::{
    geocode::{self, Address, GeocodeError},
    locations::Fix,
    platform::ReverseGeocoder,
};

/// Reverse geocoding against a Nominatim compatible server.
pub struct NominatimGeocoder {
    url: String,
}

impl NominatimGeocoder {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, fix: Fix) -> Result<Vec<Address>, GeocodeError> {
        let url = geocode::reverse_url(&self.url, fix);
        debug!("Reverse geocoding: {url}");

        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| GeocodeError::Request(err.to_string()))?;

        if !response.ok() {
            return Err(GeocodeError::Request(format!(
                "{} {}",
                response.status(),
                response.status_text()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| GeocodeError::InvalidResponse(err.to_string()))?;

        geocode::parse_nominatim(&body)
    }
}
