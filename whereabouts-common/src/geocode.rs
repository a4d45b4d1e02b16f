//! Reverse geocoding results
//!
//! The provider returns a list of candidate addresses for a coordinate. Only the
//! first candidate is used, and any field it lacks is replaced by a fixed
//! placeholder so a save never fails just because the lookup came back empty.

use serde::Deserialize;
use thiserror::Error;

use crate::locations::Fix;

/// Stored in place of a street that could not be resolved.
pub const STREET_UNAVAILABLE: &str = "street unavailable";

/// Stored in place of a postal code that could not be resolved.
pub const POSTAL_CODE_UNAVAILABLE: &str = "postal code unavailable";

/// Errors talking to the reverse geocoding provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    /// The request could not be sent or the provider replied with an error status.
    #[error("reverse geocode request failed: {0}")]
    Request(String),

    /// The provider replied with something we could not understand.
    #[error("invalid reverse geocode response: {0}")]
    InvalidResponse(String),
}

/// One candidate address returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Street name, if known.
    pub street: Option<String>,

    /// Postal code, if known.
    pub postal_code: Option<String>,
}

/// The street and postal code to store with a saved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    /// Street name or [`STREET_UNAVAILABLE`].
    pub street: String,

    /// Postal code or [`POSTAL_CODE_UNAVAILABLE`].
    pub postal_code: String,
}

impl ResolvedAddress {
    /// Pick the first candidate, substituting placeholders for missing or blank fields.
    #[must_use]
    pub fn from_candidates(candidates: &[Address]) -> Self {
        let first = candidates.first();
        let street = first.and_then(|a| non_blank(a.street.as_deref()));
        let postal_code = first.and_then(|a| non_blank(a.postal_code.as_deref()));

        ResolvedAddress {
            street: street.unwrap_or(STREET_UNAVAILABLE).to_string(),
            postal_code: postal_code.unwrap_or(POSTAL_CODE_UNAVAILABLE).to_string(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build a Nominatim `reverse` request URL for a fix.
#[must_use]
pub fn reverse_url(base: &str, fix: Fix) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!(
        "{base}{separator}format=jsonv2&addressdetails=1&lat={}&lon={}",
        fix.latitude, fix.longitude
    )
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    road: Option<String>,
    pedestrian: Option<String>,
    footway: Option<String>,
    postcode: Option<String>,
}

impl From<NominatimAddress> for Address {
    fn from(address: NominatimAddress) -> Self {
        Address {
            street: address.road.or(address.pedestrian).or(address.footway),
            postal_code: address.postcode,
        }
    }
}

/// Parse the body of a Nominatim `reverse` response into candidates.
///
/// Nominatim answers `{"error": "Unable to geocode"}` for places with no address, which is
/// an empty result rather than a failure.
///
/// # Errors
///
/// Returns [`GeocodeError::InvalidResponse`] if the body is not a Nominatim response.
pub fn parse_nominatim(body: &str) -> Result<Vec<Address>, GeocodeError> {
    let response: NominatimResponse = serde_json::from_str(body)
        .map_err(|err| GeocodeError::InvalidResponse(err.to_string()))?;

    if let Some(error) = response.error {
        tracing::debug!("Nominatim returned no address: {error}");
        return Ok(Vec::new());
    }

    Ok(response.address.map(Address::from).into_iter().collect())
}
