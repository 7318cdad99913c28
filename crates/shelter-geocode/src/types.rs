//! Provider-facing request and response types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shelter_core::{Coordinates, LocatorError};

/// One forward-geocoding result, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub coordinates: Coordinates,
    pub display_text: String,
}

/// A forward-geocoding lookup as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardQuery {
    /// Full query text including the region qualifier.
    pub text: String,
    pub country_codes: String,
    pub limit: usize,
}

/// A place in a Nominatim `/search` response. Nominatim encodes `lat` and
/// `lon` as strings.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl NominatimPlace {
    /// Parses the string coordinates. Unparseable or out-of-range places
    /// yield `None`.
    #[must_use]
    pub fn into_candidate(self) -> Option<Candidate> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        let coordinates = Coordinates::new(latitude, longitude).ok()?;
        Some(Candidate {
            coordinates,
            display_text: self.display_name,
        })
    }
}

/// A Nominatim `/reverse` response. When nothing is found Nominatim
/// answers 200 with only an `error` field.
#[derive(Debug, Deserialize)]
pub struct NominatimReverse {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Options passed to a device-location provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceLocationOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// A cached fix younger than this is acceptable.
    pub max_cache_age: Duration,
}

impl Default for DeviceLocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: Duration::from_secs(15),
            max_cache_age: Duration::from_secs(600),
        }
    }
}

/// Why a device-location provider could not produce a fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceLocationFailure {
    PermissionDenied,
    Unavailable(String),
    Timeout,
    Unknown,
}

impl DeviceLocationFailure {
    /// Maps the provider failure onto the domain error. `timeout` is the
    /// deadline that was in effect for the request.
    #[must_use]
    pub fn into_locator_error(self, timeout: Duration) -> LocatorError {
        match self {
            DeviceLocationFailure::PermissionDenied => LocatorError::PermissionDenied,
            DeviceLocationFailure::Unavailable(detail) => LocatorError::Unavailable(detail),
            DeviceLocationFailure::Timeout => LocatorError::Timeout(timeout),
            DeviceLocationFailure::Unknown => LocatorError::Unknown,
        }
    }
}

/// A validated user location plus the label shown next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub label: String,
}
