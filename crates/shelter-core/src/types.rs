//! Domain types shared by the catalog, resolver and finder.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::LocatorError;

/// A latitude/longitude pair in decimal degrees. Always copied by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidCoordinate`] when either component is
    /// non-finite or outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocatorError> {
        let candidate = Self {
            latitude,
            longitude,
        };
        if candidate.is_valid() {
            Ok(candidate)
        } else {
            Err(LocatorError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Validates a coordinate pair typed by a user or passed in a request.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidInput`], which is recoverable, where
    /// [`Coordinates::new`] would report an internal contract violation.
    pub fn from_user_input(latitude: f64, longitude: f64) -> Result<Self, LocatorError> {
        Self::new(latitude, longitude).map_err(|_| LocatorError::InvalidInput {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceAreaBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// The single supported region: its bounds plus the strings used to bias
/// free-text geocoding toward it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Name matched (case-insensitively) against candidate display text.
    pub name: &'static str,
    /// Appended to every forward geocoding query.
    pub query_qualifier: &'static str,
    /// ISO 3166-1 alpha-2 filter passed to the geocoder.
    pub country_codes: &'static str,
    pub bounds: ServiceAreaBounds,
    /// Default map center.
    pub center: Coordinates,
}

/// Rough municipal bounding box for Jerusalem.
pub const JERUSALEM: Region = Region {
    name: "Jerusalem",
    query_qualifier: "Jerusalem, Israel",
    country_codes: "il",
    bounds: ServiceAreaBounds {
        north: 31.85,
        south: 31.70,
        east: 35.30,
        west: 35.15,
    },
    center: Coordinates {
        latitude: 31.7683,
        longitude: 35.2137,
    },
};

/// Map-provider deep links carried by the source data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waze: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<String>,
}

impl ExternalLinks {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waze.is_none() && self.google_maps.is_none()
    }
}

/// A normalized shelter. Immutable once the catalog is loaded.
///
/// `capacity` and `area` stay textual: the municipal export mixes numbers,
/// ranges and free text in those columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterRecord {
    pub id: String,
    pub address: String,
    pub operator: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub neighborhood: String,
    pub capacity: String,
    pub area: String,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "ExternalLinks::is_empty")]
    pub external_links: ExternalLinks,
}

/// Estimated travel time, rounded to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelTime {
    LessThanOneMinute,
    Minutes(u32),
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelTime::LessThanOneMinute => f.write_str("< 1 min"),
            TravelTime::Minutes(m) => write!(f, "{m} min"),
        }
    }
}

impl Serialize for TravelTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One search hit: a shelter plus metrics computed for a specific location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedShelter {
    /// 1-based position in the result list.
    pub rank: usize,
    pub shelter: ShelterRecord,
    pub distance_km: f64,
    pub walking: TravelTime,
    pub running: TravelTime,
}
