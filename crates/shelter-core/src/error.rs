use std::time::Duration;

use thiserror::Error;

/// Failure kinds surfaced by the shelter lookup engine.
///
/// `CatalogLoad` through `InvalidInput` are user-recoverable: the caller shows a
/// message and lets the user retry. `InvalidCoordinate`, `EmptyCatalog` and
/// `NoLocation` indicate a broken upstream contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocatorError {
    #[error("failed to load shelter catalog: {0}")]
    CatalogLoad(String),

    #[error("no location text was provided")]
    EmptyInput,

    #[error("no geocoding candidate matched the query")]
    NotFound,

    #[error("location ({latitude}, {longitude}) is outside the {region} service area")]
    OutOfServiceArea {
        latitude: f64,
        longitude: f64,
        region: &'static str,
    },

    #[error("location request timed out after {0:?}")]
    Timeout(Duration),

    #[error("location permission denied")]
    PermissionDenied,

    #[error("location provider unavailable: {0}")]
    Unavailable(String),

    #[error("unknown location provider failure")]
    Unknown,

    /// A coordinate pair entered by the user is out of range.
    #[error("coordinate input ({latitude}, {longitude}) is out of range")]
    InvalidInput { latitude: f64, longitude: f64 },

    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("shelter catalog is empty")]
    EmptyCatalog,

    #[error("no user location available")]
    NoLocation,
}

impl LocatorError {
    /// Returns `true` when the user can act on the error (retry, type another
    /// address, grant permission). `false` means an internal contract was
    /// violated and the failure should be logged.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LocatorError::InvalidCoordinate { .. }
                | LocatorError::EmptyCatalog
                | LocatorError::NoLocation
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
