//! Turns device fixes and typed addresses into validated coordinates.
//!
//! Every provider call runs under a deadline. A location is only handed on
//! once it lies inside the region's service area.

use std::future::Future;
use std::time::Duration;

use shelter_core::{is_within_service_area, Coordinates, LocatorError, Region, JERUSALEM};

use crate::error::GeocodeError;
use crate::provider::{DeviceLocationProvider, GeocodingProvider, ReverseGeocodingProvider};
use crate::types::{Candidate, DeviceLocationOptions, ForwardQuery, ResolvedLocation};

pub const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REVERSE_TIMEOUT: Duration = Duration::from_secs(8);
pub const CANDIDATE_LIMIT: usize = 3;
pub const CURRENT_LOCATION_LABEL: &str = "Current location";

#[derive(Debug, Clone)]
pub struct LocationResolver {
    region: Region,
    device_options: DeviceLocationOptions,
    geocode_timeout: Duration,
    reverse_timeout: Duration,
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new(JERUSALEM)
    }
}

impl LocationResolver {
    #[must_use]
    pub fn new(region: Region) -> Self {
        Self {
            region,
            device_options: DeviceLocationOptions::default(),
            geocode_timeout: DEFAULT_GEOCODE_TIMEOUT,
            reverse_timeout: DEFAULT_REVERSE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_device_options(mut self, options: DeviceLocationOptions) -> Self {
        self.device_options = options;
        self
    }

    #[must_use]
    pub fn with_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_reverse_timeout(mut self, timeout: Duration) -> Self {
        self.reverse_timeout = timeout;
        self
    }

    /// Asks the device provider for a fix and validates it against the
    /// service area.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::PermissionDenied`], [`LocatorError::Unavailable`],
    ///   [`LocatorError::Unknown`] from the provider.
    /// - [`LocatorError::Timeout`] when the provider misses the deadline.
    /// - [`LocatorError::OutOfServiceArea`] for a fix outside the bounds.
    pub async fn resolve_from_device<D>(&self, device: &D) -> Result<Coordinates, LocatorError>
    where
        D: DeviceLocationProvider,
    {
        let deadline = self.device_options.timeout;
        let request = device.current_position(&self.device_options);
        let fix = match tokio::time::timeout(deadline, request).await {
            Ok(Ok(fix)) => fix,
            Ok(Err(failure)) => {
                tracing::warn!(?failure, "device location failed");
                return Err(failure.into_locator_error(deadline));
            }
            Err(_) => {
                tracing::warn!(?deadline, "device location timed out");
                return Err(LocatorError::Timeout(deadline));
            }
        };

        let fix = Coordinates::new(fix.latitude, fix.longitude)?;
        self.ensure_in_service_area(fix)
    }

    /// Geocodes free text within the region.
    ///
    /// Empty or whitespace-only text fails before any request is made.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::EmptyInput`] for blank text.
    /// - [`LocatorError::Timeout`] when the geocoder misses the deadline.
    /// - [`LocatorError::Unavailable`] on transport or protocol failure.
    /// - [`LocatorError::NotFound`] when no candidate comes back.
    /// - [`LocatorError::OutOfServiceArea`] for a candidate outside the bounds.
    pub async fn resolve_from_address<G>(
        &self,
        text: &str,
        geocoder: &G,
    ) -> Result<Coordinates, LocatorError>
    where
        G: GeocodingProvider,
    {
        let text = text.trim();
        if text.is_empty() {
            return Err(LocatorError::EmptyInput);
        }

        let query = ForwardQuery {
            text: format!("{text}, {}", self.region.query_qualifier),
            country_codes: self.region.country_codes.to_owned(),
            limit: CANDIDATE_LIMIT,
        };

        let candidates = Self::with_deadline(self.geocode_timeout, geocoder.search(&query)).await?;
        let chosen =
            select_candidate(&candidates, self.region.name).ok_or(LocatorError::NotFound)?;
        tracing::debug!(
            candidates = candidates.len(),
            chosen = %chosen.display_text,
            "address geocoded"
        );
        self.ensure_in_service_area(chosen.coordinates)
    }

    /// Best-effort human-readable label for `coordinates`. Every failure,
    /// including a missed deadline, yields `None`.
    pub async fn describe_location<R>(
        &self,
        coordinates: Coordinates,
        reverse: &R,
    ) -> Option<String>
    where
        R: ReverseGeocodingProvider,
    {
        match tokio::time::timeout(self.reverse_timeout, reverse.reverse(coordinates)).await {
            Ok(Ok(label)) => label,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "reverse geocoding failed");
                None
            }
            Err(_) => {
                tracing::debug!(deadline = ?self.reverse_timeout, "reverse geocoding timed out");
                None
            }
        }
    }

    /// Device fix plus a reverse-geocoded label, falling back to
    /// `"Current location"`.
    ///
    /// # Errors
    ///
    /// Same as [`LocationResolver::resolve_from_device`]. Labeling never fails.
    pub async fn resolve_and_describe_device<D, R>(
        &self,
        device: &D,
        reverse: &R,
    ) -> Result<ResolvedLocation, LocatorError>
    where
        D: DeviceLocationProvider,
        R: ReverseGeocodingProvider,
    {
        let coordinates = self.resolve_from_device(device).await?;
        let label = self
            .describe_location(coordinates, reverse)
            .await
            .unwrap_or_else(|| CURRENT_LOCATION_LABEL.to_owned());
        Ok(ResolvedLocation { coordinates, label })
    }

    /// Address resolution labeled with the user's own (trimmed) text.
    ///
    /// # Errors
    ///
    /// Same as [`LocationResolver::resolve_from_address`].
    pub async fn resolve_address_location<G>(
        &self,
        text: &str,
        geocoder: &G,
    ) -> Result<ResolvedLocation, LocatorError>
    where
        G: GeocodingProvider,
    {
        let coordinates = self.resolve_from_address(text, geocoder).await?;
        Ok(ResolvedLocation {
            coordinates,
            label: text.trim().to_owned(),
        })
    }

    async fn with_deadline<T>(
        deadline: Duration,
        request: impl Future<Output = Result<T, GeocodeError>>,
    ) -> Result<T, LocatorError> {
        match tokio::time::timeout(deadline, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) if e.is_timeout() => {
                tracing::warn!(error = %e, "geocoder request timed out");
                Err(LocatorError::Timeout(deadline))
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "geocoder request failed");
                Err(LocatorError::Unavailable(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(?deadline, "geocoder request timed out");
                Err(LocatorError::Timeout(deadline))
            }
        }
    }

    fn ensure_in_service_area(
        &self,
        coordinates: Coordinates,
    ) -> Result<Coordinates, LocatorError> {
        if is_within_service_area(coordinates, &self.region.bounds) {
            Ok(coordinates)
        } else {
            Err(LocatorError::OutOfServiceArea {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
                region: self.region.name,
            })
        }
    }
}

/// Picks the first candidate whose display text mentions `region_name`
/// (case-insensitive), else the first candidate.
#[must_use]
pub fn select_candidate<'a>(
    candidates: &'a [Candidate],
    region_name: &str,
) -> Option<&'a Candidate> {
    let needle = region_name.to_lowercase();
    candidates
        .iter()
        .find(|c| c.display_text.to_lowercase().contains(&needle))
        .or_else(|| candidates.first())
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
