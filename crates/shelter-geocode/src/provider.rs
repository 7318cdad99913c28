//! Seams between the resolver and the outside world.
//!
//! Deadlines are applied by [`crate::LocationResolver`], so implementations
//! do not need their own. Dropping a returned future must abort any request
//! in flight.

use std::future::Future;

use shelter_core::Coordinates;

use crate::error::GeocodeError;
use crate::types::{Candidate, DeviceLocationFailure, DeviceLocationOptions, ForwardQuery};

/// Produces the user's current position.
pub trait DeviceLocationProvider {
    fn current_position(
        &self,
        options: &DeviceLocationOptions,
    ) -> impl Future<Output = Result<Coordinates, DeviceLocationFailure>> + Send;
}

/// Turns free text into ordered candidates.
pub trait GeocodingProvider {
    fn search(
        &self,
        query: &ForwardQuery,
    ) -> impl Future<Output = Result<Vec<Candidate>, GeocodeError>> + Send;
}

/// Turns a position into a human-readable label, if one is known.
pub trait ReverseGeocodingProvider {
    fn reverse(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<Option<String>, GeocodeError>> + Send;
}
