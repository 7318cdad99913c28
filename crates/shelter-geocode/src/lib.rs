//! Location resolution for the shelter locator: device fixes, forward
//! geocoding of typed addresses, and best-effort reverse-geocoded labels.

pub mod device;
pub mod error;
pub mod nominatim;
pub mod provider;
pub mod resolver;
pub mod types;

pub use device::{FixedDeviceLocation, UnavailableDeviceLocation};
pub use error::GeocodeError;
pub use nominatim::NominatimClient;
pub use provider::{DeviceLocationProvider, GeocodingProvider, ReverseGeocodingProvider};
pub use resolver::{select_candidate, LocationResolver, CURRENT_LOCATION_LABEL};
pub use types::{
    Candidate, DeviceLocationFailure, DeviceLocationOptions, ForwardQuery, ResolvedLocation,
};
