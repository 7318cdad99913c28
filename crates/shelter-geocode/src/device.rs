//! Device-location providers for hosts without a positioning API.

use shelter_core::Coordinates;

use crate::provider::DeviceLocationProvider;
use crate::types::{DeviceLocationFailure, DeviceLocationOptions};

/// A fix the caller already holds, e.g. from command-line flags or query
/// parameters sent by a browser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDeviceLocation(pub Coordinates);

impl DeviceLocationProvider for FixedDeviceLocation {
    async fn current_position(
        &self,
        _options: &DeviceLocationOptions,
    ) -> Result<Coordinates, DeviceLocationFailure> {
        Ok(self.0)
    }
}

/// Reports that no positioning source exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableDeviceLocation;

impl DeviceLocationProvider for UnavailableDeviceLocation {
    async fn current_position(
        &self,
        _options: &DeviceLocationOptions,
    ) -> Result<Coordinates, DeviceLocationFailure> {
        Err(DeviceLocationFailure::Unavailable(
            "no positioning source on this host".to_owned(),
        ))
    }
}
