//! User-facing text for each failure kind. Provider error detail never
//! reaches the user; it is logged instead.

use crate::error::LocatorError;

#[must_use]
pub fn user_message(err: &LocatorError) -> &'static str {
    match err {
        LocatorError::CatalogLoad(_) => {
            "Failed to load shelter data. Please try again later."
        }
        LocatorError::EmptyInput => "Please enter an address.",
        LocatorError::NotFound => {
            "Address not found. Please try a different address in Jerusalem."
        }
        LocatorError::OutOfServiceArea { .. } => {
            "Your location appears to be outside Jerusalem. Please enter a Jerusalem address manually."
        }
        LocatorError::Timeout(_) => {
            "Location request timed out. Please try again or enter your address manually."
        }
        LocatorError::PermissionDenied => {
            "Location access was denied. Please allow location access and try again, or enter your address manually."
        }
        LocatorError::Unavailable(_) => {
            "Location information is unavailable. Please try entering your address manually."
        }
        LocatorError::Unknown => {
            "An unknown error occurred. Please try entering your address manually."
        }
        LocatorError::InvalidInput { .. } => {
            "Latitude must be between -90 and 90 and longitude between -180 and 180."
        }
        LocatorError::InvalidCoordinate { .. }
        | LocatorError::EmptyCatalog
        | LocatorError::NoLocation => "Unable to find shelters. Please try again.",
    }
}
