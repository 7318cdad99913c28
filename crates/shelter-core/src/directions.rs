//! Navigation links handed to the presentation layer.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::{Coordinates, ShelterRecord};

const MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// Characters left unescaped by a URI component encoder.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds a navigable directions link to `shelter`.
///
/// With a known user location the link routes from that origin. Without one,
/// the shelter's own map link is used when the data carries it, otherwise a
/// text search for the shelter's address.
#[must_use]
pub fn directions_url(shelter: &ShelterRecord, user_location: Option<Coordinates>) -> String {
    match user_location {
        Some(origin) => format!(
            "{MAPS_BASE_URL}/dir/{},{}/{},{}",
            origin.latitude,
            origin.longitude,
            shelter.coordinates.latitude,
            shelter.coordinates.longitude
        ),
        None => shelter.external_links.google_maps.clone().unwrap_or_else(|| {
            format!(
                "{MAPS_BASE_URL}/search/{}",
                utf8_percent_encode(&shelter.address, URI_COMPONENT)
            )
        }),
    }
}
