//! Normalization from GeoJSON features to [`ShelterRecord`]s.

use serde_json::{Map, Value};
use shelter_core::{Coordinates, ExternalLinks, ShelterRecord};

use crate::error::CatalogError;
use crate::types::{Catalog, RawFeature};

const UNKNOWN: &str = "Unknown";

/// Why a feature was left out of the catalog.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FeatureDefect {
    #[error("feature is not a GeoJSON object: {0}")]
    NotAFeature(String),
    #[error("feature has no geometry")]
    MissingGeometry,
    #[error("geometry position is not a [longitude, latitude] pair")]
    MalformedPosition,
    #[error("position ({latitude}, {longitude}) is out of range")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Parses a GeoJSON feature collection into a [`Catalog`].
///
/// Features without usable geometry are skipped and counted; they never
/// fail the load.
///
/// # Errors
///
/// - [`CatalogError::Deserialize`] if `body` is not JSON.
/// - [`CatalogError::Malformed`] if the top level has no `features` array.
pub fn parse_feature_collection(body: &str, context: &str) -> Result<Catalog, CatalogError> {
    let root: Value = serde_json::from_str(body).map_err(|e| CatalogError::Deserialize {
        context: context.to_owned(),
        source: e,
    })?;

    let features = match root {
        Value::Object(mut obj) => match obj.remove("features") {
            Some(Value::Array(features)) => features,
            Some(_) => {
                return Err(CatalogError::Malformed(
                    "\"features\" is not an array".to_owned(),
                ))
            }
            None => {
                return Err(CatalogError::Malformed(
                    "missing \"features\" array".to_owned(),
                ))
            }
        },
        _ => {
            return Err(CatalogError::Malformed(
                "top level is not a JSON object".to_owned(),
            ))
        }
    };

    let mut shelters = Vec::with_capacity(features.len());
    let mut skipped = 0usize;

    for (index, feature) in features.into_iter().enumerate() {
        match normalize_feature(feature) {
            Ok(record) => shelters.push(record),
            Err(defect) => {
                skipped += 1;
                tracing::warn!(index, reason = %defect, "skipping shelter feature");
            }
        }
    }

    Ok(Catalog::new(shelters, skipped))
}

/// Normalizes one GeoJSON feature.
///
/// # Errors
///
/// Returns a [`FeatureDefect`] when the feature has no geometry or its
/// position is not a valid `[longitude, latitude]` pair.
pub fn normalize_feature(value: Value) -> Result<ShelterRecord, FeatureDefect> {
    let feature: RawFeature =
        serde_json::from_value(value).map_err(|e| FeatureDefect::NotAFeature(e.to_string()))?;

    let geometry = feature.geometry.ok_or(FeatureDefect::MissingGeometry)?;
    let coordinates = position(&geometry.coordinates)?;

    let props = feature.properties.unwrap_or_default();

    Ok(ShelterRecord {
        id: text(&props, &["shelter_no", "id"]).unwrap_or_else(|| UNKNOWN.to_owned()),
        address: text(&props, &["address_label"])
            .unwrap_or_else(|| "Address not available".to_owned()),
        operator: text(&props, &["operator"]).unwrap_or_else(|| UNKNOWN.to_owned()),
        kind: text(&props, &["type"]).unwrap_or_else(|| UNKNOWN.to_owned()),
        // CSV-derived exports keep a byte-order mark on the first column name.
        neighborhood: text(&props, &["\u{feff}neighborhood", "neighborhood"])
            .unwrap_or_else(|| UNKNOWN.to_owned()),
        capacity: text(&props, &["capacity"]).unwrap_or_else(|| UNKNOWN.to_owned()),
        area: text(&props, &["area"]).unwrap_or_else(|| UNKNOWN.to_owned()),
        coordinates,
        external_links: ExternalLinks {
            waze: text(&props, &["waze_link"]),
            google_maps: text(&props, &["google_maps_link"]),
        },
    })
}

/// Reads a GeoJSON position. Axis order is `[longitude, latitude]`.
fn position(raw: &[Value]) -> Result<Coordinates, FeatureDefect> {
    let (Some(lon), Some(lat)) = (
        raw.first().and_then(Value::as_f64),
        raw.get(1).and_then(Value::as_f64),
    ) else {
        return Err(FeatureDefect::MalformedPosition);
    };

    Coordinates::new(lat, lon).map_err(|_| FeatureDefect::OutOfRange {
        latitude: lat,
        longitude: lon,
    })
}

/// Returns the first present, non-empty value among `keys` as display text.
///
/// Numbers and booleans are rendered as-is rather than dropped: columns like
/// `capacity` arrive as either strings or numbers depending on the export.
fn text(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match props.get(*key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
