//! Raw GeoJSON shapes and the normalized catalog.

use serde::Deserialize;
use shelter_core::ShelterRecord;

/// One GeoJSON feature as found in the municipal export.
///
/// Decoded per feature so that a single defective entry does not fail the
/// whole collection.
#[derive(Debug, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

/// GeoJSON geometry. Only the position array is used; positions are
/// `[longitude, latitude]` (optionally followed by altitude).
#[derive(Debug, Deserialize)]
pub struct RawGeometry {
    #[serde(default)]
    pub coordinates: Vec<serde_json::Value>,
}

/// The normalized, read-only shelter dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    shelters: Vec<ShelterRecord>,
    skipped: usize,
}

impl Catalog {
    #[must_use]
    pub fn new(shelters: Vec<ShelterRecord>, skipped: usize) -> Self {
        Self { shelters, skipped }
    }

    #[must_use]
    pub fn shelters(&self) -> &[ShelterRecord] {
        &self.shelters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shelters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shelters.is_empty()
    }

    /// Number of source features dropped for missing or invalid geometry.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
