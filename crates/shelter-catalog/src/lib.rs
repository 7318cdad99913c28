//! Loading and normalization of the GeoJSON shelter dataset.
//!
//! The catalog is loaded once at startup and shared read-only afterwards.

pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod source;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use normalize::{normalize_feature, parse_feature_collection, FeatureDefect};
pub use source::{load, CatalogSource, LoadOptions};
pub use types::Catalog;
