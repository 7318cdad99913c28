//! HTTP client for an OpenStreetMap Nominatim-compatible geocoder.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use shelter_core::Coordinates;

use crate::error::GeocodeError;
use crate::provider::{GeocodingProvider, ReverseGeocodingProvider};
use crate::types::{Candidate, ForwardQuery, NominatimPlace, NominatimReverse};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Forward and reverse geocoding against `/search` and `/reverse`.
///
/// Nominatim's usage policy requires an identifying `User-Agent`; pass one
/// to [`NominatimClient::new`]. Use [`NominatimClient::with_base_url`] to point
/// at a mock server in tests.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent, timeout_secs)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        timeout_secs: u64,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so endpoint names append to the path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GeocodeError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{endpoint}", self.base_url.path()));
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    async fn request_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        // The query string carries user input; keep it out of error context.
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }
}

impl GeocodingProvider for NominatimClient {
    async fn search(&self, query: &ForwardQuery) -> Result<Vec<Candidate>, GeocodeError> {
        let limit = query.limit.to_string();
        let url = self.build_url(
            "search",
            &[
                ("q", &query.text),
                ("limit", &limit),
                ("countrycodes", &query.country_codes),
            ],
        );
        let places: Vec<NominatimPlace> = self.request_json(&url).await?;
        let total = places.len();
        let candidates: Vec<Candidate> = places
            .into_iter()
            .filter_map(NominatimPlace::into_candidate)
            .collect();
        if candidates.len() < total {
            tracing::debug!(
                dropped = total - candidates.len(),
                "dropped geocoder places with unusable coordinates"
            );
        }
        Ok(candidates)
    }
}

impl ReverseGeocodingProvider for NominatimClient {
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, GeocodeError> {
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();
        let url = self.build_url("reverse", &[("lat", &lat), ("lon", &lon)]);
        let place: NominatimReverse = self.request_json(&url).await?;
        if let Some(reason) = place.error {
            tracing::debug!(%reason, "reverse geocoder returned no place");
        }
        Ok(place.display_name.filter(|name| !name.trim().is_empty()))
    }
}
