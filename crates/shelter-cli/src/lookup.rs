//! Location resolution and ranking shared by the `nearest` and `report`
//! commands.

use std::time::Duration;

use clap::Args;
use serde::Serialize;
use shelter_catalog::{Catalog, CatalogSource, LoadOptions};
use shelter_core::{
    directions_url, find_nearest, format_distance, user_message, AppConfig, Coordinates,
    LocatorError, RankedShelter, JERUSALEM,
};
use shelter_geocode::{FixedDeviceLocation, LocationResolver, NominatimClient, ResolvedLocation};

/// Where the user is: a typed address or a device-style fix.
#[derive(Debug, Args)]
#[group(required = true, multiple = true)]
pub struct LocationArgs {
    /// Street address within Jerusalem
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub address: Option<String>,
    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

/// Geocoding clients and deadlines built from configuration.
pub(crate) struct Locator {
    pub resolver: LocationResolver,
    pub geocoder: NominatimClient,
}

impl Locator {
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let geocoder = NominatimClient::with_base_url(
            &config.geocoder_base_url,
            &config.geocoder_user_agent,
            config.geocode_timeout_secs,
        )
        .map_err(|e| anyhow::anyhow!("failed to build geocoding client: {e}"))?;
        let resolver = LocationResolver::new(JERUSALEM)
            .with_geocode_timeout(Duration::from_secs(config.geocode_timeout_secs))
            .with_reverse_timeout(Duration::from_secs(config.reverse_geocode_timeout_secs));
        Ok(Self { resolver, geocoder })
    }

    pub(crate) async fn resolve(
        &self,
        args: &LocationArgs,
    ) -> Result<ResolvedLocation, LocatorError> {
        match (&args.address, args.lat, args.lon) {
            (Some(address), _, _) => {
                self.resolver
                    .resolve_address_location(address, &self.geocoder)
                    .await
            }
            (None, Some(lat), Some(lon)) => {
                let device = FixedDeviceLocation(Coordinates::from_user_input(lat, lon)?);
                self.resolver
                    .resolve_and_describe_device(&device, &self.geocoder)
                    .await
            }
            _ => Err(LocatorError::NoLocation),
        }
    }
}

pub(crate) async fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    let source = CatalogSource::parse(&config.catalog_source);
    let options = LoadOptions {
        timeout_secs: config.catalog_timeout_secs,
        user_agent: config.geocoder_user_agent.clone(),
        max_retries: config.catalog_max_retries,
        backoff_base_ms: config.catalog_retry_backoff_base_ms,
    };
    shelter_catalog::load(&source, &options)
        .await
        .map_err(|e| report_failure(&LocatorError::from(e)))
}

/// Resolves the location and ranks the catalog against it.
pub(crate) async fn nearest(
    locator: &Locator,
    catalog: &Catalog,
    args: &LocationArgs,
    limit: usize,
) -> anyhow::Result<(ResolvedLocation, Vec<RankedShelter>)> {
    let location = locator
        .resolve(args)
        .await
        .map_err(|e| report_failure(&e))?;
    let ranked = find_nearest(Some(location.coordinates), catalog.shelters(), limit)
        .map_err(|e| report_failure(&e))?;
    Ok((location, ranked))
}

/// Reverse-geocodes a typed position. A position with no known place name
/// is an error so the output never shows a made-up label.
pub(crate) async fn describe(locator: &Locator, lat: f64, lon: f64) -> anyhow::Result<String> {
    let position = Coordinates::from_user_input(lat, lon).map_err(|e| report_failure(&e))?;
    locator
        .resolver
        .describe_location(position, &locator.geocoder)
        .await
        .ok_or_else(|| anyhow::anyhow!("No place name found for {position}."))
}

/// Logs the detail and turns the error into the message the user sees.
pub(crate) fn report_failure(err: &LocatorError) -> anyhow::Error {
    if err.is_recoverable() {
        tracing::warn!(error = %err, "lookup failed");
    } else {
        tracing::error!(error = %err, "lookup failed");
    }
    anyhow::anyhow!(user_message(err))
}

#[derive(Debug, Serialize)]
pub(crate) struct NearestOutput<'a> {
    pub location: &'a ResolvedLocation,
    pub shelters: Vec<ShelterOutput<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShelterOutput<'a> {
    #[serde(flatten)]
    pub ranked: &'a RankedShelter,
    pub distance: String,
    pub directions_url: String,
}

impl<'a> NearestOutput<'a> {
    pub(crate) fn new(location: &'a ResolvedLocation, ranked: &'a [RankedShelter]) -> Self {
        let shelters = ranked
            .iter()
            .map(|r| ShelterOutput {
                ranked: r,
                distance: format_distance(r.distance_km),
                directions_url: directions_url(&r.shelter, Some(location.coordinates)),
            })
            .collect();
        Self { location, shelters }
    }
}

pub(crate) fn render_text(location: &ResolvedLocation, ranked: &[RankedShelter]) -> String {
    let mut lines = vec![format!(
        "Nearest shelters to {} ({}):",
        location.label, location.coordinates
    )];
    for r in ranked {
        lines.push(format!(
            "{:>2}. {} | {} | walk {} | run {}",
            r.rank,
            r.shelter.address,
            format_distance(r.distance_km),
            r.walking,
            r.running
        ));
        lines.push(format!(
            "    {} | capacity {} | {}",
            r.shelter.neighborhood,
            r.shelter.capacity,
            directions_url(&r.shelter, Some(location.coordinates))
        ));
    }
    lines.join("\n")
}
