use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shelter_core::{directions_url, find_nearest, format_distance, Coordinates, RankedShelter};
use shelter_geocode::{FixedDeviceLocation, ResolvedLocation};

use crate::middleware::RequestId;

use super::{map_locator_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct NearestQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub address: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct ShelterItem {
    #[serde(flatten)]
    ranked: RankedShelter,
    distance: String,
    directions_url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct NearestData {
    location: ResolvedLocation,
    shelters: Vec<ShelterItem>,
}

/// `GET /api/v1/shelters/nearest?lat=&lon=` or `?address=`.
///
/// An address takes precedence when both forms are present.
pub(super) async fn nearest(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<ApiResponse<NearestData>>, ApiError> {
    let limit = normalize_limit(query.limit, state.default_limit);

    let location = match (query.address.as_deref(), query.lat, query.lon) {
        (Some(address), _, _) => state
            .resolver
            .resolve_address_location(address, &state.geocoder)
            .await
            .map_err(|e| map_locator_error(req_id.0.clone(), &e))?,
        (None, Some(lat), Some(lon)) => {
            let fix = Coordinates::from_user_input(lat, lon)
                .map_err(|e| map_locator_error(req_id.0.clone(), &e))?;
            state
                .resolver
                .resolve_and_describe_device(&FixedDeviceLocation(fix), &state.geocoder)
                .await
                .map_err(|e| map_locator_error(req_id.0.clone(), &e))?
        }
        _ => {
            return Err(ApiError::new(
                req_id.0,
                "bad_request",
                "Provide either an address or both lat and lon.",
            ))
        }
    };

    let ranked = find_nearest(Some(location.coordinates), state.catalog.shelters(), limit)
        .map_err(|e| map_locator_error(req_id.0.clone(), &e))?;

    let shelters = ranked
        .into_iter()
        .map(|r| ShelterItem {
            distance: format_distance(r.distance_km),
            directions_url: directions_url(&r.shelter, Some(location.coordinates)),
            ranked: r,
        })
        .collect();

    Ok(Json(ApiResponse {
        data: NearestData { location, shelters },
        meta: ResponseMeta::new(req_id.0),
    }))
}
