use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shelter_core::Coordinates;

use crate::middleware::RequestId;

use super::{map_locator_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct DescribeQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct DescribeData {
    label: Option<String>,
}

/// `GET /api/v1/location/describe?lat=&lon=`. A missing label is `null`,
/// not an error.
pub(super) async fn describe(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DescribeQuery>,
) -> Result<Json<ApiResponse<DescribeData>>, ApiError> {
    let position = Coordinates::from_user_input(query.lat, query.lon)
        .map_err(|e| map_locator_error(req_id.0.clone(), &e))?;

    let label = state
        .resolver
        .describe_location(position, &state.geocoder)
        .await;

    Ok(Json(ApiResponse {
        data: DescribeData { label },
        meta: ResponseMeta::new(req_id.0),
    }))
}
