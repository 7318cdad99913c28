mod location;
mod shelters;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shelter_catalog::Catalog;
use shelter_core::{user_message, LocatorError};
use shelter_geocode::{LocationResolver, NominatimClient};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

const MAX_RESULT_LIMIT: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub resolver: LocationResolver,
    pub geocoder: NominatimClient,
    pub default_limit: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    shelters: usize,
    skipped: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "permission_denied" => StatusCode::FORBIDDEN,
            "not_found" => StatusCode::NOT_FOUND,
            "out_of_service_area" => StatusCode::UNPROCESSABLE_ENTITY,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_unavailable" => StatusCode::BAD_GATEWAY,
            "upstream_timeout" => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<usize>, default: usize) -> usize {
    limit.unwrap_or(default).clamp(1, MAX_RESULT_LIMIT)
}

/// Maps a domain failure to an API error carrying the user-facing message.
/// Provider detail is logged, never returned.
pub(super) fn map_locator_error(request_id: String, error: &LocatorError) -> ApiError {
    let code = match error {
        LocatorError::EmptyInput
        | LocatorError::InvalidCoordinate { .. }
        | LocatorError::NoLocation => "bad_request",
        LocatorError::InvalidInput { .. } => "validation_error",
        LocatorError::NotFound => "not_found",
        LocatorError::OutOfServiceArea { .. } => "out_of_service_area",
        LocatorError::Timeout(_) => "upstream_timeout",
        LocatorError::Unavailable(_) => "upstream_unavailable",
        LocatorError::PermissionDenied => "permission_denied",
        LocatorError::Unknown | LocatorError::CatalogLoad(_) | LocatorError::EmptyCatalog => {
            "internal_error"
        }
    };

    if error.is_recoverable() {
        tracing::info!(error = %error, code, "lookup rejected");
    } else {
        tracing::error!(error = %error, code, "lookup failed");
    }
    ApiError::new(request_id, code, user_message(error))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn lookup_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/shelters/nearest", get(shelters::nearest))
        .route("/api/v1/location/describe", get(location::describe))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(lookup_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let (code, status) = if state.catalog.is_empty() {
        tracing::warn!("health check: catalog is empty");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "ok")
    };

    (
        code,
        Json(ApiResponse {
            data: HealthData {
                status,
                shelters: state.catalog.len(),
                skipped: state.catalog.skipped(),
            },
            meta,
        }),
    )
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
