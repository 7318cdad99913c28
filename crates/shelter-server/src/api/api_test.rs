use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use shelter_core::{Coordinates, ExternalLinks, ShelterRecord};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn shelter(id: &str, latitude: f64, longitude: f64) -> ShelterRecord {
    ShelterRecord {
        id: id.to_owned(),
        address: format!("Shelter {id}"),
        operator: "Jerusalem Municipality".to_owned(),
        kind: "Public shelter".to_owned(),
        neighborhood: "Center".to_owned(),
        capacity: "50".to_owned(),
        area: "40".to_owned(),
        coordinates: Coordinates::new(latitude, longitude).expect("valid coordinates"),
        external_links: ExternalLinks::default(),
    }
}

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            shelter("far", 31.7863, 35.2137),
            shelter("near", 31.7688, 35.2137),
            shelter("mid", 31.7733, 35.2137),
        ],
        1,
    )
}

fn test_app(geocoder_url: &str, catalog: Catalog) -> Router {
    let geocoder = NominatimClient::with_base_url(geocoder_url, "test-agent", 2)
        .expect("client construction should not fail");
    let resolver = LocationResolver::default()
        .with_geocode_timeout(Duration::from_secs(2))
        .with_reverse_timeout(Duration::from_secs(2));
    build_app(
        AppState {
            catalog: Arc::new(catalog),
            resolver,
            geocoder,
            default_limit: 10,
        },
        default_rate_limit_state(),
    )
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

async fn mount_reverse(server: &MockServer, label: &str) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "display_name": label })),
        )
        .mount(server)
        .await;
}

// -------------------------------------------------------------------------
// Helpers
// -------------------------------------------------------------------------

#[test]
fn normalize_limit_applies_defaults_and_bounds() {
    assert_eq!(normalize_limit(None, 10), 10);
    assert_eq!(normalize_limit(Some(0), 10), 1);
    assert_eq!(normalize_limit(Some(1_000), 10), MAX_RESULT_LIMIT);
    assert_eq!(normalize_limit(Some(3), 10), 3);
}

#[test]
fn locator_errors_map_to_http_statuses() {
    let cases = [
        (LocatorError::EmptyInput, StatusCode::BAD_REQUEST),
        (LocatorError::NotFound, StatusCode::NOT_FOUND),
        (
            LocatorError::InvalidInput {
                latitude: 95.0,
                longitude: 35.2,
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            LocatorError::OutOfServiceArea {
                latitude: 32.08,
                longitude: 34.78,
                region: "Jerusalem",
            },
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            LocatorError::Timeout(Duration::from_secs(10)),
            StatusCode::GATEWAY_TIMEOUT,
        ),
        (
            LocatorError::Unavailable("503".to_owned()),
            StatusCode::BAD_GATEWAY,
        ),
        (LocatorError::PermissionDenied, StatusCode::FORBIDDEN),
        (LocatorError::Unknown, StatusCode::INTERNAL_SERVER_ERROR),
        (LocatorError::EmptyCatalog, StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        let response = map_locator_error("req-1".to_owned(), &error).into_response();
        assert_eq!(response.status(), expected, "status for {error:?}");
    }
}

#[test]
fn locator_error_body_hides_provider_detail() {
    let api_error = map_locator_error(
        "req-1".to_owned(),
        &LocatorError::Unavailable("connection refused by 10.0.0.7".to_owned()),
    );
    assert!(!api_error.error.message.contains("10.0.0.7"));
    assert_eq!(api_error.error.code, "upstream_unavailable");
}

// -------------------------------------------------------------------------
// Routes
// -------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_catalog_size() {
    let app = test_app("http://127.0.0.1:9", catalog());
    let (status, json) = get_json(app, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["shelters"], 3);
    assert_eq!(json["data"]["skipped"], 1);
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn health_is_degraded_with_empty_catalog() {
    let app = test_app("http://127.0.0.1:9", Catalog::default());
    let (status, json) = get_json(app, "/api/v1/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["data"]["status"], "degraded");
}

#[tokio::test]
async fn nearest_by_coordinates_ranks_and_labels() {
    let server = MockServer::start().await;
    mount_reverse(&server, "Zion Square, Jerusalem").await;
    let app = test_app(&server.uri(), catalog());

    let (status, json) =
        get_json(app, "/api/v1/shelters/nearest?lat=31.7683&lon=35.2137&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["location"]["label"], "Zion Square, Jerusalem");
    let shelters = json["data"]["shelters"].as_array().expect("shelters array");
    assert_eq!(shelters.len(), 2);
    assert_eq!(shelters[0]["shelter"]["id"], "near");
    assert_eq!(shelters[0]["rank"], 1);
    assert_eq!(shelters[1]["shelter"]["id"], "mid");
    assert_eq!(shelters[1]["rank"], 2);
    assert_eq!(
        shelters[0]["directions_url"],
        "https://www.google.com/maps/dir/31.7683,35.2137/31.7688,35.2137"
    );
    assert!(shelters[0]["distance"].as_str().expect("distance").ends_with(" m"));
}

#[tokio::test]
async fn nearest_by_coordinates_falls_back_to_generic_label() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), catalog());

    let (status, json) = get_json(app, "/api/v1/shelters/nearest?lat=31.7683&lon=35.2137").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["location"]["label"], "Current location");
    assert_eq!(json["data"]["shelters"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn nearest_by_address_geocodes_within_region() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Jaffa Rd 1, Jerusalem, Israel"))
        .and(query_param("countrycodes", "il"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "31.7733", "lon": "35.2137", "display_name": "Jaffa Road, Jerusalem, Israel" }
        ])))
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), catalog());

    let (status, json) = get_json(app, "/api/v1/shelters/nearest?address=Jaffa%20Rd%201").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["location"]["label"], "Jaffa Rd 1");
    assert_eq!(json["data"]["shelters"][0]["shelter"]["id"], "mid");
}

#[tokio::test]
async fn nearest_outside_service_area_is_unprocessable() {
    let app = test_app("http://127.0.0.1:9", catalog());
    let (status, json) = get_json(app, "/api/v1/shelters/nearest?lat=32.0853&lon=34.7818").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "out_of_service_area");
    assert!(json["error"]["message"]
        .as_str()
        .expect("message")
        .contains("outside Jerusalem"));
}

#[tokio::test]
async fn nearest_with_invalid_coordinates_is_bad_request() {
    let app = test_app("http://127.0.0.1:9", catalog());
    let (status, json) = get_json(app, "/api/v1/shelters/nearest?lat=95&lon=35.2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(
        json["error"]["message"],
        "Latitude must be between -90 and 90 and longitude between -180 and 180."
    );
}

#[tokio::test]
async fn describe_with_invalid_coordinates_is_bad_request() {
    let app = test_app("http://127.0.0.1:9", catalog());
    let (status, json) = get_json(app, "/api/v1/location/describe?lat=31.78&lon=181").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn nearest_without_location_is_bad_request() {
    let app = test_app("http://127.0.0.1:9", catalog());
    let (status, json) = get_json(app, "/api/v1/shelters/nearest?lat=31.77").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn nearest_with_blank_address_is_bad_request() {
    let app = test_app("http://127.0.0.1:9", catalog());
    let (status, json) = get_json(app, "/api/v1/shelters/nearest?address=%20%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "Please enter an address.");
}

#[tokio::test]
async fn nearest_unknown_address_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), catalog());

    let (status, json) = get_json(app, "/api/v1/shelters/nearest?address=Nowhere").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn nearest_geocoder_outage_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), catalog());

    let (status, json) = get_json(app, "/api/v1/shelters/nearest?address=Jaffa").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "upstream_unavailable");
}

#[tokio::test]
async fn nearest_with_empty_catalog_is_internal_error() {
    let server = MockServer::start().await;
    mount_reverse(&server, "Zion Square").await;
    let app = test_app(&server.uri(), Catalog::default());

    let (status, json) = get_json(app, "/api/v1/shelters/nearest?lat=31.7683&lon=35.2137").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["error"]["message"],
        "Unable to find shelters. Please try again."
    );
}

#[tokio::test]
async fn describe_returns_label() {
    let server = MockServer::start().await;
    mount_reverse(&server, "Mahane Yehuda Market").await;
    let app = test_app(&server.uri(), catalog());

    let (status, json) = get_json(app, "/api/v1/location/describe?lat=31.785&lon=35.212").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["label"], "Mahane Yehuda Market");
}

#[tokio::test]
async fn describe_returns_null_when_geocoder_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), catalog());

    let (status, json) = get_json(app, "/api/v1/location/describe?lat=31.785&lon=35.212").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["label"].is_null());
}
