use serde_json::json;

use super::*;

fn feature(properties: Value, coordinates: Value) -> Value {
    json!({
        "type": "Feature",
        "properties": properties,
        "geometry": { "type": "Point", "coordinates": coordinates }
    })
}

// -----------------------------------------------------------------------
// normalize_feature
// -----------------------------------------------------------------------

#[test]
fn normalize_feature_swaps_axis_order() {
    let record = normalize_feature(feature(json!({}), json!([35.2137, 31.7683]))).unwrap();
    assert!((record.coordinates.latitude - 31.7683).abs() < f64::EPSILON);
    assert!((record.coordinates.longitude - 35.2137).abs() < f64::EPSILON);
}

#[test]
fn normalize_feature_maps_properties() {
    let props = json!({
        "shelter_no": 114,
        "address_label": "HaNevi'im St 12",
        "operator": "Jerusalem Municipality",
        "capacity": "80",
        "area": 64.5,
        "type": "Public shelter",
        "neighborhood": "Musrara",
        "waze_link": "https://waze.com/ul?ll=31.78,35.22",
        "google_maps_link": "https://www.google.com/maps/dir//31.78,35.22"
    });
    let record = normalize_feature(feature(props, json!([35.22, 31.78]))).unwrap();

    assert_eq!(record.id, "114");
    assert_eq!(record.address, "HaNevi'im St 12");
    assert_eq!(record.operator, "Jerusalem Municipality");
    assert_eq!(record.capacity, "80");
    assert_eq!(record.area, "64.5");
    assert_eq!(record.kind, "Public shelter");
    assert_eq!(record.neighborhood, "Musrara");
    assert_eq!(
        record.external_links.waze.as_deref(),
        Some("https://waze.com/ul?ll=31.78,35.22")
    );
    assert_eq!(
        record.external_links.google_maps.as_deref(),
        Some("https://www.google.com/maps/dir//31.78,35.22")
    );
}

#[test]
fn normalize_feature_defaults_missing_fields() {
    let record = normalize_feature(feature(json!({}), json!([35.22, 31.78]))).unwrap();
    assert_eq!(record.id, "Unknown");
    assert_eq!(record.address, "Address not available");
    assert_eq!(record.operator, "Unknown");
    assert_eq!(record.kind, "Unknown");
    assert_eq!(record.neighborhood, "Unknown");
    assert_eq!(record.capacity, "Unknown");
    assert_eq!(record.area, "Unknown");
    assert!(record.external_links.is_empty());
}

#[test]
fn normalize_feature_treats_empty_strings_as_missing() {
    let props = json!({ "operator": "  ", "waze_link": "", "capacity": null });
    let record = normalize_feature(feature(props, json!([35.22, 31.78]))).unwrap();
    assert_eq!(record.operator, "Unknown");
    assert_eq!(record.capacity, "Unknown");
    assert!(record.external_links.waze.is_none());
}

#[test]
fn normalize_feature_falls_back_to_id_key() {
    let record =
        normalize_feature(feature(json!({ "id": "A-7" }), json!([35.22, 31.78]))).unwrap();
    assert_eq!(record.id, "A-7");
}

#[test]
fn normalize_feature_reads_bom_prefixed_neighborhood() {
    let props = json!({ "\u{feff}neighborhood": "Rehavia" });
    let record = normalize_feature(feature(props, json!([35.22, 31.78]))).unwrap();
    assert_eq!(record.neighborhood, "Rehavia");
}

#[test]
fn normalize_feature_keeps_non_numeric_capacity_text() {
    let props = json!({ "capacity": "40-60" });
    let record = normalize_feature(feature(props, json!([35.22, 31.78]))).unwrap();
    assert_eq!(record.capacity, "40-60");
}

#[test]
fn normalize_feature_rejects_missing_geometry() {
    let value = json!({ "type": "Feature", "properties": { "shelter_no": 1 } });
    assert_eq!(
        normalize_feature(value),
        Err(FeatureDefect::MissingGeometry)
    );
}

#[test]
fn normalize_feature_rejects_short_position() {
    assert_eq!(
        normalize_feature(feature(json!({}), json!([35.22]))),
        Err(FeatureDefect::MalformedPosition)
    );
}

#[test]
fn normalize_feature_rejects_non_numeric_position() {
    assert_eq!(
        normalize_feature(feature(json!({}), json!(["35.22", "31.78"]))),
        Err(FeatureDefect::MalformedPosition)
    );
}

#[test]
fn normalize_feature_rejects_out_of_range_position() {
    assert!(matches!(
        normalize_feature(feature(json!({}), json!([200.0, 31.78]))),
        Err(FeatureDefect::OutOfRange { .. })
    ));
}

// -----------------------------------------------------------------------
// parse_feature_collection
// -----------------------------------------------------------------------

#[test]
fn parse_feature_collection_skips_defective_features() {
    let body = json!({
        "type": "FeatureCollection",
        "features": [
            feature(json!({ "shelter_no": 1 }), json!([35.21, 31.76])),
            { "type": "Feature", "properties": { "shelter_no": 2 }, "geometry": null },
            feature(json!({ "shelter_no": 3 }), json!([35.23, 31.79])),
            "not a feature"
        ]
    })
    .to_string();

    let catalog = parse_feature_collection(&body, "test").unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.skipped(), 2);
    let ids: Vec<&str> = catalog.shelters().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn parse_feature_collection_accepts_empty_features() {
    let catalog =
        parse_feature_collection(r#"{"type":"FeatureCollection","features":[]}"#, "test").unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.skipped(), 0);
}

#[test]
fn parse_feature_collection_rejects_invalid_json() {
    let err = parse_feature_collection("<html>503</html>", "test").unwrap_err();
    assert!(matches!(err, CatalogError::Deserialize { .. }));
}

#[test]
fn parse_feature_collection_rejects_missing_features() {
    let err = parse_feature_collection(r#"{"type":"FeatureCollection"}"#, "test").unwrap_err();
    assert!(matches!(err, CatalogError::Malformed(_)));
}

#[test]
fn parse_feature_collection_rejects_non_object_root() {
    let err = parse_feature_collection("[1, 2, 3]", "test").unwrap_err();
    assert!(matches!(err, CatalogError::Malformed(_)));
}
