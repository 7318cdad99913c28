//! Great-circle distance, service-area containment and travel-time helpers.
//!
//! All functions are total over validated input. Use [`Coordinates::new`] to
//! reject non-finite values before they reach this module.

use crate::types::{Coordinates, ServiceAreaBounds, TravelTime};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const WALKING_SPEED_KMH: f64 = 5.0;
pub const RUNNING_SPEED_KMH: f64 = 10.0;

/// Haversine distance between two points in kilometers.
#[must_use]
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Inclusive rectangle containment: points on any edge count as inside.
#[must_use]
pub fn is_within_service_area(c: Coordinates, bounds: &ServiceAreaBounds) -> bool {
    c.latitude >= bounds.south
        && c.latitude <= bounds.north
        && c.longitude >= bounds.west
        && c.longitude <= bounds.east
}

#[must_use]
pub fn walking_minutes(km: f64) -> TravelTime {
    travel_time(km, WALKING_SPEED_KMH)
}

#[must_use]
pub fn running_minutes(km: f64) -> TravelTime {
    travel_time(km, RUNNING_SPEED_KMH)
}

fn travel_time(km: f64, speed_kmh: f64) -> TravelTime {
    let minutes = (km / speed_kmh * 60.0).round();
    if minutes < 1.0 {
        return TravelTime::LessThanOneMinute;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    TravelTime::Minutes(minutes as u32)
}

/// Meters (rounded) below one kilometer, otherwise kilometers to two decimals.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        #[allow(clippy::cast_possible_truncation)]
        let meters = (km * 1000.0).round() as i64;
        return format!("{meters} m");
    }
    format!("{km:.2} km")
}
