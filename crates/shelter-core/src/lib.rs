//! Domain core for the shelter locator: coordinates, great-circle math,
//! nearest-shelter ranking, directions links and configuration.
//!
//! Nothing in this crate performs I/O. Catalog loading lives in
//! `shelter-catalog` and location resolution in `shelter-geocode`.

pub mod app_config;
pub mod config;
pub mod directions;
pub mod error;
pub mod finder;
pub mod geo;
pub mod messages;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use directions::directions_url;
pub use error::{ConfigError, LocatorError};
pub use finder::{find_nearest, DEFAULT_RESULT_LIMIT};
pub use geo::{
    distance_km, format_distance, is_within_service_area, running_minutes, walking_minutes,
};
pub use messages::user_message;
pub use types::{
    Coordinates, ExternalLinks, RankedShelter, Region, ServiceAreaBounds, ShelterRecord,
    TravelTime, JERUSALEM,
};
