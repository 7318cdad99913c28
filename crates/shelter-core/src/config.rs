use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<_, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SHELTER_ENV", "development"))?;
    let bind_addr = parse("SHELTER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHELTER_LOG_LEVEL", "info");

    let catalog_source = or_default("SHELTER_CATALOG_SOURCE", "./data/shelters.json");
    let catalog_timeout_secs = parse_var(&lookup, "SHELTER_CATALOG_TIMEOUT_SECS", "30")?;
    let catalog_max_retries = parse_var(&lookup, "SHELTER_CATALOG_MAX_RETRIES", "3")?;
    let catalog_retry_backoff_base_ms =
        parse_var(&lookup, "SHELTER_CATALOG_RETRY_BACKOFF_BASE_MS", "500")?;

    let geocoder_base_url = or_default(
        "SHELTER_GEOCODER_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let geocoder_user_agent = or_default(
        "SHELTER_GEOCODER_USER_AGENT",
        "Jerusalem-Shelter-Locator/1.0",
    );
    let geocode_timeout_secs = parse_var(&lookup, "SHELTER_GEOCODE_TIMEOUT_SECS", "10")?;
    let reverse_geocode_timeout_secs =
        parse_var(&lookup, "SHELTER_REVERSE_GEOCODE_TIMEOUT_SECS", "8")?;

    let result_limit: usize = parse_var(&lookup, "SHELTER_RESULT_LIMIT", "10")?;
    if result_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHELTER_RESULT_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_source,
        catalog_timeout_secs,
        catalog_max_retries,
        catalog_retry_backoff_base_ms,
        geocoder_base_url,
        geocoder_user_agent,
        geocode_timeout_secs,
        reverse_geocode_timeout_secs,
        result_limit,
    })
}

/// Read `var` (or `default`) and parse it as a number.
fn parse_var<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELTER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
