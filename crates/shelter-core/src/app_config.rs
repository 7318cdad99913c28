use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process configuration for the CLI and HTTP server.
///
/// The lookup engine itself never reads this; callers pass the relevant
/// fields explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Local path or `http(s)` URL of the GeoJSON shelter dataset.
    pub catalog_source: String,
    pub catalog_timeout_secs: u64,
    pub catalog_max_retries: u32,
    pub catalog_retry_backoff_base_ms: u64,
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,
    pub geocode_timeout_secs: u64,
    pub reverse_geocode_timeout_secs: u64,
    pub result_limit: usize,
}
