//! Where the catalog comes from and how it is loaded.

use std::fmt;
use std::path::PathBuf;

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::normalize::parse_feature_collection;
use crate::types::Catalog;

/// A local GeoJSON file or a remote `http(s)` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Interprets `raw` as a URL when it has an `http://` or `https://`
    /// scheme, otherwise as a filesystem path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(trimmed.to_owned())
        } else {
            CatalogSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Path(p) => write!(f, "{}", p.display()),
            CatalogSource::Url(u) => f.write_str(u),
        }
    }
}

/// Network policy for URL sources. Ignored for file sources.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Jerusalem-Shelter-Locator/1.0".to_owned(),
            max_retries: 3,
            backoff_base_ms: 500,
        }
    }
}

/// Loads and normalizes the shelter catalog.
///
/// Individual defective features are skipped; see [`Catalog::skipped`].
///
/// # Errors
///
/// Returns a [`CatalogError`] when the source is unreachable or not a
/// feature collection at the top level.
pub async fn load(source: &CatalogSource, options: &LoadOptions) -> Result<Catalog, CatalogError> {
    let body = match source {
        CatalogSource::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| CatalogError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?
        }
        CatalogSource::Url(url) => {
            let client = CatalogClient::new(
                options.timeout_secs,
                &options.user_agent,
                options.max_retries,
                options.backoff_base_ms,
            )?;
            client.fetch_text(url).await?
        }
    };

    let catalog = parse_feature_collection(&body, &source.to_string())?;
    tracing::info!(
        source = %source,
        shelters = catalog.len(),
        skipped = catalog.skipped(),
        "loaded shelter catalog"
    );
    Ok(catalog)
}
