mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use shelter_catalog::{CatalogSource, LoadOptions};
use shelter_geocode::{LocationResolver, NominatimClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = shelter_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let source = CatalogSource::parse(&config.catalog_source);
    let options = LoadOptions {
        timeout_secs: config.catalog_timeout_secs,
        user_agent: config.geocoder_user_agent.clone(),
        max_retries: config.catalog_max_retries,
        backoff_base_ms: config.catalog_retry_backoff_base_ms,
    };
    let catalog = shelter_catalog::load(&source, &options).await?;
    if catalog.is_empty() {
        tracing::warn!(%source, "catalog contains no usable shelters");
    }

    let geocoder = NominatimClient::with_base_url(
        &config.geocoder_base_url,
        &config.geocoder_user_agent,
        config.geocode_timeout_secs,
    )?;
    let resolver = LocationResolver::default()
        .with_geocode_timeout(Duration::from_secs(config.geocode_timeout_secs))
        .with_reverse_timeout(Duration::from_secs(config.reverse_geocode_timeout_secs));

    let state = AppState {
        catalog: Arc::new(catalog),
        resolver,
        geocoder,
        default_limit: config.result_limit,
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "shelter server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
