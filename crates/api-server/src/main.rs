//! API server for the single-tenant consent platform
//!
//! Bootstraps the tenant from the configuration file on every start, then
//! serves the REST API on port 8081 (`CONSENT_API_PORT`).

mod routes;
mod state;

use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use consent_core::bootstrap::{BootstrapOptions, SingleTenantBootstrap};
use consent_core::{feature_flags, Configuration, TenantStores};

use crate::state::AppState;

const DEFAULT_PORT: u16 = 8081;

fn env_path(name: &str, default: &str) -> PathBuf {
    std::env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "consent_api=debug,consent_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!("Startup aborted: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let data_dir = env_path("CONSENT_DATA_DIR", ".consent-data");
    let config_path = env_path("CONSENT_CONFIG", "config.json");
    let assets_dir = env_path("CONSENT_ASSETS_DIR", "assets");
    let port = std::env::var("CONSENT_API_PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    tracing::info!("Using data directory: {:?}", data_dir);
    tracing::info!("Using configuration file: {:?}", config_path);

    let mut config = Configuration::load(&config_path)
        .await
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;
    if let Some(test_mode) = feature_flags::test_mode_override() {
        config = config.with_test_mode(test_mode);
    }

    let stores = TenantStores::open(&data_dir, &assets_dir)
        .await
        .context("Failed to open tenant stores")?;

    let report = SingleTenantBootstrap::new(config, stores.clone())
        .with_options(BootstrapOptions::from_env())
        .run()
        .await?;
    tracing::info!(
        organization_id = %report.organization_id,
        admin_id = %report.admin_id,
        "Tenant ready"
    );

    let app_state = AppState::new(stores, data_dir);
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::tenant::router())
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("REST API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
