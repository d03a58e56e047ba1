//! Application setup and initialization
//!
//! Everything `main` needs to turn a [`Config`] into a running router, kept out of
//! the binary so integration tests can build the same application.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::{AppState, UploadConfig};
use anyhow::{Context, Result};
use catalog_core::{Config, ProductStoreBackend};
use catalog_db::create_product_store;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format());

    validation::validate_config(&config).context("Configuration validation failed")?;
    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = match config.product_store() {
        ProductStoreBackend::Postgres => Some(database::setup_database(&config).await?),
        ProductStoreBackend::Memory => None,
    };
    let products = create_product_store(&config, pool)?;

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(
        products,
        storage,
        UploadConfig::from_config(&config),
    ));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
