//! Storage setup and initialization

use anyhow::{Context, Result};
use catalog_core::Config;
use catalog_storage::{create_storage, Storage};
use std::sync::Arc;

/// Create the image storage backend selected by configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        path = %config.local_storage_path(),
        "Storage initialized successfully"
    );
    Ok(storage)
}
