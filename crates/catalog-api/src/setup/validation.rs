//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use catalog_core::{Config, ProductStoreBackend};

/// Validate critical configuration values
///
/// Runs the config's own consistency checks, then the checks that only matter for
/// serving HTTP.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Set specific allowed origins via CORS_ORIGINS."
        ));
    }

    if config.product_store() == ProductStoreBackend::Postgres {
        if config.db_max_connections() == 0 {
            return Err(anyhow::anyhow!("Database max connections cannot be 0"));
        }
        if config.db_timeout_seconds() == 0 {
            return Err(anyhow::anyhow!("Database timeout cannot be 0"));
        }
    } else if is_production {
        tracing::warn!("In-memory product store selected in production");
    }

    if config.allowed_extensions().is_empty() {
        return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS cannot be empty"));
    }
    if config.allowed_content_types().is_empty() {
        return Err(anyhow::anyhow!("ALLOWED_CONTENT_TYPES cannot be empty"));
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
