use std::sync::Arc;

use catalog_core::{AppError, Config, ProductStoreBackend};
use sqlx::PgPool;

use crate::{InMemoryProductStore, ProductRepository, ProductStore};

/// Factory function to create the product store selected by configuration.
///
/// `postgres_pool` must be provided when `PRODUCT_STORE=postgres`.
pub fn create_product_store(
    config: &Config,
    postgres_pool: Option<PgPool>,
) -> Result<Arc<dyn ProductStore>, AppError> {
    match config.product_store() {
        ProductStoreBackend::Postgres => {
            let pool = postgres_pool.ok_or_else(|| {
                AppError::Internal(
                    "PostgreSQL product store selected but no connection pool was provided"
                        .to_string(),
                )
            })?;
            tracing::info!("Initializing PostgreSQL product store");
            Ok(Arc::new(ProductRepository::new(pool)))
        }
        ProductStoreBackend::Memory => {
            tracing::warn!("Initializing in-memory product store; data is lost on restart");
            Ok(Arc::new(InMemoryProductStore::new()))
        }
    }
}
