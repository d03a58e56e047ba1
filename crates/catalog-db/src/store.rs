use catalog_core::models::{Product, ProductFields};
use catalog_core::AppError;
use uuid::Uuid;

/// A committed update: the record as it stood when locked, and as written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub previous: Product,
    pub updated: Product,
}

impl ProductUpdate {
    /// Image paths the previous record referenced and the updated one no longer does.
    pub fn released_image_paths(&self) -> Vec<String> {
        self.previous
            .image_paths
            .iter()
            .filter(|path| !self.updated.image_paths.contains(path))
            .cloned()
            .collect()
    }
}

/// Trait for product persistence
///
/// Every id-taking operation accepts the raw identifier as received and reports
/// `AppError::MalformedId` when it is not a UUID, so "malformed" and "missing"
/// stay distinguishable to callers.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Validate, assign identity and creation time, persist.
    async fn insert(&self, fields: ProductFields) -> Result<Product, AppError>;

    /// All products, newest first.
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError>;

    /// Apply the provided fields over the stored record and re-validate the result.
    ///
    /// The returned `previous` record is read under the same lock as the write, so
    /// callers can release exactly the files the write replaced.
    async fn update_by_id(
        &self,
        id: &str,
        fields: ProductFields,
    ) -> Result<ProductUpdate, AppError>;

    /// Remove the record and return it so callers can release its files.
    async fn delete_by_id(&self, id: &str) -> Result<Product, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

pub fn parse_product_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::MalformedId(id.to_string()))
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    tracing::debug!(product_id = %id, "Product not found");
    AppError::NotFound("Product not found".to_string())
}
