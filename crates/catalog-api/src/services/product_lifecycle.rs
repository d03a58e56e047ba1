//! Product lifecycle: keeps product records and their image files consistent
//! across create, update and delete.
//!
//! Image files are already written by the upload boundary when these operations
//! run; the service decides which files a record references and releases files that
//! no record references any more. File cleanup is best-effort: failures are logged
//! and never fail the operation.

use catalog_core::models::{Product, ProductFields};
use catalog_core::validation::validate_product;
use catalog_core::AppError;
use catalog_db::ProductStore;
use catalog_storage::Storage;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

const CLEANUP_CONCURRENCY: usize = 8;

#[derive(Clone)]
pub struct ProductLifecycleService {
    store: Arc<dyn ProductStore>,
    storage: Arc<dyn Storage>,
}

impl ProductLifecycleService {
    pub fn new(store: Arc<dyn ProductStore>, storage: Arc<dyn Storage>) -> Self {
        Self { store, storage }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.store.find_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Product, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    /// Record a new product referencing the already-stored `image_paths`.
    ///
    /// Files are left in place when the store rejects the record.
    #[tracing::instrument(skip(self, fields), fields(images = image_paths.len()))]
    pub async fn create(
        &self,
        fields: ProductFields,
        image_paths: Vec<String>,
    ) -> Result<Product, AppError> {
        if image_paths.is_empty() {
            return Err(AppError::MissingImage);
        }

        match self.store.insert(fields.with_image_paths(image_paths.clone())).await {
            Ok(product) => {
                tracing::info!(product_id = %product.id, "Product created");
                Ok(product)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    orphaned_paths = ?image_paths,
                    "Product insert failed; uploaded files left for reconciliation"
                );
                Err(e)
            }
        }
    }

    /// Apply a partial update. A non-empty `new_image_paths` replaces the whole image set.
    ///
    /// The merged record is validated before anything is written. Old files are
    /// deleted only after the store accepted the new record; on failure the new
    /// files are deleted instead, so no record ever points at a missing file.
    /// Concurrent replacements each release the set their own write superseded.
    #[tracing::instrument(skip(self, fields), fields(new_images = new_image_paths.len()))]
    pub async fn update(
        &self,
        id: &str,
        fields: ProductFields,
        new_image_paths: Vec<String>,
    ) -> Result<Product, AppError> {
        let existing = match self.get(id).await {
            Ok(product) => product,
            Err(e) => {
                self.discard_files(&new_image_paths).await;
                return Err(e);
            }
        };

        let replacing_images = !new_image_paths.is_empty();
        let patch = if replacing_images {
            fields.with_image_paths(new_image_paths.clone())
        } else {
            ProductFields {
                image_paths: None,
                ..fields
            }
        };

        if let Err(errors) = validate_product(&patch.merge_onto(&existing)) {
            self.discard_files(&new_image_paths).await;
            return Err(AppError::Validation(errors));
        }

        let update = match self.store.update_by_id(id, patch).await {
            Ok(update) => update,
            Err(e) => {
                self.discard_files(&new_image_paths).await;
                return Err(e);
            }
        };

        // Released paths come from the record the store replaced, not from `existing`,
        // which a concurrent update may already have superseded.
        self.discard_files(&update.released_image_paths()).await;
        let updated = update.updated;

        tracing::info!(product_id = %updated.id, replaced_images = replacing_images, "Product updated");
        Ok(updated)
    }

    /// Remove the record, then release its files.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Product, AppError> {
        let product = self.store.delete_by_id(id).await?;
        self.discard_files(&product.image_paths).await;

        tracing::info!(product_id = %product.id, "Product deleted");
        Ok(product)
    }

    /// Best-effort removal of files no record references.
    pub async fn discard_files(&self, paths: &[String]) {
        if paths.is_empty() {
            return;
        }

        stream::iter(paths.iter().cloned())
            .map(|key| {
                let storage = self.storage.clone();
                async move {
                    if let Err(e) = storage.delete(&key).await {
                        tracing::warn!(
                            error = %e,
                            storage_key = %key,
                            "Failed to delete image file from storage"
                        );
                    }
                }
            })
            .buffer_unordered(CLEANUP_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;
    }
}
