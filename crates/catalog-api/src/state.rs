//! Application state shared by every handler.

use catalog_core::Config;
use catalog_db::ProductStore;
use catalog_storage::Storage;
use std::sync::Arc;

use crate::services::ProductLifecycleService;

/// Upload acceptance limits and presentation settings, fixed at startup.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub max_images: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    /// Prefix of derived image URLs
    pub base_url: String,
}

impl UploadConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes(),
            max_images: config.max_images_per_product(),
            allowed_extensions: config.allowed_extensions().to_vec(),
            allowed_content_types: config.allowed_content_types().to_vec(),
            base_url: config.base_url().to_string(),
        }
    }

    /// Largest request body a product form can legitimately have.
    pub fn max_request_body(&self) -> usize {
        self.max_file_size
            .saturating_mul(self.max_images)
            .saturating_add(crate::constants::MULTIPART_OVERHEAD_BYTES)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub storage: Arc<dyn Storage>,
    pub lifecycle: ProductLifecycleService,
    pub upload: UploadConfig,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductStore>,
        storage: Arc<dyn Storage>,
        upload: UploadConfig,
    ) -> Self {
        let lifecycle = ProductLifecycleService::new(products.clone(), storage.clone());
        Self {
            products,
            storage,
            lifecycle,
            upload,
        }
    }
}
