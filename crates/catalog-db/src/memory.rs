use std::collections::HashMap;

use catalog_core::models::{Product, ProductFields};
use catalog_core::validation::validate_product;
use catalog_core::AppError;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{not_found, parse_product_id, ProductStore, ProductUpdate};

#[derive(Default)]
struct Inner {
    products: HashMap<Uuid, (u64, Product)>,
    next_seq: u64,
}

/// In-process product store for development and tests.
///
/// Writes take the lock for the whole merge-validate-write sequence, which gives the
/// same per-record ordering as the row lock in the PostgreSQL repository.
#[derive(Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, fields: ProductFields) -> Result<Product, AppError> {
        let new_product = validate_product(&fields)?;
        let product = new_product.into_product(Uuid::new_v4(), Utc::now());

        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.products.insert(product.id, (seq, product.clone()));

        tracing::debug!(product_id = %product.id, "Product inserted into memory store");
        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&(u64, Product)> = inner.products.values().collect();
        entries.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });
        Ok(entries.into_iter().map(|(_, p)| p.clone()).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let id = parse_product_id(id)?;
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).map(|(_, p)| p.clone()))
    }

    async fn update_by_id(
        &self,
        id: &str,
        fields: ProductFields,
    ) -> Result<ProductUpdate, AppError> {
        let id = parse_product_id(id)?;
        let mut inner = self.inner.write().await;

        let (_, existing) = inner.products.get_mut(&id).ok_or_else(|| not_found(id))?;
        let merged = validate_product(&fields.merge_onto(existing))?;
        let updated = merged.into_product(existing.id, existing.created_at);
        let previous = std::mem::replace(existing, updated.clone());

        Ok(ProductUpdate { previous, updated })
    }

    async fn delete_by_id(&self, id: &str) -> Result<Product, AppError> {
        let id = parse_product_id(id)?;
        let mut inner = self.inner.write().await;
        inner
            .products
            .remove(&id)
            .map(|(_, p)| p)
            .ok_or_else(|| not_found(id))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
