use catalog_core::models::{Product, ProductFields};
use catalog_core::validation::validate_product;
use catalog_core::AppError;
use chrono::Utc;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::store::{not_found, parse_product_id, ProductStore, ProductUpdate};

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, category, image_paths, created_at";

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProductStore for ProductRepository {
    #[tracing::instrument(skip(self, fields), fields(db.table = "products", db.operation = "insert"))]
    async fn insert(&self, fields: ProductFields) -> Result<Product, AppError> {
        let new_product = validate_product(&fields)?;

        let product = sqlx::query_as::<Postgres, Product>(&format!(
            r#"
            INSERT INTO products (id, name, description, price, category, image_paths, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(new_product.price)
        .bind(new_product.category)
        .bind(&new_product.image_paths)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(product_id = %product.id, images = product.image_paths.len(), "Product inserted");

        Ok(product)
    }

    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select"))]
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<Postgres, Product>(&format!(
            "SELECT {} FROM products ORDER BY created_at DESC, id",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select", db.record_id = %id))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let id = parse_product_id(id)?;

        let product = sqlx::query_as::<Postgres, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Merge, validate and write under a row lock so concurrent updates of the same
    /// product serialize; the last committed write wins.
    #[tracing::instrument(skip(self, fields), fields(db.table = "products", db.operation = "update", db.record_id = %id))]
    async fn update_by_id(
        &self,
        id: &str,
        fields: ProductFields,
    ) -> Result<ProductUpdate, AppError> {
        let id = parse_product_id(id)?;
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<Postgres, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1 FOR UPDATE",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        let merged = validate_product(&fields.merge_onto(&existing))?;

        let product = sqlx::query_as::<Postgres, Product>(&format!(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, category = $5, image_paths = $6
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .bind(&merged.name)
        .bind(&merged.description)
        .bind(merged.price)
        .bind(merged.category)
        .bind(&merged.image_paths)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ProductUpdate {
            previous: existing,
            updated: product,
        })
    }

    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "delete", db.record_id = %id))]
    async fn delete_by_id(&self, id: &str) -> Result<Product, AppError> {
        let id = parse_product_id(id)?;

        let product = sqlx::query_as::<Postgres, Product>(&format!(
            "DELETE FROM products WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        Ok(product)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
