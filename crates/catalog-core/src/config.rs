//! Configuration module
//!
//! This module provides configuration structures for the catalog API: server,
//! product store, blob storage and upload acceptance settings.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_LOCAL_STORAGE_PATH: &str = "./data";

/// Base configuration shared by every binary
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    /// `json` switches the subscriber to the JSON formatter
    pub log_format: String,
}

/// Which `ProductStore` implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStoreBackend {
    Postgres,
    Memory,
}

impl FromStr for ProductStoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(ProductStoreBackend::Postgres),
            "memory" => Ok(ProductStoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid product store: {}", s)),
        }
    }
}

impl Display for ProductStoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ProductStoreBackend::Postgres => write!(f, "postgres"),
            ProductStoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Catalog service configuration
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base: BaseConfig,
    pub product_store: ProductStoreBackend,
    pub database_url: Option<String>,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    /// Prefix of every derived image URL
    pub base_url: String,
    // Upload acceptance
    pub max_file_size_bytes: usize,
    pub max_images_per_product: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<CatalogConfig>);

impl Config {
    fn as_catalog(&self) -> &CatalogConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_catalog().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = CatalogConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_catalog().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_catalog().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_catalog().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_catalog().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_catalog().base.db_timeout_seconds
    }

    pub fn environment(&self) -> &str {
        &self.as_catalog().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_catalog().base.log_format
    }

    pub fn product_store(&self) -> ProductStoreBackend {
        self.as_catalog().product_store
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_catalog().database_url.as_deref()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_catalog().storage_backend
    }

    pub fn local_storage_path(&self) -> &str {
        &self.as_catalog().local_storage_path
    }

    pub fn base_url(&self) -> &str {
        &self.as_catalog().base_url
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_catalog().max_file_size_bytes
    }

    pub fn max_images_per_product(&self) -> usize {
        self.as_catalog().max_images_per_product
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.as_catalog().allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.as_catalog().allowed_content_types
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        const MAX_FILE_SIZE_MB: usize = 5;
        const MAX_IMAGES_PER_PRODUCT: usize = 5;

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let max_file_size_bytes = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large"))?;

        let max_images_per_product = lookup("MAX_IMAGES_PER_PRODUCT")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_IMAGES_PER_PRODUCT);

        let allowed_extensions = split_list(
            &lookup("ALLOWED_EXTENSIONS").unwrap_or_else(|| "jpg,jpeg,png,gif,webp".to_string()),
        );

        let allowed_content_types = split_list(
            &lookup("ALLOWED_CONTENT_TYPES")
                .unwrap_or_else(|| "image/jpeg,image/png,image/gif,image/webp".to_string()),
        );

        let product_store = match lookup("PRODUCT_STORE") {
            Some(value) => value.parse()?,
            None => ProductStoreBackend::Postgres,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Local,
        };

        let base_url = lookup("BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
            log_format: lookup("LOG_FORMAT")
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_else(|| "text".to_string()),
        };

        Ok(CatalogConfig {
            base,
            product_store,
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            storage_backend,
            local_storage_path: lookup("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
            base_url,
            max_file_size_bytes,
            max_images_per_product,
            allowed_extensions,
            allowed_content_types,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.product_store == ProductStoreBackend::Postgres {
            match self.database_url.as_deref() {
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when PRODUCT_STORE=postgres"
                    ));
                }
                Some(url)
                    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") =>
                {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ));
                }
                Some(_) => {}
            }
        }

        if self.max_images_per_product == 0 {
            return Err(anyhow::anyhow!(
                "MAX_IMAGES_PER_PRODUCT must be at least 1"
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be at least 1"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("BASE_URL must be an http(s) URL"));
        }

        match self.storage_backend {
            StorageBackend::Local => {
                if self.local_storage_path.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
