//! Catalog Core Library
//!
//! This crate provides the product domain model, validation rules, error types and
//! configuration shared by the store, storage and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, CatalogConfig, Config, ProductStoreBackend};
pub use error::{AppError, ErrorMetadata, FieldErrors, LogLevel};
pub use storage_types::StorageBackend;
