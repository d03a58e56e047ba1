//! Catalog Storage Library
//!
//! This crate provides the blob storage abstraction used for product images and
//! its local filesystem implementation.
//!
//! # Storage key format
//!
//! Every image lives under `uploads/{filename}`, where the filename is a fresh UUID
//! plus the original extension. Keys must not contain `..` or a leading `/`. Key
//! generation is centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use catalog_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{generate_filename, generate_storage_key, UPLOADS_PREFIX};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
