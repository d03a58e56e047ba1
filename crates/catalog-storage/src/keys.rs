//! Shared key generation for storage backends.
//!
//! Key format: `uploads/{filename}`.

use uuid::Uuid;

/// Directory (and URL prefix) holding every uploaded image.
pub const UPLOADS_PREFIX: &str = "uploads";

/// Generate a storage key for the given filename.
pub fn generate_storage_key(filename: &str) -> String {
    format!("{}/{}", UPLOADS_PREFIX, filename)
}

/// Fresh collision-free filename keeping the (lowercased) extension of `original`.
pub fn generate_filename(original: &str) -> String {
    let extension = original
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}
