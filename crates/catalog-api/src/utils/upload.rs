//! Multipart product form acceptance
//!
//! Reads the text fields and the `images` files of a product form, enforces the
//! upload limits, and writes accepted images to storage under fresh names.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use catalog_core::models::ProductFields;
use catalog_core::validation::IMAGES_FIELD;
use catalog_core::{AppError, FieldErrors};
use catalog_storage::{generate_filename, Storage};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::storage_error;
use crate::state::UploadConfig;

/// One accepted image, held in memory until written to storage.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Parsed product form
#[derive(Debug, Default)]
pub struct ProductForm {
    pub fields: ProductFields,
    pub images: Vec<UploadedImage>,
    /// Problems found while parsing text fields (e.g. a non-numeric price)
    pub parse_errors: FieldErrors,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the upload limit".to_string())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", e))
    }
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate an image's name and content type against the allowlists.
pub fn validate_image_type(
    filename: &str,
    content_type: &str,
    upload: &UploadConfig,
) -> Result<(), AppError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if extension.is_empty() || !upload.allowed_extensions.contains(&extension) {
        return Err(FieldErrors::single(
            IMAGES_FIELD,
            format!(
                "Invalid file extension. Allowed extensions: {}",
                upload.allowed_extensions.join(", ")
            ),
        )
        .into());
    }

    let normalized = normalize_mime_type(content_type);
    if !upload
        .allowed_content_types
        .iter()
        .any(|ct| ct.eq_ignore_ascii_case(&normalized))
    {
        return Err(FieldErrors::single(
            IMAGES_FIELD,
            format!(
                "Invalid content type. Allowed types: {}",
                upload.allowed_content_types.join(", ")
            ),
        )
        .into());
    }

    Ok(())
}

/// Read a file field chunk by chunk, failing as soon as it exceeds `max_size`.
async fn read_limited(mut field: Field<'_>, max_size: usize) -> Result<Bytes, AppError> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if buffer.len() + chunk.len() > max_size {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds maximum allowed size of {} MB",
                max_size / 1024 / 1024
            )));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer.freeze())
}

/// Parse a product form. Unknown fields are ignored.
pub async fn read_product_form(
    mut multipart: Multipart,
    upload: &UploadConfig,
) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == IMAGES_FIELD {
            if form.images.len() >= upload.max_images {
                return Err(FieldErrors::single(
                    IMAGES_FIELD,
                    format!("At most {} images are allowed", upload.max_images),
                )
                .into());
            }

            let original_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            validate_image_type(&original_name, &content_type, upload)?;

            let data = read_limited(field, upload.max_file_size).await?;
            if data.is_empty() {
                return Err(FieldErrors::single(IMAGES_FIELD, "File is empty").into());
            }

            form.images.push(UploadedImage {
                original_name,
                content_type,
                data,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read field: {}", e)))?;

        match field_name.as_str() {
            "name" => form.fields.name = Some(value),
            "description" => form.fields.description = Some(value),
            "category" => form.fields.category = Some(value),
            "price" => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match Decimal::from_str(trimmed) {
                    Ok(price) => form.fields.price = Some(price),
                    Err(_) => form.parse_errors.add("price", "Price must be a number"),
                }
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

/// Write images to storage under fresh names and return their storage keys.
///
/// If any write fails, the files already written by this call are removed.
pub async fn store_images(
    storage: &Arc<dyn Storage>,
    images: Vec<UploadedImage>,
) -> Result<Vec<String>, AppError> {
    let mut keys = Vec::with_capacity(images.len());

    for image in images {
        let filename = generate_filename(&image.original_name);
        match storage
            .upload(&filename, &image.content_type, image.data.to_vec())
            .await
        {
            Ok((key, _url)) => {
                tracing::debug!(
                    storage_key = %key,
                    original_name = %image.original_name,
                    "Stored product image"
                );
                keys.push(key);
            }
            Err(e) => {
                tracing::error!(error = %e, filename = %filename, "Failed to store product image");
                for key in &keys {
                    if let Err(cleanup) = storage.delete(key).await {
                        tracing::warn!(
                            error = %cleanup,
                            storage_key = %key,
                            "Failed to remove partially uploaded image"
                        );
                    }
                }
                return Err(storage_error(e));
            }
        }
    }

    Ok(keys)
}
