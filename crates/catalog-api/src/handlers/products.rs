//! Product handlers
//!
//! CRUD over products. Create and update take `multipart/form-data` with the text
//! fields `name`, `description`, `price`, `category` and up to the configured number
//! of `images` files.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use catalog_core::models::{Category, ProductResponse};
use catalog_core::validation::{validate_metadata, IMAGES_FIELD, IMAGE_REQUIRED};
use catalog_core::AppError;
use catalog_db::parse_product_id;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError, MessageResponse};
use crate::state::AppState;
use crate::utils::upload::{read_product_form, store_images};

/// Multipart body accepted by create and update (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProductMultipartForm {
    name: Option<String>,
    description: Option<String>,
    #[schema(value_type = Option<f64>)]
    price: Option<String>,
    category: Option<Category>,
    #[schema(value_type = Vec<String>, format = Binary)]
    images: Vec<Vec<u8>>,
}

/// List all products, newest first
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "products"
)]
#[tracing::instrument(skip(state))]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let products = state.lifecycle.list().await?;

    let responses: Vec<ProductResponse> = products
        .into_iter()
        .map(|p| ProductResponse::from_product(p, &state.upload.base_url))
        .collect();
    Ok(Json(responses))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 400, description = "Malformed product id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "products"
)]
#[tracing::instrument(skip(state))]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let product = state.lifecycle.get(&id).await?;
    Ok(Json(ProductResponse::from_product(
        product,
        &state.upload.base_url,
    )))
}

/// Create a product with one or more images
#[utoipa::path(
    post,
    path = "/api/products",
    request_body(content = ProductMultipartForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 413, description = "Image too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "products"
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = read_product_form(multipart, &state.upload).await?;

    // Reject invalid metadata before any file is written.
    let mut errors = form.parse_errors;
    if let Err(metadata_errors) = validate_metadata(&form.fields) {
        errors.extend(metadata_errors);
    }
    if !errors.is_empty() {
        if form.images.is_empty() {
            errors.add(IMAGES_FIELD, IMAGE_REQUIRED);
        }
        return Err(AppError::Validation(errors).into());
    }

    let image_paths = store_images(&state.storage, form.images).await?;
    let product = state.lifecycle.create(form.fields, image_paths).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::from_product(
            product,
            &state.upload.base_url,
        )),
    ))
}

/// Update a product. Sending images replaces the whole image set.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body(content = ProductMultipartForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation failed or malformed id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 413, description = "Image too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "products"
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    parse_product_id(&id)?;

    let form = read_product_form(multipart, &state.upload).await?;
    if !form.parse_errors.is_empty() {
        return Err(AppError::Validation(form.parse_errors).into());
    }

    let new_image_paths = store_images(&state.storage, form.images).await?;
    let product = state
        .lifecycle
        .update(&id, form.fields, new_image_paths)
        .await?;

    Ok(Json(ProductResponse::from_product(
        product,
        &state.upload.base_url,
    )))
}

/// Delete a product and its images
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Malformed product id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "products"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.lifecycle.delete(&id).await?;

    Ok(Json(MessageResponse {
        message: "Product deleted".to_string(),
    }))
}
