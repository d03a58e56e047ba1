//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use catalog_core::models;

/// Returns the OpenAPI document for the product API.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog with image uploads. Products carry a name, optional description, price, category and one or more images. Images are served under /uploads/."
    ),
    paths(
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
    ),
    components(
        schemas(
            models::Category,
            models::ProductResponse,
            handlers::products::ProductMultipartForm,
            error::ErrorResponse,
            error::MessageResponse,
        )
    ),
    tags(
        (name = "products", description = "Product catalog management")
    )
)]
pub struct ApiDoc;
