//! Route configuration and setup.
//!
//! Product CRUD lives under `/api/products`, stored images are served read-only under
//! `/uploads`, and health checks sit at the root. See [health](health).

mod health;

use crate::constants::{PRODUCTS_PATH, UPLOADS_PATH};
use crate::handlers::products;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use catalog_core::Config;
use catalog_storage::UPLOADS_PREFIX;
use std::path::Path;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config.cors_origins())?;

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_HTTP_CONCURRENCY_LIMIT)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let uploads_dir = Path::new(config.local_storage_path()).join(UPLOADS_PREFIX);

    Ok(build_router(state, cors, &uploads_dir)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit)))
}

/// Assemble the router around an existing state.
///
/// `uploads_dir` is the directory whose files are served under `/uploads`; it must be
/// the directory the storage backend writes `uploads/` keys into.
pub fn build_router(state: Arc<AppState>, cors: CorsLayer, uploads_dir: &Path) -> Router<()> {
    let max_request_body = state.upload.max_request_body();

    Router::new()
        .merge(product_routes())
        .merge(health_routes())
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .nest_service(UPLOADS_PATH, ServeDir::new(uploads_dir))
        .layer(RequestBodyLimitLayer::new(max_request_body))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer. `*` allows any origin; otherwise every entry must be a
/// valid header value.
pub fn setup_cors(cors_origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn product_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            PRODUCTS_PATH,
            get(products::list_products).post(products::create_product),
        )
        .route(
            &format!("{}/{{id}}", PRODUCTS_PATH),
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
}
