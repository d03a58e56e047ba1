//! Catalog API Library
//!
//! HTTP handlers, upload handling and application setup for the product catalog.

mod api_doc;
pub mod constants;
mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::ProductLifecycleService;
pub use state::{AppState, UploadConfig};
