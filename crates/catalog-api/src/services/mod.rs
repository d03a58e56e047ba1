//! Domain services used by the HTTP handlers.

pub mod product_lifecycle;

pub use product_lifecycle::ProductLifecycleService;
