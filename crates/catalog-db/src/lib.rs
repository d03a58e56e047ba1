//! Catalog DB Library
//!
//! Product persistence: the `ProductStore` trait, a PostgreSQL repository and an
//! in-memory store for development and tests.

pub mod factory;
pub mod memory;
pub mod product;
pub mod store;

pub use factory::create_product_store;
pub use memory::InMemoryProductStore;
pub use product::ProductRepository;
pub use store::{parse_product_id, ProductStore, ProductUpdate};
