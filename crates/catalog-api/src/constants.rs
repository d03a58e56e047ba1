//! API constants
//!
//! Route prefixes shared by the router, the OpenAPI document and the tests.

/// Product collection path
pub const PRODUCTS_PATH: &str = "/api/products";

/// URL prefix static images are served under (matches the storage key prefix)
pub const UPLOADS_PATH: &str = "/uploads";

/// Extra request body allowance on top of the image payload for text fields and
/// multipart framing.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
