//! Data models for the application
//!
//! Records as stored, partial field sets as received, and the response shape
//! that derives image URLs at the serialization boundary.

mod product;

pub use product::*;
