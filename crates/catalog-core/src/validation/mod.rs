//! Validation modules

pub mod product;

pub use product::{
    normalize_image_path, validate_metadata, validate_product, IMAGES_FIELD, IMAGE_REQUIRED,
};
