//! Product field validation
//!
//! Runs before any persistence call and reports every failing field at once.

use rust_decimal::Decimal;

use crate::error::FieldErrors;
use crate::models::{Category, NewProduct, ProductFields};

pub const NAME_REQUIRED: &str = "Product name is required";
pub const PRICE_REQUIRED: &str = "Price is required";
pub const PRICE_NEGATIVE: &str = "Price must be a positive number";
pub const CATEGORY_REQUIRED: &str = "Category is required";
pub const CATEGORY_INVALID: &str = "Invalid category";
pub const IMAGE_REQUIRED: &str = "Product image is required";

/// Field name used for image errors, matching the multipart field name.
pub const IMAGES_FIELD: &str = "images";

/// Convert a stored path to forward slashes without leading separators.
pub fn normalize_image_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

struct Checked {
    name: String,
    description: Option<String>,
    price: Decimal,
    category: Category,
}

fn check_metadata(fields: &ProductFields, errors: &mut FieldErrors) -> Option<Checked> {
    let name = fields
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    if name.is_none() {
        errors.add("name", NAME_REQUIRED);
    }

    let price = match fields.price {
        None => {
            errors.add("price", PRICE_REQUIRED);
            None
        }
        Some(p) if p.is_sign_negative() && !p.is_zero() => {
            errors.add("price", PRICE_NEGATIVE);
            None
        }
        Some(p) => Some(p),
    };

    let category = match fields.category.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add("category", CATEGORY_REQUIRED);
            None
        }
        Some(raw) => match raw.parse::<Category>() {
            Ok(c) => Some(c),
            Err(_) => {
                errors.add("category", CATEGORY_INVALID);
                None
            }
        },
    };

    let description = fields.description.as_deref().map(|d| d.trim().to_string());

    Some(Checked {
        name: name?,
        description,
        price: price?,
        category: category?,
    })
}

/// Validate metadata fields only, leaving the image rule to the caller.
pub fn validate_metadata(fields: &ProductFields) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_metadata(fields, &mut errors);
    errors.into_result()
}

/// Validate a full field set and produce the normalized record to persist.
pub fn validate_product(fields: &ProductFields) -> Result<NewProduct, FieldErrors> {
    let mut errors = FieldErrors::new();
    let checked = check_metadata(fields, &mut errors);

    let image_paths: Vec<String> = fields
        .image_paths
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|p| normalize_image_path(p))
        .filter(|p| !p.is_empty())
        .collect();
    if image_paths.is_empty() {
        errors.add(IMAGES_FIELD, IMAGE_REQUIRED);
    }

    match checked {
        Some(c) if errors.is_empty() => Ok(NewProduct {
            name: c.name,
            description: c.description,
            price: c.price,
            category: c.category,
            image_paths,
        }),
        _ => Err(errors),
    }
}
