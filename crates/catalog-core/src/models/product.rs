use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Product category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "product_category", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Home,
    Books,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Books,
    ];
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Category::Electronics => write!(f, "electronics"),
            Category::Clothing => write!(f, "clothing"),
            Category::Home => write!(f, "home"),
            Category::Books => write!(f, "books"),
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electronics" => Ok(Category::Electronics),
            "clothing" => Ok(Category::Clothing),
            "home" => Ok(Category::Home),
            "books" => Ok(Category::Books),
            _ => Err(anyhow::anyhow!("Invalid category: {}", s)),
        }
    }
}

/// Persisted product record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Category,
    /// Storage keys, forward-slash separated (e.g. `uploads/<uuid>.png`)
    pub image_paths: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial field set used for inserts and partial updates.
///
/// Every field is optional; absent fields mean "not provided", never "clear".
/// `category` stays a raw string until validation so an unknown value can be
/// reported against the field instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image_paths: Option<Vec<String>>,
}

impl ProductFields {
    /// Fill every field not provided here from `existing`.
    pub fn merge_onto(&self, existing: &Product) -> ProductFields {
        ProductFields {
            name: self.name.clone().or_else(|| Some(existing.name.clone())),
            description: self
                .description
                .clone()
                .or_else(|| existing.description.clone()),
            price: self.price.or(Some(existing.price)),
            category: self
                .category
                .clone()
                .or_else(|| Some(existing.category.to_string())),
            image_paths: self
                .image_paths
                .clone()
                .or_else(|| Some(existing.image_paths.clone())),
        }
    }

    pub fn with_image_paths(mut self, image_paths: Vec<String>) -> Self {
        self.image_paths = Some(image_paths);
        self
    }
}

/// Validated, normalized full field set
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Category,
    pub image_paths: Vec<String>,
}

impl NewProduct {
    /// Materialize a record with a fresh identity.
    pub fn into_product(self, id: Uuid, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image_paths: self.image_paths,
            created_at,
        }
    }
}

/// Product as returned by the API. Raw storage paths are replaced by URLs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub category: Category,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductResponse {
    pub fn from_product(product: Product, base_url: &str) -> Self {
        let image_urls = product
            .image_paths
            .iter()
            .map(|path| image_url(base_url, path))
            .collect();

        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image_urls,
            created_at: product.created_at,
        }
    }
}

/// Public URL of a stored image: base URL (trailing `/` removed) joined with the
/// path (leading separators removed, backslashes turned into `/`).
pub fn image_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let normalized = path.replace('\\', "/");
    let relative = normalized.trim_start_matches('/');
    format!("{}/{}", base, relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Desk lamp".to_string(),
            description: Some("Warm light".to_string()),
            price: Decimal::new(2999, 2),
            category: Category::Home,
            image_paths: vec!["uploads/a.png".to_string(), "uploads/b.png".to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_image_url_joins_cleanly() {
        assert_eq!(
            image_url("http://localhost:5000/", "uploads/a.png"),
            "http://localhost:5000/uploads/a.png"
        );
        assert_eq!(
            image_url("https://cdn.example.com", "\\uploads\\b.jpg"),
            "https://cdn.example.com/uploads/b.jpg"
        );
        assert_eq!(
            image_url("https://cdn.example.com", "/uploads/c.gif"),
            "https://cdn.example.com/uploads/c.gif"
        );
    }

    #[test]
    fn test_category_round_trips_through_strings() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
        assert!("toys".parse::<Category>().is_err());
        assert!("Books".parse::<Category>().is_err());
    }

    #[test]
    fn test_merge_keeps_unprovided_fields() {
        let existing = sample();
        let patch = ProductFields {
            price: Some(Decimal::new(1999, 2)),
            ..Default::default()
        };

        let merged = patch.merge_onto(&existing);
        assert_eq!(merged.name.as_deref(), Some("Desk lamp"));
        assert_eq!(merged.description.as_deref(), Some("Warm light"));
        assert_eq!(merged.price, Some(Decimal::new(1999, 2)));
        assert_eq!(merged.category.as_deref(), Some("home"));
        assert_eq!(merged.image_paths, Some(existing.image_paths.clone()));
    }

    #[test]
    fn test_response_hides_paths_and_uses_camel_case() {
        let product = sample();
        let response = ProductResponse::from_product(product, "http://localhost:5000");
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("imagePaths").is_none());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "home");
        assert_eq!(
            json["imageUrls"],
            serde_json::json!([
                "http://localhost:5000/uploads/a.png",
                "http://localhost:5000/uploads/b.png"
            ])
        );
        assert_eq!(json["price"].as_f64(), Some(29.99));
    }
}
