//! Catalog entities as exchanged with the REST API.
//!
//! Field names follow the API's camelCase JSON. Optional fields default to
//! `None` so list and detail responses (which embed different amounts of
//! data) deserialize into the same types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Price, ProductId};

/// An entity cached by a state slice, addressable by id.
pub trait Entity {
    /// The entity's id type.
    type Id: PartialEq + Clone + core::fmt::Debug;

    /// The entity's id.
    fn id(&self) -> &Self::Id;
}

// =============================================================================
// Categories
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

/// The denormalized category embedded in product responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category id.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    pub id: ProductId,
    /// URL slug, unique, derived server-side from the name.
    pub slug: String,
    /// Display name.
    #[serde(alias = "title")]
    pub name: String,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Embedded category (list and detail responses).
    #[serde(default)]
    pub category: Option<CategorySummary>,
    /// Bare category reference (responses without an embedded category).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// The id of the product's category, from the embedded summary if present.
    #[must_use]
    pub fn category_id(&self) -> Option<&CategoryId> {
        self.category
            .as_ref()
            .map(|c| &c.id)
            .or(self.category_id.as_ref())
    }

    /// The first image, used as the product thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    /// Display name (trimmed).
    pub name: String,
    /// Description (trimmed).
    pub description: String,
    /// Unit price, strictly positive.
    pub price: Price,
    /// Owning category.
    pub category_id: CategoryId,
    /// Non-empty list of image URLs.
    pub images: Vec<String>,
}

/// A reference to a single product: either its id or its slug.
///
/// `GET /products/:idOrSlug` accepts both, so this only decides how the
/// reference is shown and logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductRef {
    /// Reference by id.
    Id(ProductId),
    /// Reference by slug.
    Slug(String),
}

impl ProductRef {
    /// Interpret user input: all-digit strings are ids, anything else a slug.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
            Self::Id(ProductId::new(input))
        } else {
            Self::Slug(input.to_owned())
        }
    }

    /// The path segment used in `/products/{segment}`.
    #[must_use]
    pub fn as_path_segment(&self) -> &str {
        match self {
            Self::Id(id) => id.as_str(),
            Self::Slug(slug) => slug,
        }
    }
}

impl From<ProductId> for ProductRef {
    fn from(id: ProductId) -> Self {
        Self::Id(id)
    }
}

impl core::fmt::Display for ProductRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": 4,
        "slug": "classic-grey-hoodie",
        "name": "Classic Grey Hoodie",
        "description": "Soft fleece hoodie",
        "price": 48,
        "images": ["https://cdn.example.com/hoodie-1.jpg", "https://cdn.example.com/hoodie-2.jpg"],
        "category": { "id": 1, "name": "Clothes", "image": "https://cdn.example.com/clothes.jpg" },
        "createdAt": "2025-01-12T09:30:00.000Z",
        "updatedAt": "2025-01-13T10:00:00.000Z"
    }"#;

    #[test]
    fn test_product_deserializes_list_shape() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.id, ProductId::new("4"));
        assert_eq!(product.price, Price::from_cents(4800).unwrap());
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.category_id(), Some(&CategoryId::new("1")));
        assert_eq!(
            product.thumbnail(),
            Some("https://cdn.example.com/hoodie-1.jpg")
        );
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_product_accepts_title_alias_and_bare_category() {
        let json = r#"{"id": "p-1", "slug": "mug", "title": "Mug", "price": 9.5, "categoryId": 3}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Mug");
        assert!(product.category.is_none());
        assert_eq!(product.category_id(), Some(&CategoryId::new("3")));
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_category_optional_fields() {
        let category: Category = serde_json::from_str(r#"{"id": 2, "name": "Shoes"}"#).unwrap();
        assert_eq!(category.name, "Shoes");
        assert!(category.description.is_none());
        assert!(category.image.is_none());
        assert!(category.created_at.is_none());
    }

    #[test]
    fn test_product_input_serializes_camel_case() {
        let input = ProductInput {
            name: "Mug".to_string(),
            description: "Stoneware mug, 350ml".to_string(),
            price: "12.5".parse().unwrap(),
            category_id: CategoryId::new("3"),
            images: vec!["https://cdn.example.com/mug.jpg".to_string()],
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["categoryId"], "3");
        assert_eq!(value["price"], 12.5);
        assert_eq!(value["images"][0], "https://cdn.example.com/mug.jpg");
    }

    #[test]
    fn test_category_input_skips_missing_fields() {
        let input = CategoryInput {
            name: "Shoes".to_string(),
            description: None,
            image: None,
        };
        assert_eq!(
            serde_json::to_string(&input).unwrap(),
            r#"{"name":"Shoes"}"#
        );
    }

    #[test]
    fn test_product_ref_parse() {
        assert_eq!(ProductRef::parse("42"), ProductRef::Id(ProductId::new("42")));
        assert_eq!(
            ProductRef::parse(" classic-mug "),
            ProductRef::Slug("classic-mug".to_string())
        );
        assert_eq!(ProductRef::parse("42").as_path_segment(), "42");
    }
}
