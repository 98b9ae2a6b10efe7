//! Form validation for catalog input.
//!
//! Forms hold raw user text. [`ProductForm::validate`] and
//! [`CategoryForm::validate`] check every field, collect all failures into
//! [`FormErrors`], and only produce a typed payload when nothing failed, so
//! an invalid form never reaches the network.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::catalog::{CategoryInput, Product, ProductInput};
use crate::types::{CategoryId, Price};

/// Minimum trimmed length of a product or category name.
pub const MIN_NAME_LENGTH: usize = 3;

/// Minimum trimmed length of a product description.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+\..+").expect("image URL pattern compiles"));

/// A form field that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// Product or category name.
    Name,
    /// Description text.
    Description,
    /// Product price.
    Price,
    /// Product category.
    Category,
    /// Product image list or category image.
    Images,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Description => write!(f, "description"),
            Self::Price => write!(f, "price"),
            Self::Category => write!(f, "category"),
            Self::Images => write!(f, "images"),
        }
    }
}

/// Validation failures keyed by field, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.summary())]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    /// Record a message for `field`, keeping the first one if already set.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn summary(&self) -> String {
        self.iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn is_image_url(url: &str) -> bool {
    IMAGE_URL.is_match(url)
}

// =============================================================================
// Product Form
// =============================================================================

/// Raw product form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Price as typed (e.g. `"19.99"`).
    pub price: String,
    /// Selected category id, empty when none is selected.
    pub category_id: String,
    /// Image URL fields; blank entries are ignored.
    pub images: Vec<String>,
}

impl ProductForm {
    /// Prefill a form from an existing product (the edit flow).
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount().normalize().to_string(),
            category_id: product
                .category_id()
                .map(ToString::to_string)
                .unwrap_or_default(),
            images: product.images.clone(),
        }
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] holding one message per failing field.
    pub fn validate(&self) -> Result<ProductInput, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, "Product name is required");
        } else if name.chars().count() < MIN_NAME_LENGTH {
            errors.insert(
                FormField::Name,
                format!("Product name must be at least {MIN_NAME_LENGTH} characters"),
            );
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(FormField::Description, "Description is required");
        } else if description.chars().count() < MIN_DESCRIPTION_LENGTH {
            errors.insert(
                FormField::Description,
                format!("Description must be at least {MIN_DESCRIPTION_LENGTH} characters"),
            );
        }

        let price = validate_price(&self.price).map_err(|msg| errors.insert(FormField::Price, msg));

        let category_id = self.category_id.trim();
        if category_id.is_empty() {
            errors.insert(FormField::Category, "Category is required");
        }

        let images: Vec<String> = self
            .images
            .iter()
            .map(|img| img.trim())
            .filter(|img| !img.is_empty())
            .map(str::to_owned)
            .collect();
        if images.is_empty() {
            errors.insert(FormField::Images, "At least one image URL is required");
        } else if !images.iter().all(|img| is_image_url(img)) {
            errors.insert(
                FormField::Images,
                "Please enter valid image URLs (must start with http:// or https://)",
            );
        }

        match price {
            Ok(price) if errors.is_empty() => Ok(ProductInput {
                name: name.to_owned(),
                description: description.to_owned(),
                price,
                category_id: CategoryId::new(category_id),
                images,
            }),
            _ => Err(errors),
        }
    }
}

fn validate_price(raw: &str) -> Result<Price, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price is required");
    }

    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| "Price must be a number")?;

    if amount <= Decimal::ZERO {
        return Err("Price must be greater than 0");
    }

    Price::new(amount).map_err(|_| "Price must be greater than 0")
}

// =============================================================================
// Category Form
// =============================================================================

/// Raw category form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    /// Category name.
    pub name: String,
    /// Optional description; blank means none.
    pub description: String,
    /// Optional image URL; blank means none.
    pub image: String,
}

impl CategoryForm {
    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] holding one message per failing field.
    pub fn validate(&self) -> Result<CategoryInput, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, "Category name is required");
        } else if name.chars().count() < MIN_NAME_LENGTH {
            errors.insert(
                FormField::Name,
                format!("Category name must be at least {MIN_NAME_LENGTH} characters"),
            );
        }

        let image = self.image.trim();
        if !image.is_empty() && !is_image_url(image) {
            errors.insert(
                FormField::Images,
                "Please enter a valid image URL (must start with http:// or https://)",
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let description = self.description.trim();
        Ok(CategoryInput {
            name: name.to_owned(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            image: (!image.is_empty()).then(|| image.to_owned()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Canvas Tote".to_string(),
            description: "Heavy canvas tote with inner pocket".to_string(),
            price: "24.50".to_string(),
            category_id: "3".to_string(),
            images: vec![
                "https://cdn.example.com/tote.jpg".to_string(),
                "   ".to_string(),
            ],
        }
    }

    #[test]
    fn test_valid_form_produces_trimmed_input() {
        let mut form = valid_form();
        form.name = "  Canvas Tote ".to_string();

        let input = form.validate().unwrap();
        assert_eq!(input.name, "Canvas Tote");
        assert_eq!(input.price.to_string(), "24.50");
        assert_eq!(input.category_id, CategoryId::new("3"));
        // Blank image rows are dropped
        assert_eq!(input.images, vec!["https://cdn.example.com/tote.jpg"]);
    }

    #[test]
    fn test_negative_price_fails_positive_rule() {
        let mut form = valid_form();
        form.price = "-5".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(FormField::Price),
            Some("Price must be greater than 0")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_price_rules() {
        let mut form = valid_form();

        form.price = String::new();
        assert_eq!(
            form.validate().unwrap_err().get(FormField::Price),
            Some("Price is required")
        );

        form.price = "abc".to_string();
        assert_eq!(
            form.validate().unwrap_err().get(FormField::Price),
            Some("Price must be a number")
        );

        form.price = "0".to_string();
        assert_eq!(
            form.validate().unwrap_err().get(FormField::Price),
            Some("Price must be greater than 0")
        );
    }

    #[test]
    fn test_name_and_description_lengths() {
        let mut form = valid_form();
        form.name = "ab".to_string();
        form.description = "too short".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(FormField::Name),
            Some("Product name must be at least 3 characters")
        );
        assert_eq!(
            errors.get(FormField::Description),
            Some("Description must be at least 10 characters")
        );
    }

    #[test]
    fn test_required_fields_collected_together() {
        let errors = ProductForm::default().validate().unwrap_err();
        assert_eq!(errors.get(FormField::Name), Some("Product name is required"));
        assert_eq!(
            errors.get(FormField::Description),
            Some("Description is required")
        );
        assert_eq!(errors.get(FormField::Price), Some("Price is required"));
        assert_eq!(errors.get(FormField::Category), Some("Category is required"));
        assert_eq!(
            errors.get(FormField::Images),
            Some("At least one image URL is required")
        );
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_image_url_format() {
        let mut form = valid_form();
        form.images = vec!["ftp://cdn.example.com/a.jpg".to_string()];
        assert!(form.validate().unwrap_err().get(FormField::Images).is_some());

        form.images = vec!["https://localhost".to_string()];
        assert!(form.validate().is_err());

        form.images = vec!["http://img.example.org/x.png".to_string()];
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_error_summary_lists_fields() {
        let mut form = valid_form();
        form.price = "-1".to_string();
        form.category_id = " ".to_string();

        let message = form.validate().unwrap_err().to_string();
        assert_eq!(
            message,
            "price: Price must be greater than 0; category: Category is required"
        );
    }

    #[test]
    fn test_category_form() {
        let form = CategoryForm {
            name: " Shoes ".to_string(),
            description: String::new(),
            image: "https://cdn.example.com/shoes.jpg".to_string(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.name, "Shoes");
        assert!(input.description.is_none());
        assert_eq!(
            input.image.as_deref(),
            Some("https://cdn.example.com/shoes.jpg")
        );

        let bad = CategoryForm {
            name: "S".to_string(),
            description: String::new(),
            image: "shoes.jpg".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.get(FormField::Name).is_some());
        assert!(errors.get(FormField::Images).is_some());
    }
}
