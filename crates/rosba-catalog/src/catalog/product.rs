//! Product records.

use crate::catalog::ProductCategory;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::money::Rupiah;
use serde::{Deserialize, Serialize};

/// A kitab in the catalog.
///
/// Records are never mutated once they are in a store. The builder-style
/// `with_*` methods consume `self` and are meant for construction only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub name: String,
    /// Kitab category.
    pub category: ProductCategory,
    /// Free text shown in the detail view.
    pub description: String,
    /// Retail (eceran) price.
    pub price: Rupiah,
    /// Per-unit wholesale (grosir) price.
    pub wholesale_price: Rupiah,
    /// Minimum quantity for the wholesale price.
    pub min_wholesale: u32,
    /// Image URL or `data:` URL.
    pub image: String,
    /// Display rating.
    pub rating: f64,
    /// Optional discount, carried but not applied anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl Product {
    /// Create a product with empty description and image, zero prices,
    /// a minimum wholesale quantity of 1 and a rating of 5.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<ProductCategory>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: String::new(),
            price: Rupiah::default(),
            wholesale_price: Rupiah::default(),
            min_wholesale: 1,
            image: String::new(),
            rating: 5.0,
            discount: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set retail and wholesale prices.
    pub fn with_prices(mut self, price: Rupiah, wholesale_price: Rupiah) -> Self {
        self.price = price;
        self.wholesale_price = wholesale_price;
        self
    }

    /// Set the minimum wholesale quantity.
    pub fn with_min_wholesale(mut self, min_wholesale: u32) -> Self {
        self.min_wholesale = min_wholesale;
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the display rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Check whether the name contains `needle_lower`, ignoring case.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.name.to_lowercase().contains(needle_lower)
    }

    /// Check record-level invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.as_str().is_empty() {
            return Err(CatalogError::ValidationError(
                "product id must not be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::ValidationError(format!(
                "product {} has an empty name",
                self.id
            )));
        }
        if self.min_wholesale == 0 {
            return Err(CatalogError::ValidationError(format!(
                "product {} must have a positive minWholesale",
                self.id
            )));
        }
        if !self.rating.is_finite() || self.rating < 0.0 {
            return Err(CatalogError::ValidationError(format!(
                "product {} has an invalid rating",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn sample() -> Product {
        Product::new("sample-1", "Kitab Fathul Qorib", Category::Fiqh)
            .with_prices(Rupiah::new(45000), Rupiah::new(38000))
            .with_min_wholesale(10)
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let p = sample();
        assert!(p.name_contains("qorib"));
        assert!(p.name_contains(""));
        assert!(!p.name_contains("jurumiyah"));
    }

    #[test]
    fn test_serializes_with_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["wholesalePrice"], 38000);
        assert_eq!(json["minWholesale"], 10);
        assert_eq!(json["category"], "Fiqh");
        assert!(json.get("discount").is_none());
    }

    #[test]
    fn test_deserializes_camel_case_json() {
        let json = r#"{
            "id": "sample-2",
            "name": "Tafsir Jalalain",
            "category": "Tafsir",
            "description": "Dua jilid",
            "price": 90000,
            "wholesalePrice": 80000,
            "minWholesale": 5,
            "image": "https://example.com/jalalain.jpg",
            "rating": 4.5,
            "discount": 10
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert!(p.category.is(Category::Tafsir));
        assert_eq!(p.wholesale_price, Rupiah::new(80000));
        assert_eq!(p.discount, Some(10.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let p = Product::new("x", "  ", Category::Nahwu);
        assert!(p.validate().is_err());
    }
}
