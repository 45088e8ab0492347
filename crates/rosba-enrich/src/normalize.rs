//! Partial analysis result -> fully populated product.
//!
//! A field counts as absent when it is missing, an empty or blank string, or a
//! number that is zero, negative, or not finite. Absent fields take the
//! defaults below.

use rosba_catalog::{Product, ProductCategory, ProductId, Rupiah};

use crate::analyzer::AnalysisResult;

pub const DEFAULT_NAME: &str = "Kitab Baru";
pub const DEFAULT_CATEGORY: &str = "Lainnya";
pub const DEFAULT_DESCRIPTION: &str = "Deskripsi otomatis berdasarkan foto.";
pub const DEFAULT_PRICE: Rupiah = Rupiah::new(45000);
pub const DEFAULT_WHOLESALE_PRICE: Rupiah = Rupiah::new(36000);
pub const DEFAULT_MIN_WHOLESALE: u32 = 10;
pub const DEFAULT_RATING: f64 = 5.0;

/// Build a catalog record from an analyzer result.
pub fn normalize(result: AnalysisResult, id: ProductId, image: String) -> Product {
    let name = text_or(result.name, DEFAULT_NAME);
    let category = ProductCategory::from(text_or(result.category, DEFAULT_CATEGORY));
    let description = text_or(result.description, DEFAULT_DESCRIPTION);
    let price = amount_or(result.price, DEFAULT_PRICE);
    let wholesale_price = amount_or(result.wholesale_price, DEFAULT_WHOLESALE_PRICE);

    Product::new(id, name, category)
        .with_description(description)
        .with_prices(price, wholesale_price)
        .with_min_wholesale(DEFAULT_MIN_WHOLESALE)
        .with_image(image)
        .with_rating(DEFAULT_RATING)
}

fn text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => default.to_string(),
    }
}

fn amount_or(value: Option<f64>, default: Rupiah) -> Rupiah {
    value
        .and_then(Rupiah::from_decimal)
        .filter(|amount| !amount.is_zero())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosba_catalog::catalog::Category;

    fn id() -> ProductId {
        ProductId::for_batch(1_718_000_000_000, 0)
    }

    #[test]
    fn test_full_result_is_kept() {
        let result = AnalysisResult {
            name: Some("Tafsir Jalalain".to_string()),
            category: Some("Tafsir".to_string()),
            description: Some("Dua jilid, kertas kuning".to_string()),
            price: Some(90000.0),
            wholesale_price: Some(72000.0),
        };
        let p = normalize(result, id(), "data:image/jpeg;base64,AA==".to_string());

        assert_eq!(p.id.as_str(), "1718000000000-0");
        assert_eq!(p.name, "Tafsir Jalalain");
        assert!(p.category.is(Category::Tafsir));
        assert_eq!(p.price, Rupiah::new(90000));
        assert_eq!(p.wholesale_price, Rupiah::new(72000));
        assert_eq!(p.min_wholesale, DEFAULT_MIN_WHOLESALE);
        assert_eq!(p.rating, DEFAULT_RATING);
        assert_eq!(p.image, "data:image/jpeg;base64,AA==");
    }

    #[test]
    fn test_missing_price_uses_default() {
        let result = AnalysisResult {
            name: Some("Safinatun Najah".to_string()),
            ..Default::default()
        };
        let p = normalize(result, id(), String::new());
        assert_eq!(p.price, Rupiah::new(45000));
        assert_eq!(p.wholesale_price, Rupiah::new(36000));
    }

    #[test]
    fn test_empty_result_uses_every_default() {
        let p = normalize(AnalysisResult::default(), id(), String::new());
        assert_eq!(p.name, DEFAULT_NAME);
        assert_eq!(p.category, ProductCategory::Unlisted(DEFAULT_CATEGORY.to_string()));
        assert_eq!(p.description, DEFAULT_DESCRIPTION);
        assert_eq!(p.price, DEFAULT_PRICE);
        assert_eq!(p.wholesale_price, DEFAULT_WHOLESALE_PRICE);
    }

    #[test]
    fn test_falsy_values_use_defaults() {
        let result = AnalysisResult {
            name: Some("   ".to_string()),
            category: Some(String::new()),
            description: None,
            price: Some(0.0),
            wholesale_price: Some(-1.0),
        };
        let p = normalize(result, id(), String::new());
        assert_eq!(p.name, DEFAULT_NAME);
        assert_eq!(p.category.label(), DEFAULT_CATEGORY);
        assert_eq!(p.price, DEFAULT_PRICE);
        assert_eq!(p.wholesale_price, DEFAULT_WHOLESALE_PRICE);
    }

    #[test]
    fn test_signed_price_string_uses_default() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"price":"-500","wholesalePrice":"37500.50"}"#).unwrap();
        let p = normalize(result, id(), String::new());
        assert_eq!(p.price, DEFAULT_PRICE);
        assert_eq!(p.price.display(), "Rp 45.000");
        assert_eq!(p.wholesale_price, Rupiah::new(37501));
    }

    #[test]
    fn test_grouped_price_string_is_kept() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"price":"Rp 45.000","wholesalePrice":"Rp 38.500"}"#).unwrap();
        let p = normalize(result, id(), String::new());
        assert_eq!(p.price, Rupiah::new(45000));
        assert_eq!(p.wholesale_price, Rupiah::new(38500));
    }

    #[test]
    fn test_unlisted_category_is_kept_verbatim() {
        let result = AnalysisResult {
            category: Some("Adab".to_string()),
            ..Default::default()
        };
        let p = normalize(result, id(), String::new());
        assert_eq!(p.category, ProductCategory::Unlisted("Adab".to_string()));
    }
}
