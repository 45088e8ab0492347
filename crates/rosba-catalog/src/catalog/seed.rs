//! Seed data loaded at startup.

use std::path::Path;

use crate::catalog::{Category, Product};
use crate::error::CatalogError;
use crate::money::Rupiah;

const SAMPLE_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1544716278-ca5e3f4abd8c?q=80&w=800&auto=format&fit=crop";

/// The built-in starting catalog.
pub fn initial_products() -> Vec<Product> {
    vec![Product::new("sample-1", "Kitab Fathul Qorib (Contoh)", Category::Fiqh)
        .with_description(
            "Ini adalah contoh produk. Silakan gunakan fitur Upload Massal untuk \
             menambahkan kitab Anda sendiri secara otomatis.",
        )
        .with_prices(Rupiah::new(45000), Rupiah::new(38000))
        .with_min_wholesale(10)
        .with_image(SAMPLE_IMAGE_URL)
        .with_rating(5.0)]
}

/// Load seed products from a JSON array file.
///
/// Every record is validated; ids must be unique within the file.
pub fn load_products_file(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let products: Vec<Product> = serde_json::from_str(&content)?;

    // Reuse the store's uniqueness and validation checks.
    let store = crate::catalog::CatalogStore::from_products(products)?;
    tracing::debug!(path = %path.display(), count = store.len(), "loaded seed file");
    Ok(store.into_products())
}
