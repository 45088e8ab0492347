//! Kitab catalog domain types and logic for Rosba Store.
//!
//! This crate provides the in-memory side of the storefront:
//!
//! - **Catalog**: Products, the fixed kitab category set, seed data
//! - **Store**: The owned catalog list with its filter/search selection
//! - **Search**: Category filter and case-insensitive name search
//!
//! # Example
//!
//! ```rust
//! use rosba_catalog::prelude::*;
//!
//! let mut store = CatalogStore::with_seed();
//! store.set_filter(CategoryFilter::Only(Category::Fiqh));
//! store.set_search_term("qorib");
//!
//! assert_eq!(store.visible_products().len(), 1);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod search;

pub use error::CatalogError;
pub use ids::*;
pub use money::Rupiah;

pub use catalog::{CatalogStore, Category, Product, ProductCategory};
pub use search::{CategoryFilter, SearchView};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::money::Rupiah;

    // Catalog
    pub use crate::catalog::{CatalogStore, Category, Product, ProductCategory};

    // Search
    pub use crate::search::{CategoryFilter, SearchView};
}
