//! Product catalog module.
//!
//! Contains types for products and categories, the catalog store, and seed data.

mod category;
mod product;
pub mod seed;
mod store;

pub use category::{Category, ProductCategory};
pub use product::Product;
pub use store::CatalogStore;
