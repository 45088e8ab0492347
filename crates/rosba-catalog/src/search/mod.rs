//! Catalog search module.
//!
//! Contains the category filter and the derived filter/search view.

mod filter;
mod view;

pub use filter::CategoryFilter;
pub use view::SearchView;
