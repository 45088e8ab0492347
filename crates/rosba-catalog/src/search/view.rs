//! Filter/search projection over the product list.

use crate::catalog::Product;
use crate::search::CategoryFilter;
use serde::{Deserialize, Serialize};

/// The current filter and search selection.
///
/// A view is never stored alongside its results. It is applied to the
/// product list on every read, so the output always reflects the latest list.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchView {
    /// Active category filter.
    pub filter: CategoryFilter,
    /// Search term, matched against product names as a case-insensitive substring.
    pub term: String,
}

impl SearchView {
    /// Create a view with the given selection.
    pub fn new(filter: CategoryFilter, term: impl Into<String>) -> Self {
        Self {
            filter,
            term: term.into(),
        }
    }

    /// Project `products` through the view, keeping list order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.term.to_lowercase();
        products
            .iter()
            .filter(|p| self.filter.matches(&p.category) && p.name_contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Fathul Qorib", Category::Fiqh),
            Product::new("2", "Bulughul Maram", Category::Hadits),
            Product::new("3", "Fathul Mu'in", Category::Fiqh),
            Product::new("4", "Qorib Lainnya", "Lainnya"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_default_view_returns_everything_in_order() {
        let products = catalog();
        let view = SearchView::default();
        assert_eq!(ids(&view.apply(&products)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_category_and_term_both_apply() {
        let products = catalog();
        let view = SearchView::new(CategoryFilter::Only(Category::Fiqh), "FATHUL");
        assert_eq!(ids(&view.apply(&products)), vec!["1", "3"]);

        let view = SearchView::new(CategoryFilter::Only(Category::Fiqh), "qorib");
        assert_eq!(ids(&view.apply(&products)), vec!["1"]);
    }

    #[test]
    fn test_unlisted_only_under_all() {
        let products = catalog();
        let view = SearchView::new(CategoryFilter::All, "qorib");
        assert_eq!(ids(&view.apply(&products)), vec!["1", "4"]);
    }

    #[test]
    fn test_empty_list() {
        let view = SearchView::default();
        assert!(view.apply(&[]).is_empty());
    }
}
