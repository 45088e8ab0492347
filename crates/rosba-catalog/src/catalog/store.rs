//! The catalog store.

use crate::catalog::{seed, Product};
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::search::{CategoryFilter, SearchView};
use std::collections::HashSet;

/// Owns the ordered product list and the current filter/search selection.
///
/// There is exactly one writer at a time: the store is passed by `&mut` to
/// whichever component changes it (the filter controls or the upload
/// pipeline). The visible list is derived on every call to
/// [`CatalogStore::visible_products`].
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    view: SearchView,
}

impl CatalogStore {
    /// Create an empty store with the default view (all categories, no search).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in seed products.
    pub fn with_seed() -> Self {
        Self {
            products: seed::initial_products(),
            view: SearchView::default(),
        }
    }

    /// Create a store from existing records, checking that ids are unique.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        {
            let mut seen = HashSet::with_capacity(products.len());
            for p in &products {
                p.validate()?;
                if !seen.insert(p.id.as_str()) {
                    return Err(CatalogError::DuplicateProductId(p.id.to_string()));
                }
            }
        }
        Ok(Self {
            products,
            view: SearchView::default(),
        })
    }

    /// Replace the active category filter.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.view.filter = filter;
    }

    /// Replace the active search term.
    ///
    /// Returns `true` when the term is non-empty, which is the cue for the
    /// presentation layer to bring the catalog into view.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        self.view.term = term.into();
        !self.view.term.is_empty()
    }

    /// Insert `records` at the head of the list, keeping their relative order.
    ///
    /// Records whose id is already in the store are dropped so ids stay
    /// unique. Returns the number of records inserted.
    pub fn prepend_products(&mut self, records: Vec<Product>) -> usize {
        let existing: HashSet<&str> = self.products.iter().map(|p| p.id.as_str()).collect();
        let mut batch_ids = HashSet::with_capacity(records.len());
        let mut fresh = Vec::with_capacity(records.len());
        for record in records {
            if existing.contains(record.id.as_str()) || !batch_ids.insert(record.id.clone()) {
                tracing::warn!(id = %record.id, "dropping record with duplicate id");
                continue;
            }
            fresh.push(record);
        }
        drop(existing);

        let inserted = fresh.len();
        fresh.append(&mut self.products);
        self.products = fresh;

        tracing::debug!(inserted, total = self.products.len(), "prepended products");
        inserted
    }

    /// The records that pass the current filter and search term, in list order.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.view.apply(&self.products)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Check whether a record with this id exists.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// All records, in list order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Consume the store, returning its records.
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    /// The active category filter.
    pub fn filter(&self) -> CategoryFilter {
        self.view.filter
    }

    /// The active search term.
    pub fn search_term(&self) -> &str {
        &self.view.term
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the store has no records.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
