//! Category filter.

use crate::catalog::{Category, ProductCategory};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The active category selection.
///
/// `All` is the "Semua" sentinel. It only exists on the filter side and is
/// never stored on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    /// Match every record, including unlisted categories.
    #[default]
    All,
    /// Match records of exactly this category.
    Only(Category),
}

impl CategoryFilter {
    /// Label of the "all" sentinel.
    pub const ALL_LABEL: &'static str = "Semua";

    /// Every selectable filter value, in display order ("Semua" last).
    pub fn choices() -> Vec<CategoryFilter> {
        Category::ALL
            .into_iter()
            .map(CategoryFilter::Only)
            .chain(std::iter::once(CategoryFilter::All))
            .collect()
    }

    /// Get the display label.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => Self::ALL_LABEL,
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// Check whether a record category passes this filter.
    pub fn matches(&self, category: &ProductCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => category.is(*c),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    /// Parse a label, ignoring case ("semua", "fiqh", "adab & akhlaq").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case(Self::ALL_LABEL) || wanted.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .map(CategoryFilter::Only)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

impl From<Category> for CategoryFilter {
    fn from(c: Category) -> Self {
        CategoryFilter::Only(c)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
