//! The fixed kitab category set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A kitab discipline used to organize the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fiqh,
    Hadits,
    Tafsir,
    Aqidah,
    Nahwu,
    Shorof,
    Tasawuf,
    #[serde(rename = "Adab & Akhlaq")]
    Adab,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Category::Fiqh,
        Category::Hadits,
        Category::Tafsir,
        Category::Aqidah,
        Category::Nahwu,
        Category::Shorof,
        Category::Tasawuf,
        Category::Adab,
    ];

    /// Get the display label (e.g., "Adab & Akhlaq").
    pub fn label(&self) -> &'static str {
        match self {
            Category::Fiqh => "Fiqh",
            Category::Hadits => "Hadits",
            Category::Tafsir => "Tafsir",
            Category::Aqidah => "Aqidah",
            Category::Nahwu => "Nahwu",
            Category::Shorof => "Shorof",
            Category::Tasawuf => "Tasawuf",
            Category::Adab => "Adab & Akhlaq",
        }
    }

    /// Parse a display label. The match is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The category carried by a product record.
///
/// Seed records always use a known category. Records filled in from photo
/// analysis keep whatever label the analyzer produced; labels outside the
/// fixed set are kept verbatim as `Unlisted`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductCategory {
    Known(Category),
    Unlisted(String),
}

impl ProductCategory {
    /// Get the display label.
    pub fn label(&self) -> &str {
        match self {
            ProductCategory::Known(c) => c.label(),
            ProductCategory::Unlisted(s) => s,
        }
    }

    /// The known category, if this is one.
    pub fn known(&self) -> Option<Category> {
        match self {
            ProductCategory::Known(c) => Some(*c),
            ProductCategory::Unlisted(_) => None,
        }
    }

    /// Check whether this record category is the given known category.
    pub fn is(&self, category: Category) -> bool {
        self.known() == Some(category)
    }
}

impl From<Category> for ProductCategory {
    fn from(c: Category) -> Self {
        ProductCategory::Known(c)
    }
}

impl From<String> for ProductCategory {
    fn from(label: String) -> Self {
        match Category::from_label(&label) {
            Some(c) => ProductCategory::Known(c),
            None => ProductCategory::Unlisted(label),
        }
    }
}

impl From<&str> for ProductCategory {
    fn from(label: &str) -> Self {
        ProductCategory::from(label.to_string())
    }
}

impl From<ProductCategory> for String {
    fn from(c: ProductCategory) -> Self {
        match c {
            ProductCategory::Known(c) => c.label().to_string(),
            ProductCategory::Unlisted(s) => s,
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
