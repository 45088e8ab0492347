//! Newtype IDs for catalog records.
//!
//! Product ids are plain strings on the wire (`"sample-1"`, `"1718000000000-0"`)
//! but a newtype keeps them from being mixed up with names or labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);

impl ProductId {
    /// Id for the `index`-th record of an upload batch stamped `batch_stamp_ms`.
    pub fn for_batch(batch_stamp_ms: i64, index: usize) -> Self {
        Self(format!("{}-{}", batch_stamp_ms, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("sample-1");
        assert_eq!(id.as_str(), "sample-1");
    }

    #[test]
    fn test_batch_id_format() {
        let id = ProductId::for_batch(1_718_000_000_000, 2);
        assert_eq!(id.as_str(), "1718000000000-2");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("sample-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sample-1\"");
    }

    #[test]
    fn test_id_equality() {
        let id1 = ProductId::new("same");
        let id2: ProductId = "same".into();
        let id3 = ProductId::new("different");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }
}
