//! Rupiah amounts.
//!
//! Prices are whole rupiah. The currency has no minor unit in practice, so the
//! amount is a plain non-negative integer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative amount of Indonesian rupiah.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Rupiah(u64);

impl Rupiah {
    /// Currency symbol used in displays.
    pub const SYMBOL: &'static str = "Rp";

    /// Create an amount from whole rupiah.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Create an amount from a decimal number, rounding to the nearest rupiah.
    ///
    /// Returns `None` for negative, NaN or infinite input.
    ///
    /// ```
    /// use rosba_catalog::money::Rupiah;
    /// assert_eq!(Rupiah::from_decimal(45000.4), Some(Rupiah::new(45000)));
    /// assert_eq!(Rupiah::from_decimal(-1.0), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        Some(Self(amount.round() as u64))
    }

    /// Get the amount in whole rupiah.
    pub fn amount(&self) -> u64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Format with id-ID digit grouping and symbol (e.g., "Rp 45.000").
    pub fn display(&self) -> String {
        format!("{} {}", Self::SYMBOL, self.display_amount())
    }

    /// Format with id-ID digit grouping only (e.g., "45.000").
    pub fn display_amount(&self) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        grouped
    }
}

impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
