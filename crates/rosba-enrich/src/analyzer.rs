//! The image analyzer contract.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AnalyzeError;
use crate::image::EncodedImage;

/// Product fields inferred from a photo.
///
/// Every field is optional: analyzers give no guarantee about which fields
/// come back. See [`crate::normalize`] for how gaps are filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wholesale_price: Option<f64>,
}

/// Accept numbers, numeric strings ("45000", "Rp 45.000") and null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => parse_amount(&s),
        _ => None,
    })
}

/// Parse a price written as text.
///
/// Accepts an optional `Rp` prefix, plain digits, id-ID thousands grouping
/// (`45.000`, `1.250.000`) with an optional `,` fraction, or a single `.`
/// decimal point (`37500.50`). Anything else, including a sign, is `None`.
pub(crate) fn parse_amount(text: &str) -> Option<f64> {
    let mut s = text.trim();
    if s.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("rp")) {
        s = s[2..].trim_start_matches('.').trim_start();
    }
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let (whole, fraction) = match s.split_once(',') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    let integer: String = if is_thousands_grouped(whole) {
        whole.replace('.', "")
    } else if fraction.is_none() && whole.matches('.').count() == 1 {
        // A lone decimal point with a fraction that is not a 3-digit group.
        return whole.parse::<f64>().ok().filter(|_| !whole.starts_with('.') && !whole.ends_with('.'));
    } else if whole.contains('.') || whole.is_empty() {
        return None;
    } else {
        whole.to_string()
    };

    let number = match fraction {
        Some(fraction) => format!("{}.{}", integer, fraction),
        None => integer,
    };
    number.parse::<f64>().ok()
}

/// `45.000`, `1.250.000`: a 1-3 digit head followed by 3-digit groups.
fn is_thousands_grouped(whole: &str) -> bool {
    let mut groups = whole.split('.');
    let head_ok = groups
        .next()
        .is_some_and(|head| (1..=3).contains(&head.len()));
    whole.contains('.') && head_ok && groups.all(|group| group.len() == 3)
}

/// Infers product attributes from a single photo.
///
/// One call per image. Implementations must not retry on their own behalf;
/// a failed call simply yields no record for that file.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze one encoded image.
    async fn analyze(&self, image: &EncodedImage) -> Result<AnalysisResult, AnalyzeError>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "analyzer"
    }
}

#[async_trait]
impl<T: Analyzer + ?Sized> Analyzer for Box<T> {
    async fn analyze(&self, image: &EncodedImage) -> Result<AnalysisResult, AnalyzeError> {
        (**self).analyze(image).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
