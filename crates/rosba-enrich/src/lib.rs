//! Photo-to-product batch enrichment.
//!
//! This crate provides:
//! - `EnrichmentPipeline` - Sequential upload batches folded into a `CatalogStore`
//! - `Analyzer` - The image analyzer contract
//! - `GeminiAnalyzer` - Analyzer backed by the Gemini REST API
//! - `normalize` - Partial analyzer output -> complete product record
//! - `ProgressObserver` - Per-file progress events

mod analyzer;
mod error;
pub mod gemini;
mod image;
pub mod normalize;
mod pipeline;
mod progress;

pub use analyzer::*;
pub use error::*;
pub use gemini::{GeminiAnalyzer, GeminiConfig};
pub use image::*;
pub use normalize::normalize;
pub use pipeline::*;
pub use progress::*;
