//! Token sources: turn document bytes into pages of positioned tokens.
//!
//! Each source implements [`TokenSource`]. The [`SourceRouter`] picks one by
//! file extension, then by sniffing the leading bytes.
//!
//! # Supported Inputs
//!
//! | Input | Source | Feature Flag |
//! |-------|--------|-------------|
//! | `.json` token dumps | [`JsonSource`] | always |
//! | `.pdf` | [`PdfSource`] | `pdf` |
//!
//! Sources own all validation. Tokens that reach the table pipeline are
//! well-formed: trimmed text, integer coordinates.

pub mod json;
#[cfg(feature = "pdf")]
pub mod pdf;

use std::path::Path;

use thiserror::Error;

use crate::table::Page;

pub use json::{dump_tokens, JsonSource};
#[cfg(feature = "pdf")]
pub use pdf::PdfSource;

/// Largest coordinate magnitude a source accepts, in document units.
pub const MAX_COORDINATE: f64 = 1e15;

/// Round a raw coordinate to integer document units.
///
/// Returns `None` for values that are not finite or exceed [`MAX_COORDINATE`].
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_coordinate(value: f64) -> Option<i64> {
    (value.is_finite() && value.abs() <= MAX_COORDINATE).then(|| value.round() as i64)
}

/// Token source errors
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("malformed token {index} on page {page}: {reason}")]
    MalformedToken {
        page: usize,
        index: usize,
        reason: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("unsupported input: {0}")]
    Unsupported(String),
}

/// Produces positioned tokens, one collection per page, from raw bytes.
///
/// Implementations are stateless and synchronous. Callers run them inside
/// `tokio::task::spawn_blocking` (PDF parsing goes through pdfium FFI).
pub trait TokenSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Lower-case file extensions this source handles (without the dot).
    fn extensions(&self) -> &[&str];

    /// Whether `bytes` look like this source's format.
    fn sniff(&self, bytes: &[u8]) -> bool;

    /// Parse `bytes` into pages, in document order.
    fn load(&self, bytes: &[u8]) -> Result<Vec<Page>, SourceError>;
}

/// Routes input bytes to the appropriate [`TokenSource`].
///
/// Dispatch is O(n) over registered sources.
pub struct SourceRouter {
    sources: Vec<Box<dyn TokenSource>>,
}

impl SourceRouter {
    /// Create a router with all available sources.
    ///
    /// The PDF source is included only when the `pdf` feature flag is enabled.
    pub fn new() -> Self {
        #[cfg(feature = "pdf")]
        let sources: Vec<Box<dyn TokenSource>> =
            vec![Box::new(pdf::PdfSource::new()), Box::new(JsonSource)];

        #[cfg(not(feature = "pdf"))]
        let sources: Vec<Box<dyn TokenSource>> = vec![Box::new(JsonSource)];

        Self { sources }
    }

    /// Build a router from an explicit source list.
    pub fn with_sources(sources: Vec<Box<dyn TokenSource>>) -> Self {
        Self { sources }
    }

    /// Find the source for `name` (a file name or path) and `bytes`.
    pub fn route(&self, name: &str, bytes: &[u8]) -> Result<&dyn TokenSource, SourceError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        if let Some(ext) = ext.as_deref() {
            if let Some(source) = self
                .sources
                .iter()
                .find(|s| s.extensions().contains(&ext))
            {
                return Ok(source.as_ref());
            }
        }

        // Fallback: missing or unknown extension
        self.sources
            .iter()
            .find(|s| s.sniff(bytes))
            .map(|s| s.as_ref())
            .ok_or_else(|| {
                SourceError::Unsupported(format!(
                    "{name}: no token source for this input (known: {})",
                    self.known_extensions().join(", ")
                ))
            })
    }

    /// Route and load in one step.
    pub fn load(&self, name: &str, bytes: &[u8]) -> Result<Vec<Page>, SourceError> {
        let source = self.route(name, bytes)?;
        tracing::debug!("Loading {name} with {} source", source.name());
        source.load(bytes)
    }

    fn known_extensions(&self) -> Vec<&str> {
        self.sources
            .iter()
            .flat_map(|s| s.extensions().iter().copied())
            .collect()
    }
}

impl Default for SourceRouter {
    fn default() -> Self {
        Self::new()
    }
}
