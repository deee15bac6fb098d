//! PDF token source.
//!
//! Uses `pdfium-render` (Chromium's PDF library) to extract text segments
//! with their bounding rectangles. Each segment becomes one token positioned
//! at its left edge and baseline, in PDF points with the origin at the
//! bottom-left of the page.
//!
//! # Pipeline
//!
//! ```text
//! PDF bytes → pdfium text segments → trimmed text + rounded (left, bottom) → tokens per page
//! ```

use pdfium_render::prelude::*;

use super::{round_coordinate, SourceError, TokenSource};
use crate::table::{Page, Token};

/// Extracts positioned text segments from PDF documents.
pub struct PdfSource;

impl PdfSource {
    pub fn new() -> Self {
        Self
    }

    /// Round a PDF coordinate to the nearest point.
    fn round(value: f32, page: usize, index: usize) -> Result<i64, SourceError> {
        round_coordinate(f64::from(value)).ok_or_else(|| SourceError::MalformedToken {
            page,
            index,
            reason: format!("coordinate out of range ({value})"),
        })
    }

    #[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
    fn extract_pages(bytes: &[u8]) -> Result<Vec<Page>, SourceError> {
        let pdfium = Pdfium::default();
        let doc = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| SourceError::Pdf(format!("failed to parse PDF: {e}")))?;

        let mut pages = Vec::new();
        for (page_idx, page) in doc.pages().iter().enumerate() {
            let text = page.text().map_err(|e| {
                SourceError::Pdf(format!("failed to extract text from page {page_idx}: {e}"))
            })?;

            let tokens: Page = text
                .segments()
                .iter()
                .enumerate()
                .map(|(index, segment)| -> Result<Token, SourceError> {
                    let rect = segment.bounds();
                    Ok(Token {
                        text: segment.text().trim().to_string(),
                        x: Self::round(rect.left.value, page_idx, index)?,
                        y: Self::round(rect.bottom.value, page_idx, index)?,
                    })
                })
                .collect::<Result<_, _>>()?;

            tracing::debug!(page = page_idx, tokens = tokens.len(), "extracted page text");
            pages.push(tokens);
        }

        Ok(pages)
    }
}

impl Default for PdfSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for PdfSource {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn sniff(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(b"%PDF-")
    }

    fn load(&self, bytes: &[u8]) -> Result<Vec<Page>, SourceError> {
        let pages = Self::extract_pages(bytes)?;

        // Scanned PDFs (images without a text layer) produce no tokens at all.
        if !pages.is_empty() && pages.iter().all(Vec::is_empty) {
            tracing::warn!(
                "Scanned PDF ({} pages) -- no text layer detected",
                pages.len()
            );
        }

        Ok(pages)
    }
}
