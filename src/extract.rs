//! One extraction request: document bytes in, tables (or "no tables") out.
//!
//! The [`Extractor`] wires a [`SourceRouter`] to the table pipeline. It holds
//! only immutable configuration, so one instance can serve any number of
//! concurrent requests.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Thresholds;
use crate::source::{SourceError, SourceRouter};
use crate::table::{page_rows, tables_from_rows, Page, TableSet};

/// Extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{name}: {source}")]
    Source {
        name: String,
        #[source]
        source: SourceError,
    },

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Counters for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractReport {
    pub pages: usize,
    pub tokens: usize,
    pub rows: usize,
    pub tables: usize,
    /// Wall time in milliseconds.
    pub elapsed_ms: f64,
}

/// Result of a successful request.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractOutcome {
    /// At least one table was found.
    Tables(TableSet),
    /// The document was processed but contained no qualifying table.
    NoTables,
}

impl ExtractOutcome {
    pub fn tables(&self) -> Option<&TableSet> {
        match self {
            Self::Tables(t) => Some(t),
            Self::NoTables => None,
        }
    }
}

impl From<TableSet> for ExtractOutcome {
    fn from(tables: TableSet) -> Self {
        if tables.is_empty() {
            Self::NoTables
        } else {
            Self::Tables(tables)
        }
    }
}

/// Runs token source → row grouping → segmentation for one document at a time.
pub struct Extractor {
    thresholds: Thresholds,
    router: SourceRouter,
}

impl Extractor {
    pub fn new(thresholds: Thresholds) -> Self {
        Self::with_router(thresholds, SourceRouter::new())
    }

    pub fn with_router(thresholds: Thresholds, router: SourceRouter) -> Self {
        Self { thresholds, router }
    }

    /// Parse `bytes` into pages of tokens.
    pub fn tokens(&self, name: &str, bytes: &[u8]) -> Result<Vec<Page>, ExtractError> {
        self.router
            .load(name, bytes)
            .map_err(|source| ExtractError::Source {
                name: name.to_string(),
                source,
            })
    }

    /// Process one document.
    ///
    /// A source failure fails the whole request; no partial tables are returned.
    pub fn extract(
        &self,
        name: &str,
        bytes: &[u8],
    ) -> Result<(ExtractOutcome, ExtractReport), ExtractError> {
        let start = Instant::now();

        let pages = self.tokens(name, bytes)?;
        let rows = page_rows(&pages, &self.thresholds);
        let row_count = rows.len();
        let tables = tables_from_rows(rows, &self.thresholds);

        let report = ExtractReport {
            pages: pages.len(),
            tokens: pages.iter().map(Vec::len).sum(),
            rows: row_count,
            tables: tables.len(),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        debug!(?report, "{name}: extraction finished");

        let outcome = ExtractOutcome::from(tables);
        if outcome == ExtractOutcome::NoTables {
            info!("{name}: no tables detected");
        }
        Ok((outcome, report))
    }

    /// Process one document on the blocking thread pool.
    ///
    /// PDF parsing goes through pdfium FFI and must not stall the runtime.
    pub async fn extract_blocking(
        self: Arc<Self>,
        name: String,
        bytes: Vec<u8>,
    ) -> Result<(ExtractOutcome, ExtractReport), ExtractError> {
        tokio::task::spawn_blocking(move || self.extract(&name, &bytes))
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))?
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
