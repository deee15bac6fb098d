//! Table sinks: render a [`TableSet`] into output artifacts.
//!
//! Every sink labels tables "Table 1", "Table 2", ... in encounter order and
//! refuses to render an empty set ([`SinkError::NoTables`]) rather than
//! producing an empty file.
//!
//! | Format | Sink | Artifacts |
//! |--------|------|-----------|
//! | `markdown` | [`MarkdownSink`] | `extracted_tables.md` |
//! | `csv` | [`CsvSink`] | `table_1.csv`, `table_2.csv`, ... |
//! | `json` | [`JsonSink`] | `extracted_tables.json` |

pub mod csv;
pub mod json;
pub mod markdown;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::table::TableSet;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;
pub use self::markdown::MarkdownSink;

/// Base name of single-file artifacts.
pub const ARTIFACT_STEM: &str = "extracted_tables";

/// Sink errors
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("no tables to render")]
    NoTables,

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One named unit of sink output (a file body and its file name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SinkFormat {
    #[default]
    Markdown,
    Csv,
    Json,
}

impl SinkFormat {
    /// The sink implementing this format.
    pub fn sink(self) -> Box<dyn TableSink> {
        match self {
            Self::Markdown => Box::new(MarkdownSink),
            Self::Csv => Box::new(CsvSink),
            Self::Json => Box::new(JsonSink),
        }
    }

    /// File extension of this format's artifacts (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for SinkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Markdown => "markdown",
            Self::Csv => "csv",
            Self::Json => "json",
        })
    }
}

impl FromStr for SinkFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

/// Serializes a [`TableSet`].
///
/// Implementations are stateless; the caller decides where artifacts go.
pub trait TableSink: Send + Sync {
    fn format(&self) -> SinkFormat;

    /// File extension of the artifacts this sink produces.
    fn extension(&self) -> &'static str {
        self.format().extension()
    }

    /// Render all tables. Must fail with [`SinkError::NoTables`] on an empty set.
    fn render(&self, tables: &TableSet) -> Result<Vec<Artifact>, SinkError>;
}

/// Shared guard for the empty-set rule.
pub(crate) fn ensure_tables(tables: &TableSet) -> Result<(), SinkError> {
    if tables.is_empty() {
        Err(SinkError::NoTables)
    } else {
        Ok(())
    }
}
