//! `tablift` - Reconstruct tables from positioned document text
//!
//! # Features
//!
//! - **Row grouping**: tokens on the same visual line, within a quantized
//!   vertical bucket, become one row ordered left to right
//! - **Table segmentation**: vertical gaps and column-count changes split the
//!   row stream into separate tables
//! - **Token sources**: JSON token dumps, PDF via pdfium (`pdf` feature)
//! - **Sinks**: markdown, CSV (one file per table), JSON
//!
//! # Example
//!
//! ```rust
//! use tablift::{ExtractOutcome, Extractor, SinkFormat};
//!
//! let doc = br#"[[
//!     {"text": "Item", "x": 50, "y": 700}, {"text": "Qty", "x": 200, "y": 700},
//!     {"text": "Bolt", "x": 50, "y": 688}, {"text": "12", "x": 200, "y": 688}
//! ]]"#;
//!
//! let (outcome, _report) = Extractor::default().extract("doc.json", doc)?;
//! let ExtractOutcome::Tables(tables) = outcome else {
//!     panic!("expected a table");
//! };
//! let artifacts = SinkFormat::Markdown.sink().render(&tables)?;
//! assert!(String::from_utf8_lossy(&artifacts[0].bytes).contains("| Bolt | 12 |"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod extract;
pub mod sink;
pub mod source;
pub mod table;

pub use config::{ConfigError, ExtractConfig, GapMode, Thresholds};
pub use extract::{ExtractError, ExtractOutcome, ExtractReport, Extractor};
pub use sink::{Artifact, SinkError, SinkFormat, TableSink};
pub use source::{SourceError, SourceRouter, TokenSource};
pub use table::{detect_tables, Row, Table, TableSet, Token};

/// Version of tablift
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
