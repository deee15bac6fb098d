//! Table reconstruction from positioned text.
//!
//! # Pipeline
//!
//! ```text
//! pages of tokens → per-page row grouping → concatenated row stream → segmentation → TableSet
//! ```
//!
//! Everything in this module is pure and synchronous: no I/O, no shared
//! state. Each call owns its scan state, so concurrent extractions need no
//! coordination.
//!
//! # Example
//!
//! ```rust
//! use tablift::config::Thresholds;
//! use tablift::table::{detect_tables, Token};
//!
//! let page = vec![
//!     Token::new("Name", 10, 700),
//!     Token::new("Qty", 200, 700),
//!     Token::new("Bolt", 10, 686),
//!     Token::new("12", 200, 686),
//! ];
//! let tables = detect_tables(&[page], &Thresholds::default());
//! assert_eq!(tables.len(), 1);
//! assert_eq!(tables.tables[0].rows[1].cells, vec!["Bolt", "12"]);
//! ```

pub mod rows;
pub mod segment;
pub mod types;

use tracing::debug;

use crate::config::Thresholds;

pub use rows::{group_rows, row_key, MIN_ROW_CELLS};
pub use segment::{segment_rows, MIN_TABLE_ROWS};
pub use types::{Page, Row, Table, TableSet, Token};

/// Group every page into rows, in page order then top-to-bottom.
pub fn page_rows(pages: &[Page], thresholds: &Thresholds) -> Vec<Row> {
    pages
        .iter()
        .enumerate()
        .flat_map(|(index, tokens)| {
            let rows = group_rows(tokens, index, thresholds.row_bucket);
            debug!(
                page = index,
                tokens = tokens.len(),
                rows = rows.len(),
                "grouped page rows"
            );
            rows
        })
        .collect()
}

/// Detect tables across all pages.
///
/// Zero pages or zero tokens give an empty [`TableSet`]; that is a normal
/// outcome, not an error.
pub fn detect_tables(pages: &[Page], thresholds: &Thresholds) -> TableSet {
    tables_from_rows(page_rows(pages, thresholds), thresholds)
}

/// Segment an ordered row stream and log every detected table.
pub fn tables_from_rows(rows: Vec<Row>, thresholds: &Thresholds) -> TableSet {
    let tables = segment_rows(rows, thresholds);
    for (label, table) in tables.labeled() {
        debug!(
            page = table.first_page(),
            rows = table.rows.len(),
            columns = table.column_count(),
            "detected {label}"
        );
    }
    tables
}
