//! Shared types for row grouping and table segmentation.
//!
//! Kept apart from the algorithms so token sources and sinks can depend on
//! the data model without pulling in the heuristics.

use serde::{Deserialize, Serialize};

/// A positioned text fragment extracted from a document page.
///
/// Coordinates are integer document units (PDF points for PDF input) in a
/// bottom-up system: larger `y` is higher on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub x: i64,
    pub y: i64,
}

impl Token {
    pub fn new(text: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// The unordered tokens of one page, as handed over by a token source.
pub type Page = Vec<Token>;

/// A horizontally ordered group of tokens lying on the same visual line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Cell texts, ordered by ascending `x`.
    pub cells: Vec<String>,
    /// Vertical position of the row (the `y` of its leftmost token).
    pub y: i64,
    /// Page index (0-based).
    pub page: usize,
}

impl Row {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A run of consecutive rows judged to form one table. Always holds at
/// least two rows once emitted by the segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Page the table starts on.
    pub fn first_page(&self) -> usize {
        self.rows.first().map_or(0, |r| r.page)
    }

    /// Widest row's cell count.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// Cell texts only, `cells()[row][col]`.
    pub fn cells(&self) -> Vec<&[String]> {
        self.rows.iter().map(|r| r.cells.as_slice()).collect()
    }
}

/// Tables in the order their first row appeared in the row stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSet {
    pub tables: Vec<Table>,
}

impl TableSet {
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.tables.iter()
    }

    /// Iterate tables with their 1-based display label ("Table 1", ...).
    pub fn labeled(&self) -> impl Iterator<Item = (String, &Table)> {
        self.tables
            .iter()
            .enumerate()
            .map(|(i, t)| (format!("Table {}", i + 1), t))
    }
}

impl<'a> IntoIterator for &'a TableSet {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
