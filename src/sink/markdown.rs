//! GitHub-flavored markdown tables, one `## Table N` section per table.

use super::{ensure_tables, Artifact, SinkError, SinkFormat, TableSink, ARTIFACT_STEM};
use crate::table::{Table, TableSet};

/// Renders all tables into a single markdown document.
pub struct MarkdownSink;

/// Render one table as a GitHub-flavored markdown table.
///
/// The first row is the header. Rows shorter than the widest row are padded
/// with empty cells.
pub fn table_to_markdown(table: &Table) -> String {
    if table.rows.is_empty() {
        return String::new();
    }

    let col_count = table.column_count();
    if col_count == 0 {
        return String::new();
    }

    let mut md = String::new();
    let push_row = |md: &mut String, cells: &[String]| {
        md.push('|');
        for col in 0..col_count {
            let cell = cells.get(col).map_or("", String::as_str);
            md.push_str(&format!(" {} |", escape_cell(cell)));
        }
        md.push('\n');
    };

    // Header row
    push_row(&mut md, &table.rows[0].cells);

    // Separator row
    md.push('|');
    for _ in 0..col_count {
        md.push_str(" --- |");
    }
    md.push('\n');

    // Data rows
    for row in table.rows.iter().skip(1) {
        push_row(&mut md, &row.cells);
    }

    md
}

/// Keep a cell on one table line: escape pipes, turn line breaks into `<br>`.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

impl TableSink for MarkdownSink {
    fn format(&self) -> SinkFormat {
        SinkFormat::Markdown
    }

    fn render(&self, tables: &TableSet) -> Result<Vec<Artifact>, SinkError> {
        ensure_tables(tables)?;

        let mut out = String::new();
        for (i, (label, table)) in tables.labeled().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("## {label}\n\n"));
            out.push_str(&table_to_markdown(table));
        }

        Ok(vec![Artifact::new(
            format!("{ARTIFACT_STEM}.{}", self.extension()),
            out,
        )])
    }
}
