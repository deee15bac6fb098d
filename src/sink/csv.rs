//! CSV output, one file per table (the spreadsheet "one sheet per table"
//! layout without a spreadsheet container).

use csv::WriterBuilder;

use super::{ensure_tables, Artifact, SinkError, SinkFormat, TableSink};
use crate::table::{Table, TableSet};

/// Writes `table_N.csv` for every table. Ragged rows are padded to the
/// table's widest row so every file is rectangular.
pub struct CsvSink;

fn table_to_csv(table: &Table) -> Result<Vec<u8>, SinkError> {
    let width = table.column_count();
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    for row in &table.rows {
        let padding = std::iter::repeat("").take(width - row.len());
        writer.write_record(row.cells.iter().map(String::as_str).chain(padding))?;
    }
    writer.into_inner().map_err(|e| SinkError::Io(e.into_error()))
}

impl TableSink for CsvSink {
    fn format(&self) -> SinkFormat {
        SinkFormat::Csv
    }

    fn render(&self, tables: &TableSet) -> Result<Vec<Artifact>, SinkError> {
        ensure_tables(tables)?;
        tables
            .iter()
            .enumerate()
            .map(|(i, table)| {
                let name = format!("table_{}.{}", i + 1, self.extension());
                Ok(Artifact::new(name, table_to_csv(table)?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::tests::sample;

    #[test]
    fn one_file_per_table() {
        let artifacts = CsvSink.render(&sample()).unwrap();
        let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["table_1.csv", "table_2.csv"]);
    }

    #[test]
    fn rows_are_written_in_order() {
        let artifacts = CsvSink.render(&sample()).unwrap();
        assert_eq!(
            String::from_utf8(artifacts[0].bytes.clone()).unwrap(),
            "Name,Age\nAlice,30\n"
        );
    }

    #[test]
    fn ragged_rows_are_padded() {
        let artifacts = CsvSink.render(&sample()).unwrap();
        assert_eq!(
            String::from_utf8(artifacts[1].bytes.clone()).unwrap(),
            "A,B,C\n1,2,\n"
        );
    }

    #[test]
    fn cells_with_commas_are_quoted() {
        let mut tables = sample();
        tables.tables[0].rows[1].cells[0] = "Smith, J".to_string();
        let artifacts = CsvSink.render(&tables).unwrap();
        let text = String::from_utf8(artifacts[0].bytes.clone()).unwrap();
        assert!(text.contains("\"Smith, J\",30"));
    }
}
