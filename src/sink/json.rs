//! JSON output for downstream tooling.

use serde::Serialize;

use super::{ensure_tables, Artifact, SinkError, SinkFormat, TableSink, ARTIFACT_STEM};
use crate::table::TableSet;

#[derive(Serialize)]
struct JsonTable<'a> {
    label: String,
    page: usize,
    rows: Vec<&'a [String]>,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    tables: Vec<JsonTable<'a>>,
}

/// Renders `{"tables": [{"label", "page", "rows"}]}`.
pub struct JsonSink;

impl TableSink for JsonSink {
    fn format(&self) -> SinkFormat {
        SinkFormat::Json
    }

    fn render(&self, tables: &TableSet) -> Result<Vec<Artifact>, SinkError> {
        ensure_tables(tables)?;
        let doc = JsonDocument {
            tables: tables
                .labeled()
                .map(|(label, table)| JsonTable {
                    label,
                    page: table.first_page(),
                    rows: table.cells(),
                })
                .collect(),
        };
        let mut bytes = serde_json::to_vec_pretty(&doc)?;
        bytes.push(b'\n');
        Ok(vec![Artifact::new(
            format!("{ARTIFACT_STEM}.{}", self.extension()),
            bytes,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::tests::sample;

    #[test]
    fn render_structure() {
        let artifacts = JsonSink.render(&sample()).unwrap();
        assert_eq!(artifacts[0].name, "extracted_tables.json");

        let value: serde_json::Value = serde_json::from_slice(&artifacts[0].bytes).unwrap();
        let tables = value["tables"].as_array().unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0]["label"], "Table 1");
        assert_eq!(tables[1]["label"], "Table 2");
        assert_eq!(tables[1]["page"], 1);
        assert_eq!(tables[0]["rows"][1][0], "Alice");
        assert_eq!(tables[1]["rows"][1].as_array().unwrap().len(), 2);
    }
}
