//! Table segmentation over the ordered row stream.
//!
//! Rows arrive in reading order across all pages. A new table starts when
//! the vertical distance to the previous row exceeds the gap threshold, or
//! when the cell count changes by more than the allowed delta. Runs shorter
//! than [`MIN_TABLE_ROWS`] are dropped.
//!
//! Complexity: O(R) where R = rows.

use tracing::trace;

use super::types::{Row, Table, TableSet};
use crate::config::{GapMode, Thresholds};

/// Minimum number of rows for a run to be emitted as a table.
pub const MIN_TABLE_ROWS: usize = 2;

/// Scan state for one segmentation pass.
#[derive(Debug, Default)]
struct Segmenter {
    tables: Vec<Table>,
    current: Vec<Row>,
    last_y: Option<i64>,
    last_cells: Option<usize>,
}

impl Segmenter {
    fn push(mut self, row: Row, thresholds: &Thresholds) -> Self {
        if let Some(last_y) = self.last_y {
            let gap = row.y.abs_diff(last_y);
            let enforced = thresholds.gap_mode == GapMode::Enforced;
            if enforced && gap > thresholds.gap.unsigned_abs() {
                trace!(gap, y = row.y, "vertical gap breaks table");
                self.flush();
            }
        }
        if let Some(last_cells) = self.last_cells {
            if row.len().abs_diff(last_cells) > thresholds.cell_delta {
                trace!(
                    from = last_cells,
                    to = row.len(),
                    y = row.y,
                    "column count change breaks table"
                );
                self.flush();
            }
        }

        self.last_y = Some(row.y);
        self.last_cells = Some(row.len());
        self.current.push(row);
        self
    }

    fn flush(&mut self) {
        let rows = std::mem::take(&mut self.current);
        if rows.len() >= MIN_TABLE_ROWS {
            self.tables.push(Table { rows });
        } else if !rows.is_empty() {
            trace!(rows = rows.len(), "dropping short run");
        }
    }

    fn finish(mut self) -> TableSet {
        self.flush();
        TableSet {
            tables: self.tables,
        }
    }
}

/// Split an ordered row stream into tables.
pub fn segment_rows<I>(rows: I, thresholds: &Thresholds) -> TableSet
where
    I: IntoIterator<Item = Row>,
{
    rows.into_iter()
        .fold(Segmenter::default(), |seg, row| seg.push(row, thresholds))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: usize, y: i64) -> Row {
        Row {
            cells: (0..cells).map(|i| format!("c{i}@{y}")).collect(),
            y,
            page: 0,
        }
    }

    fn shape(set: &TableSet) -> Vec<Vec<i64>> {
        set.iter()
            .map(|t| t.rows.iter().map(|r| r.y).collect())
            .collect()
    }

    #[test]
    fn empty_stream_yields_no_tables() {
        let set = segment_rows(Vec::new(), &Thresholds::default());
        assert!(set.is_empty());
    }

    #[test]
    fn single_row_is_not_a_table() {
        let set = segment_rows(vec![row(3, 100)], &Thresholds::default());
        assert!(set.is_empty());
    }

    #[test]
    fn coherent_rows_form_one_table() {
        let rows: Vec<Row> = (0..10).map(|i| row(3, 500 - i * 15)).collect();
        let set = segment_rows(rows, &Thresholds::default());
        assert_eq!(set.len(), 1);
        assert_eq!(set.tables[0].rows.len(), 10);
    }

    #[test]
    fn vertical_gap_splits_and_drops_short_run() {
        let rows = vec![row(3, 100), row(3, 90), row(3, 40)];
        let set = segment_rows(rows, &Thresholds::default());
        assert_eq!(shape(&set), vec![vec![100, 90]]);
    }

    #[test]
    fn extreme_row_positions_do_not_overflow() {
        let rows = || {
            vec![
                row(3, i64::MAX),
                row(3, i64::MAX - 10),
                row(3, i64::MIN),
                row(3, i64::MIN + 5),
            ]
        };
        let set = segment_rows(rows(), &Thresholds::default());
        assert_eq!(
            shape(&set),
            vec![vec![i64::MAX, i64::MAX - 10], vec![i64::MIN, i64::MIN + 5]]
        );

        let disabled = Thresholds {
            gap_mode: GapMode::Disabled,
            ..Thresholds::default()
        };
        assert_eq!(segment_rows(rows(), &disabled).tables[0].rows.len(), 4);
    }

    #[test]
    fn gap_equal_to_threshold_does_not_split() {
        let rows = vec![row(3, 100), row(3, 80), row(3, 60)];
        let set = segment_rows(rows, &Thresholds::default());
        assert_eq!(shape(&set), vec![vec![100, 80, 60]]);
    }

    #[test]
    fn vertical_gap_splits_two_tables() {
        let rows = vec![
            row(3, 700),
            row(3, 688),
            row(3, 676),
            row(3, 500),
            row(3, 488),
        ];
        let set = segment_rows(rows, &Thresholds::default());
        assert_eq!(shape(&set), vec![vec![700, 688, 676], vec![500, 488]]);
    }

    #[test]
    fn disabled_gap_mode_ignores_distance() {
        let rows = vec![row(3, 100), row(3, 90), row(3, 40)];
        let thresholds = Thresholds {
            gap_mode: GapMode::Disabled,
            ..Thresholds::default()
        };
        let set = segment_rows(rows, &thresholds);
        assert_eq!(shape(&set), vec![vec![100, 90, 40]]);
    }

    #[test]
    fn column_count_change_splits() {
        let rows = vec![
            row(5, 200),
            row(5, 188),
            row(2, 176),
            row(2, 164),
        ];
        let set = segment_rows(rows, &Thresholds::default());
        assert_eq!(shape(&set), vec![vec![200, 188], vec![176, 164]]);
    }

    #[test]
    fn small_column_count_change_is_tolerated() {
        let rows = vec![row(4, 200), row(2, 188), row(4, 176)];
        let set = segment_rows(rows, &Thresholds::default());
        assert_eq!(set.len(), 1);
        assert_eq!(set.tables[0].rows.len(), 3);
    }

    #[test]
    fn column_delta_is_measured_against_previous_row() {
        // 6 -> 4 -> 2: each step is 2, so no split despite 6 vs 2.
        let rows = vec![row(6, 300), row(4, 290), row(2, 280)];
        let set = segment_rows(rows, &Thresholds::default());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn both_rules_firing_on_one_row_flush_once() {
        let rows = vec![row(6, 300), row(6, 290), row(2, 100), row(2, 90)];
        let set = segment_rows(rows, &Thresholds::default());
        assert_eq!(shape(&set), vec![vec![300, 290], vec![100, 90]]);
    }

    #[test]
    fn custom_thresholds_apply() {
        let rows = vec![row(3, 100), row(3, 70), row(3, 40)];
        let thresholds = Thresholds {
            gap: 30,
            ..Thresholds::default()
        };
        assert_eq!(segment_rows(rows.clone(), &thresholds).len(), 1);
        assert!(segment_rows(rows, &Thresholds::default()).is_empty());
    }

    #[test]
    fn every_table_has_at_least_two_rows() {
        let rows = vec![
            row(3, 900),
            row(3, 800),
            row(3, 790),
            row(8, 780),
            row(2, 500),
            row(2, 490),
            row(2, 480),
            row(7, 470),
        ];
        let set = segment_rows(rows, &Thresholds::default());
        assert!(set.iter().all(|t| t.rows.len() >= MIN_TABLE_ROWS));
        assert_eq!(shape(&set), vec![vec![800, 790], vec![500, 490, 480]]);
    }
}
