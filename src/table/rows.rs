//! Row reconstruction from positioned tokens.
//!
//! Tokens are bucketed by a quantized vertical coordinate so that small
//! baseline jitter does not split a visual line:
//!
//! 1. Sort by Y descending (top-to-bottom), then X ascending.
//! 2. Group tokens whose `y` rounds to the same multiple of the bucket height.
//! 3. Sort each group by X and keep rows with at least [`MIN_ROW_CELLS`] cells.
//! 4. Order rows by their true Y, top of the page first.

use std::collections::BTreeMap;

use super::types::{Row, Token};

/// Rows with fewer cells are noise (page numbers, stray headings).
pub const MIN_ROW_CELLS: usize = 2;

/// Quantized row key: `round(y / bucket) * bucket`, halves rounded toward
/// positive infinity.
///
/// Computed in `i128` so that any `i64` coordinate and bucket stay in range.
/// `bucket` must be positive.
pub fn row_key(y: i64, bucket: i64) -> i128 {
    let (y, bucket) = (i128::from(y), i128::from(bucket));
    (2 * y + bucket).div_euclid(2 * bucket) * bucket
}

/// Group one page's tokens into rows, top-to-bottom.
///
/// Returns an empty vec when no line has two or more tokens.
pub fn group_rows(tokens: &[Token], page: usize, bucket: i64) -> Vec<Row> {
    let mut sorted: Vec<&Token> = tokens.iter().collect();
    sorted.sort_by(|a, b| {
        b.y.cmp(&a.y)
            .then(a.x.cmp(&b.x))
            .then_with(|| a.text.cmp(&b.text))
    });

    let mut buckets: BTreeMap<i128, Vec<&Token>> = BTreeMap::new();
    for token in sorted {
        buckets.entry(row_key(token.y, bucket)).or_default().push(token);
    }

    let mut rows: Vec<(i128, Row)> = buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= MIN_ROW_CELLS)
        .map(|(key, mut members)| {
            // Stable: equal X keeps the Y-descending order from above.
            members.sort_by_key(|t| t.x);
            let y = members[0].y;
            let cells = members.iter().map(|t| t.text.clone()).collect();
            (key, Row { cells, y, page })
        })
        .collect();

    rows.sort_by(|(ka, a), (kb, b)| b.y.cmp(&a.y).then(kb.cmp(ka)));
    rows.into_iter().map(|(_, row)| row).collect()
}
