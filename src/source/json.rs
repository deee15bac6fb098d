//! JSON token dumps.
//!
//! Accepts either an object with a `pages` array or a bare array of pages.
//! Each page is an array of tokens:
//!
//! ```json
//! {"pages": [[{"text": "Name", "x": 56.2, "y": 700}, {"str": "Qty", "x": 300, "y": 700.4}]]}
//! ```
//!
//! `str` is accepted as an alias of `text`. Coordinates may be fractional and
//! are rounded to the nearest integer; a missing coordinate, or one beyond
//! [`MAX_COORDINATE`](super::MAX_COORDINATE), is rejected.

use serde::{Deserialize, Serialize};

use super::{round_coordinate, SourceError, TokenSource};
use crate::table::{Page, Token};

/// Token as it appears on the wire, before validation.
#[derive(Debug, Deserialize)]
struct RawToken {
    #[serde(default, alias = "str")]
    text: String,
    x: Option<f64>,
    y: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Wrapped { pages: Vec<Vec<RawToken>> },
    Bare(Vec<Vec<RawToken>>),
}

#[derive(Serialize)]
struct DumpDocument<'a> {
    pages: &'a [Page],
}

/// Reads token dumps produced by `tablift tokens` or an external extractor.
pub struct JsonSource;

impl JsonSource {
    fn coordinate(
        value: Option<f64>,
        axis: &str,
        page: usize,
        index: usize,
    ) -> Result<i64, SourceError> {
        let value = value.ok_or_else(|| SourceError::MalformedToken {
            page,
            index,
            reason: format!("missing {axis} coordinate"),
        })?;
        round_coordinate(value).ok_or_else(|| SourceError::MalformedToken {
            page,
            index,
            reason: format!("{axis} is out of range ({value})"),
        })
    }

    fn validate(pages: Vec<Vec<RawToken>>) -> Result<Vec<Page>, SourceError> {
        pages
            .into_iter()
            .enumerate()
            .map(|(page, raw)| {
                raw.into_iter()
                    .enumerate()
                    .map(|(index, t)| -> Result<Token, SourceError> {
                        Ok(Token {
                            x: Self::coordinate(t.x, "x", page, index)?,
                            y: Self::coordinate(t.y, "y", page, index)?,
                            text: t.text.trim().to_string(),
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

impl TokenSource for JsonSource {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn sniff(&self, bytes: &[u8]) -> bool {
        matches!(
            bytes.iter().find(|b| !b.is_ascii_whitespace()),
            Some(b'[' | b'{')
        )
    }

    fn load(&self, bytes: &[u8]) -> Result<Vec<Page>, SourceError> {
        let pages = match serde_json::from_slice::<RawDocument>(bytes)? {
            RawDocument::Wrapped { pages } | RawDocument::Bare(pages) => pages,
        };
        let pages = Self::validate(pages)?;
        tracing::debug!(
            pages = pages.len(),
            tokens = pages.iter().map(Vec::len).sum::<usize>(),
            "parsed token dump"
        );
        Ok(pages)
    }
}

/// Serialize pages as a pretty-printed `{"pages": [...]}` document that
/// [`JsonSource`] reads back.
pub fn dump_tokens(pages: &[Page]) -> Result<String, SourceError> {
    Ok(serde_json::to_string_pretty(&DumpDocument { pages })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(s: &str) -> Result<Vec<Page>, SourceError> {
        JsonSource.load(s.as_bytes())
    }

    #[test]
    fn parse_wrapped_document() {
        let pages = load(r#"{"pages": [[{"text": "A", "x": 1, "y": 2}], []]}"#).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], vec![Token::new("A", 1, 2)]);
        assert!(pages[1].is_empty());
    }

    #[test]
    fn parse_bare_array() {
        let pages = load(r#"[[{"text": "A", "x": 1, "y": 2}]]"#).unwrap();
        assert_eq!(pages[0][0], Token::new("A", 1, 2));
    }

    #[test]
    fn str_alias_and_trimming() {
        let pages = load(r#"[[{"str": "  Total \n", "x": 0, "y": 0}]]"#).unwrap();
        assert_eq!(pages[0][0].text, "Total");
    }

    #[test]
    fn missing_text_is_empty_token() {
        let pages = load(r#"[[{"x": 4, "y": 5}]]"#).unwrap();
        assert_eq!(pages[0][0], Token::new("", 4, 5));
    }

    #[test]
    fn fractional_coordinates_are_rounded() {
        let pages = load(r#"[[{"text": "a", "x": 56.5, "y": 700.49}]]"#).unwrap();
        assert_eq!(pages[0][0].x, 57);
        assert_eq!(pages[0][0].y, 700);
    }

    #[test]
    fn missing_coordinate_is_malformed() {
        let err = load(r#"[[], [{"text": "ok", "x": 1, "y": 1}, {"text": "bad", "x": 3}]]"#)
            .unwrap_err();
        match err {
            SourceError::MalformedToken { page, index, reason } => {
                assert_eq!(page, 1);
                assert_eq!(index, 1);
                assert!(reason.contains("y"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_coordinate_is_malformed() {
        let err = load(r#"[[{"text": "a", "x": null, "y": 1}]]"#).unwrap_err();
        assert!(err.to_string().contains("missing x"));
    }

    #[test]
    fn huge_coordinate_is_malformed() {
        let doc = r#"[[{"text": "a", "x": 1, "y": 1e300}, {"text": "b", "x": 2, "y": 1e300}]]"#;
        match load(doc).unwrap_err() {
            SourceError::MalformedToken { page, index, reason } => {
                assert_eq!((page, index), (0, 0));
                assert!(reason.contains("y is out of range"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(load(r#"[[{"text": "a", "x": -5e18, "y": 1}]]"#).is_err());
    }

    #[test]
    fn coordinate_at_limit_is_accepted() {
        let pages = load(r#"[[{"text": "a", "x": -1e15, "y": 1e15}]]"#).unwrap();
        assert_eq!(pages[0][0].x, -1_000_000_000_000_000);
        assert_eq!(pages[0][0].y, 1_000_000_000_000_000);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(load("[[{").unwrap_err(), SourceError::Json(_)));
    }

    #[test]
    fn sniff_skips_leading_whitespace() {
        assert!(JsonSource.sniff(b"\n  [[]]"));
        assert!(JsonSource.sniff(b"{}"));
        assert!(!JsonSource.sniff(b"%PDF-1.7"));
        assert!(!JsonSource.sniff(b""));
    }

    #[test]
    fn dump_reads_back() {
        let pages = vec![vec![Token::new("x", 1, 2), Token::new("y", 3, 4)], Vec::new()];
        let dumped = dump_tokens(&pages).unwrap();
        assert!(dumped.contains("\"pages\""));
        assert_eq!(load(&dumped).unwrap(), pages);
    }
}
