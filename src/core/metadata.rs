//! Front matter metadata parsing
//!
//! A front matter block is a run of `key: value` lines framed by `---`
//! delimiter lines. Values may be comma separated lists:
//!
//! ```text
//! ---
//! title: Home
//! stylesheet: base, home
//! ---
//! ```

use crate::error::{Result, SiteError};
use log::warn;

const DELIMITER: &str = "---";

/// One `key: value[, value...]` line of front matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub key: String,
    pub values: Vec<String>,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    /// The only value of this entry, if it has exactly one
    pub fn single_value(&self) -> Option<&str> {
        match self.values.as_slice() {
            [value] => Some(value),
            _ => None,
        }
    }
}

/// Ordered front matter entries of a document
///
/// Keys are not unique; [`Metadata::find`] returns the first entry with a
/// given key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(Vec<MetadataEntry>);

impl Metadata {
    pub fn new(entries: Vec<MetadataEntry>) -> Self {
        Self(entries)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// First entry with the given key
    pub fn find(&self, key: &str) -> Option<&MetadataEntry> {
        self.0.iter().find(|entry| entry.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = &'a MetadataEntry;
    type IntoIter = std::slice::Iter<'a, MetadataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse a delimited front matter block into its entries
///
/// The block must start and end with a `---` line. Blank interior lines are
/// ignored; any other line without a `:` separator is rejected.
pub fn parse(block: &str) -> Result<Metadata> {
    let lines: Vec<&str> = block.split('\n').collect();

    let (first, last) = match (lines.first(), lines.last()) {
        (Some(first), Some(last)) if lines.len() >= 2 => (first.trim(), last.trim()),
        _ => {
            return Err(SiteError::malformed_metadata(
                "front matter must be framed by two '---' lines",
            ))
        }
    };
    if first != DELIMITER {
        return Err(SiteError::malformed_metadata(format!(
            "front matter must open with '{}', found '{}'",
            DELIMITER, first
        )));
    }
    if last != DELIMITER {
        return Err(SiteError::malformed_metadata(format!(
            "front matter must close with '{}', found '{}'",
            DELIMITER, last
        )));
    }

    let mut entries = Vec::new();
    for (index, line) in lines[1..lines.len() - 1].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        // +2: the opening delimiter is line 1
        entries.push(parse_line(line, index + 2)?);
    }

    Ok(Metadata(entries))
}

fn parse_line(line: &str, line_number: usize) -> Result<MetadataEntry> {
    let (raw_key, raw_value) = line.split_once(':').ok_or_else(|| {
        SiteError::malformed_metadata(format!(
            "line {}: expected 'key: value', found '{}'",
            line_number,
            line.trim()
        ))
    })?;

    let key = clean(raw_key);
    if key.is_empty() {
        return Err(SiteError::malformed_metadata(format!(
            "line {}: missing key before ':'",
            line_number
        )));
    }

    let pieces: Vec<String> = raw_value.split(',').map(clean).collect();
    let dropped = pieces.iter().filter(|piece| piece.is_empty()).count();
    // `key:` alone is an empty list, not a typo
    if dropped > 0 && dropped < pieces.len() {
        warn!(
            "line {}: ignoring {} empty value(s) of '{}'",
            line_number, dropped, key
        );
    }
    let values = pieces.into_iter().filter(|piece| !piece.is_empty()).collect();

    Ok(MetadataEntry { key, values })
}

/// Trim a segment and drop hyphens and line break characters
fn clean(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '\r' | '\n'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(entry: &MetadataEntry) -> Vec<&str> {
        entry.values.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_list_pieces_are_skipped() {
        let metadata = parse("---\nstylesheet: a, , b\nscripts: app,\n---").unwrap();
        assert_eq!(values(metadata.find("stylesheet").unwrap()), vec!["a", "b"]);
        assert_eq!(values(metadata.find("scripts").unwrap()), vec!["app"]);
    }

    #[test]
    fn test_parse_entries_in_order() {
        let metadata = parse("---\ntitle: Home\nstylesheet: base, home\nscripts: app\n---").unwrap();

        assert_eq!(metadata.len(), 3);
        let keys: Vec<_> = metadata.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["title", "stylesheet", "scripts"]);
        assert_eq!(values(metadata.find("stylesheet").unwrap()), vec!["base", "home"]);
        assert_eq!(metadata.find("title").unwrap().single_value(), Some("Home"));
    }

    #[test]
    fn test_strips_hyphens_and_carriage_returns() {
        let metadata = parse("---\r\n  ti-tle :  my-page \r\nlist: a-b ,\tc\r\n---").unwrap();

        let title = metadata.find("title").unwrap();
        assert_eq!(values(title), vec!["mypage"]);
        assert_eq!(values(metadata.find("list").unwrap()), vec!["ab", "c"]);
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let metadata = parse("---\nlink: https://example.com:8080/x\n---").unwrap();
        assert_eq!(
            metadata.find("link").unwrap().single_value(),
            Some("https://example.com:8080/x")
        );
    }

    #[test]
    fn test_duplicate_keys_preserved_first_wins() {
        let metadata = parse("---\ntitle: First\ntitle: Second\n---").unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.find("title").unwrap().single_value(), Some("First"));
    }

    #[test]
    fn test_empty_value_gives_empty_list() {
        let metadata = parse("---\nstylesheet:\nscripts: a, , b,\n---").unwrap();
        assert!(metadata.find("stylesheet").unwrap().values.is_empty());
        assert_eq!(values(metadata.find("scripts").unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let metadata = parse("---\n\ntitle: Home\n   \n---").unwrap();
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn test_empty_block() {
        let metadata = parse("---\n---").unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_line_without_separator_is_malformed() {
        let err = parse("---\ntitle: Home\njust some words\n---").unwrap_err();
        match err {
            SiteError::MalformedMetadata { reason } => assert!(reason.contains("line 3")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_is_malformed() {
        assert!(matches!(
            parse("---\n: orphan\n---"),
            Err(SiteError::MalformedMetadata { .. })
        ));
    }

    #[test]
    fn test_missing_delimiters() {
        assert!(matches!(parse(""), Err(SiteError::MalformedMetadata { .. })));
        assert!(matches!(
            parse("title: Home"),
            Err(SiteError::MalformedMetadata { .. })
        ));
        assert!(matches!(
            parse("---\ntitle: Home"),
            Err(SiteError::MalformedMetadata { .. })
        ));
        assert!(matches!(
            parse("---\ntitle: Home---"),
            Err(SiteError::MalformedMetadata { .. })
        ));
    }
}
