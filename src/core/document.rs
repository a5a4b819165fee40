//! Source document model
//!
//! A source document is a markdown file that opens with a front matter
//! block. [`Document::parse`] separates the two and parses the metadata;
//! the body is kept as raw markdown until it is segmented.

use crate::core::metadata::{self, Metadata};
use crate::error::{Result, SiteError};
use regex::Regex;
use std::sync::LazyLock;

static FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---.*?---").expect("valid front matter regex"));

static MARKDOWN_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(md|markdown)$").expect("valid extension regex"));

/// A parsed markdown source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    body_text: String,
    metadata: Metadata,
}

impl Document {
    /// Build a document from the raw content of the file `file_name`
    pub fn parse(file_name: &str, content: &str) -> Result<Self> {
        let (front_matter, body) = split_front_matter(content).ok_or_else(|| {
            SiteError::malformed_metadata("document does not open with a '---' front matter block")
        })?;
        let metadata = metadata::parse(front_matter)?;

        Ok(Self {
            name: document_name(file_name).to_string(),
            body_text: body,
            metadata,
        })
    }

    /// File name without its markdown extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Markdown body with the front matter removed
    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Split raw file content into the front matter block and the remaining body
///
/// The block must start at the very first byte. Returns `None` when the
/// content has no front matter.
pub fn split_front_matter(content: &str) -> Option<(&str, String)> {
    let m = FRONT_MATTER.find(content)?;
    Some((m.as_str(), content[m.end()..].to_string()))
}

/// Whether `file_name` has a `.md` or `.markdown` extension, in any case
pub fn is_markdown(file_name: &str) -> bool {
    MARKDOWN_EXTENSION.is_match(file_name)
}

/// Strip the markdown extension from a file name
pub fn document_name(file_name: &str) -> &str {
    match MARKDOWN_EXTENSION.find(file_name) {
        Some(m) => &file_name[..m.start()],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let (front_matter, body) =
            split_front_matter("---\ntitle: Foo\n---\n# Hi\n\nworld").unwrap();
        assert_eq!(front_matter, "---\ntitle: Foo\n---");
        assert_eq!(body, "\n# Hi\n\nworld");
    }

    #[test]
    fn test_split_requires_leading_block() {
        assert!(split_front_matter("# No metadata").is_none());
        assert!(split_front_matter("\n---\ntitle: x\n---").is_none());
    }

    #[test]
    fn test_split_stops_at_first_closing_delimiter() {
        let (front_matter, body) =
            split_front_matter("---\ntitle: a\n---\nbody\n---\nmore").unwrap();
        assert_eq!(front_matter, "---\ntitle: a\n---");
        assert_eq!(body, "\nbody\n---\nmore");
    }

    #[test]
    fn test_parse_document() {
        let doc = Document::parse("post.md", "---\ntitle: Post\n---\nHello").unwrap();
        assert_eq!(doc.name(), "post");
        assert_eq!(doc.body_text(), "\nHello");
        assert_eq!(doc.metadata().find("title").unwrap().single_value(), Some("Post"));
    }

    #[test]
    fn test_parse_without_front_matter_fails() {
        let err = Document::parse("post.md", "Hello").unwrap_err();
        assert!(matches!(err, SiteError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_markdown_names() {
        assert!(is_markdown("a.md"));
        assert!(is_markdown("B.MARKDOWN"));
        assert!(is_markdown("notes.Md"));
        assert!(!is_markdown("style.css"));
        assert!(!is_markdown("md"));
        assert!(!is_markdown("readme.md.bak"));

        assert_eq!(document_name("index.md"), "index");
        assert_eq!(document_name("Long.Name.markdown"), "Long.Name");
        assert_eq!(document_name("plain"), "plain");
    }
}
