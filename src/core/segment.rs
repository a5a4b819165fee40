//! Markdown body to HTML block segmentation
//!
//! The body is split into blocks at blank lines and at HTML closing tags.
//! Text between blank lines becomes a `<p>` paragraph; text ending in a
//! closing tag is passed through untouched, so raw HTML written inside a
//! markdown document is never wrapped in a paragraph. ATX style headers
//! (`# Title` through `###### Title`) are translated to `<hN>` elements
//! before segmentation and therefore pass through like any other raw HTML.
//!
//! ```
//! use mdsite::core::segment::segment;
//!
//! let html = segment("# Hello\n\nSome text.\n\n<div>raw</div>");
//! assert_eq!(html, "<h1>Hello</h1>\n<p>Some text.</p>\n<div>raw</div>");
//! ```

use regex::Regex;
use std::sync::LazyLock;

static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("valid header regex"));

static DOUBLE_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid line break regex"));

static HTML_CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</[A-Za-z][A-Za-z0-9:-]*\s*>").expect("valid closing tag regex")
});

static HEADER_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<h([1-6])>(?s:.*)</h([1-6])>$").expect("valid header element regex")
});

/// What a block of output HTML represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Prose wrapped in `<p>`
    Paragraph,
    /// A translated markdown header, level 1 to 6
    Header(u8),
    /// HTML passed through as written
    Raw,
}

/// One unit of output HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub html: String,
}

impl Block {
    fn paragraph(text: &str) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            html: format!("<p>{}</p>", text),
        }
    }

    fn passthrough(html: String) -> Self {
        let kind = header_level(&html)
            .map(BlockKind::Header)
            .unwrap_or(BlockKind::Raw);
        Self { kind, html }
    }
}

/// Boundary patterns in tie-break order: a blank line wins over a closing
/// tag starting at the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundaryKind {
    DoubleLineBreak,
    ClosingTag,
}

impl BoundaryKind {
    const ALL: [BoundaryKind; 2] = [BoundaryKind::DoubleLineBreak, BoundaryKind::ClosingTag];

    fn pattern(self) -> &'static Regex {
        match self {
            BoundaryKind::DoubleLineBreak => &DOUBLE_LINE_BREAK,
            BoundaryKind::ClosingTag => &HTML_CLOSING_TAG,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Boundary {
    kind: BoundaryKind,
    start: usize,
    end: usize,
}

/// Earliest boundary in `text`, if any
fn earliest_boundary(text: &str) -> Option<Boundary> {
    let mut found: Vec<Boundary> = BoundaryKind::ALL
        .iter()
        .filter_map(|&kind| {
            kind.pattern().find(text).map(|m| Boundary {
                kind,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect();

    // sort_by_key is stable, equal starts keep pattern order
    found.sort_by_key(|boundary| boundary.start);
    found.into_iter().next()
}

/// Translate a markdown header line to an HTML header element
///
/// Lines that are not headers are returned unchanged.
pub fn translate_header(line: &str) -> String {
    match HEADER_LINE.captures(line) {
        Some(caps) => {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", caps[2].trim())
        }
        None => line.to_string(),
    }
}

fn header_level(html: &str) -> Option<u8> {
    let caps = HEADER_ELEMENT.captures(html)?;
    if caps[1] != caps[2] {
        return None;
    }
    // a single element only, not "<h1>a</h1><h1>b</h1>"
    if html[4..html.len() - 5].contains("</h") {
        return None;
    }
    caps[1].parse().ok()
}

/// Split a markdown body into classified HTML blocks, in document order
pub fn segment_blocks(body: &str) -> Vec<Block> {
    let text = body
        .trim()
        .split('\n')
        .map(translate_header)
        .collect::<Vec<_>>()
        .join("\n");

    let mut blocks = Vec::new();
    let mut rest = text.as_str();

    while !rest.is_empty() {
        let Some(boundary) = earliest_boundary(rest) else {
            // trimmed like blocks ending at a blank line, so text after a
            // closing tag on the same line does not keep its indentation
            let tail = rest.trim();
            if !tail.is_empty() {
                blocks.push(Block::paragraph(tail));
            }
            break;
        };

        let block = &rest[..boundary.start];
        match boundary.kind {
            BoundaryKind::DoubleLineBreak => {
                let block = block.trim();
                if !block.is_empty() {
                    blocks.push(Block::paragraph(block));
                }
            }
            BoundaryKind::ClosingTag => {
                blocks.push(Block::passthrough(rest[..boundary.end].to_string()));
            }
        }
        rest = &rest[boundary.end..];
    }

    blocks
}

/// Concatenate blocks into one HTML string, one block per line
pub fn render(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| block.html.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert a markdown body to HTML
///
/// Never fails; an empty body gives an empty string.
pub fn segment(body: &str) -> String {
    render(&segment_blocks(body))
}
