//! mdsite: a small static site generator for annotated markdown
//!
//! Every markdown file of a source directory opens with a front matter block
//! and becomes one HTML page built from a shared template:
//!
//! ```text
//! ---
//! title: Home
//! stylesheet: base, home
//! scripts: app
//! ---
//! # Welcome
//!
//! Plain paragraphs are wrapped in <p>, while
//!
//! <div class="note">raw HTML</div>
//!
//! passes through untouched.
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mdsite::{LocalFileStore, Pipeline, Result, SiteConfig};
//!
//! fn main() -> Result<()> {
//!     let config = SiteConfig::load_or_default(None)?;
//!     let store = LocalFileStore::new();
//!
//!     let report = Pipeline::new(&config, &store).run()?;
//!     println!("built {} pages", report.succeeded());
//!     Ok(())
//! }
//! ```
//!
//! The pieces can also be used on their own:
//!
//! ```rust
//! use mdsite::convenience::render_page;
//!
//! let html = render_page(
//!     "<title>{{ title }}</title>{% block content %}",
//!     "---\ntitle: Hi\n---\nHello world",
//! )
//! .unwrap();
//! assert_eq!(html, "<title>Hi</title><p>Hello world</p>");
//! ```
//!
//! # Architecture
//!
//! - [`core`]: metadata parsing, block segmentation and template injection
//! - [`pipeline`]: per-document orchestration
//! - [`io`]: the [`FileStore`] trait and its implementations
//! - [`config`]: directories, placeholder tokens and element templates
//! - [`error`]: the error taxonomy

// Public API exports
pub use crate::error::{ErrorSeverity, Result, SiteError};

// Core types
pub use crate::core::{
    Block, BlockKind, Document, LinkedResource, Metadata, MetadataEntry, ResourceKind,
    TemplateInjector,
};

pub use crate::config::{Placeholders, SiteConfig};
pub use crate::io::{DryRunStore, FileStore, LocalFileStore, MemoryFileStore, PlannedChange, StoreConfig};
pub use crate::pipeline::{BuildReport, DocumentOutcome, FailurePolicy, Pipeline};

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;

/// Convenience functions for common operations
pub mod convenience {
    //! Single-call helpers that work on strings with the default
    //! configuration and no file access.

    use crate::core::{metadata, segment, Document, TemplateInjector};
    use crate::{MemoryFileStore, Metadata, Result, SiteConfig};

    /// Parse a `---` delimited front matter block
    pub fn parse_metadata(block: &str) -> Result<Metadata> {
        metadata::parse(block)
    }

    /// Convert a markdown body to HTML
    pub fn markdown_to_html(body: &str) -> String {
        segment::segment(body)
    }

    /// Render a whole source document into `template`
    ///
    /// Linked stylesheets and scripts are not available here, so documents
    /// listing any fail with [`crate::SiteError::FileNotFound`].
    pub fn render_page(template: &str, source: &str) -> Result<String> {
        let document = Document::parse("page.md", source)?;
        let config = SiteConfig::default();
        let store = MemoryFileStore::new();
        let body_html = segment::segment(document.body_text());
        TemplateInjector::new(&config, &store).inject(template, &body_html, document.metadata())
    }
}
