//! Document transformation
//!
//! - [`metadata`]: front matter parsing into ordered entries
//! - [`segment`]: markdown body to HTML blocks
//! - [`template`]: template injection and resource linking
//! - [`document`]: front matter / body split and the document model

pub mod document;
pub mod metadata;
pub mod segment;
pub mod template;

pub use document::Document;
pub use metadata::{Metadata, MetadataEntry};
pub use segment::{Block, BlockKind};
pub use template::{LinkedResource, ResourceKind, TemplateInjector};
