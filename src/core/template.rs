//! Template injection
//!
//! A page is produced by substituting literal placeholder tokens in the base
//! template: the body HTML, the document title, and one element per
//! stylesheet or script named in the metadata. Every linked resource is also
//! copied into the output tree.

use crate::config::SiteConfig;
use crate::core::metadata::{Metadata, MetadataEntry};
use crate::error::{Result, SiteError};
use crate::io::FileStore;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Metadata key holding the page title
pub const TITLE_KEY: &str = "title";

/// Separator between generated link elements
const ELEMENT_SEPARATOR: &str = "\n\t";

/// Kind of resource a page can link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Stylesheet,
    Script,
}

impl ResourceKind {
    /// Metadata key listing resources of this kind
    pub fn metadata_key(self) -> &'static str {
        match self {
            ResourceKind::Stylesheet => "stylesheet",
            ResourceKind::Script => "scripts",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ResourceKind::Stylesheet => "css",
            ResourceKind::Script => "js",
        }
    }

    fn placeholder(self, config: &SiteConfig) -> &str {
        match self {
            ResourceKind::Stylesheet => &config.placeholders.stylesheets,
            ResourceKind::Script => &config.placeholders.scripts,
        }
    }

    fn output_dir(self, config: &SiteConfig) -> &Path {
        match self {
            ResourceKind::Stylesheet => &config.stylesheet_output_dir,
            ResourceKind::Script => &config.script_output_dir,
        }
    }

    fn element_template(self, config: &SiteConfig) -> &str {
        match self {
            ResourceKind::Stylesheet => &config.stylesheet_element,
            ResourceKind::Script => &config.script_element,
        }
    }
}

/// A stylesheet or script referenced from metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedResource {
    pub file_name: String,
    pub kind: ResourceKind,
}

impl LinkedResource {
    pub fn new(file_name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
        }
    }

    fn file_with_extension(&self) -> String {
        format!("{}.{}", self.file_name, self.kind.extension())
    }

    /// Where the resource is copied from
    pub fn source_path(&self, config: &SiteConfig) -> PathBuf {
        let dir = match self.kind {
            ResourceKind::Stylesheet => &config.stylesheet_source_dir,
            ResourceKind::Script => &config.script_source_dir,
        };
        dir.join(self.file_with_extension())
    }

    /// Where the resource is copied to
    pub fn output_path(&self, config: &SiteConfig) -> PathBuf {
        config
            .output_dir
            .join(self.kind.output_dir(config))
            .join(self.file_with_extension())
    }

    /// The HTML element linking this resource
    pub fn element(&self, config: &SiteConfig) -> String {
        let placeholders = &config.placeholders;
        self.kind
            .element_template(config)
            .replacen(placeholders.file_name.as_str(), &self.file_name, 1)
            .replacen(placeholders.directory.as_str(), &self.href_dir(config), 1)
    }

    /// Output directory as a relative URL path
    fn href_dir(&self, config: &SiteConfig) -> String {
        self.kind
            .output_dir(config)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Fills the base template for one document
pub struct TemplateInjector<'a> {
    config: &'a SiteConfig,
    store: &'a dyn FileStore,
}

impl<'a> TemplateInjector<'a> {
    pub fn new(config: &'a SiteConfig, store: &'a dyn FileStore) -> Self {
        Self { config, store }
    }

    /// Substitute body, title and resource links into `template`
    ///
    /// Linked resources are copied into the output tree as they are
    /// processed. Fails when `title` does not have exactly one value or when
    /// `stylesheet`/`scripts` has none.
    pub fn inject(&self, template: &str, body_html: &str, metadata: &Metadata) -> Result<String> {
        let placeholders = &self.config.placeholders;

        let mut html = replace_first(template, &placeholders.content, body_html);
        html = self.inject_title(html, metadata)?;
        html = self.inject_resources(html, metadata, ResourceKind::Stylesheet)?;
        html = self.inject_resources(html, metadata, ResourceKind::Script)?;

        Ok(html)
    }

    /// Resources `metadata` links, in the order they are injected
    pub fn linked_resources(&self, metadata: &Metadata) -> Result<Vec<LinkedResource>> {
        let mut resources = Vec::new();
        for kind in [ResourceKind::Stylesheet, ResourceKind::Script] {
            if let Some(entry) = metadata.find(kind.metadata_key()) {
                resources.extend(resources_of(entry, kind)?);
            }
        }
        Ok(resources)
    }

    fn inject_title(&self, html: String, metadata: &Metadata) -> Result<String> {
        let token = &self.config.placeholders.title;
        let title = match metadata.find(TITLE_KEY) {
            Some(entry) => Some(entry.single_value().ok_or_else(|| {
                SiteError::invalid_metadata(
                    TITLE_KEY,
                    format!("expected exactly one value, found {}", entry.values.len()),
                )
            })?),
            None => self.config.default_title.as_deref(),
        };

        Ok(match title {
            Some(title) => replace_first(&html, token, title),
            None => html,
        })
    }

    fn inject_resources(
        &self,
        html: String,
        metadata: &Metadata,
        kind: ResourceKind,
    ) -> Result<String> {
        let token = kind.placeholder(self.config);
        let Some(entry) = metadata.find(kind.metadata_key()) else {
            return Ok(replace_first(&html, token, ""));
        };

        let mut elements = String::new();
        for resource in resources_of(entry, kind)? {
            self.copy_resource(&resource)?;
            if !elements.is_empty() {
                elements.push_str(ELEMENT_SEPARATOR);
            }
            elements.push_str(&resource.element(self.config));
        }

        Ok(replace_first(&html, token, &elements))
    }

    fn copy_resource(&self, resource: &LinkedResource) -> Result<()> {
        let source = resource.source_path(self.config);
        let dest = resource.output_path(self.config);
        debug!("Copying {} to {}", source.display(), dest.display());
        self.store.copy_file(&source, &dest)?;
        info!("Copied {}", dest.display());
        Ok(())
    }
}

fn resources_of(entry: &MetadataEntry, kind: ResourceKind) -> Result<Vec<LinkedResource>> {
    if entry.values.is_empty() {
        return Err(SiteError::invalid_metadata(
            kind.metadata_key(),
            "expected at least one value",
        ));
    }
    Ok(entry
        .values
        .iter()
        .map(|value| LinkedResource::new(value.clone(), kind))
        .collect())
}

/// Replace the first occurrence of `token`; a missing token is left alone
fn replace_first(haystack: &str, token: &str, replacement: &str) -> String {
    haystack.replacen(token, replacement, 1)
}
