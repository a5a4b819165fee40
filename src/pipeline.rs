//! Build pipeline
//!
//! Turns every markdown source of the configured source directory into an
//! HTML page. Documents are processed one at a time, in listing order, and
//! independently of each other: a document that fails writes no page and,
//! under [`FailurePolicy::Continue`], does not stop the others.

use crate::config::SiteConfig;
use crate::core::document::{document_name, Document};
use crate::core::segment;
use crate::core::template::TemplateInjector;
use crate::error::{ErrorSeverity, Result, SiteError};
use crate::io::FileStore;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// What to do when a document fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and build the remaining documents, unless the
    /// error is not recoverable (see [`SiteError::is_recoverable`])
    #[default]
    Continue,
    /// Stop at the first failure
    Halt,
}

/// Result of building one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentOutcome {
    /// Source file name
    pub source: String,
    /// Written page, on success
    pub output: Option<PathBuf>,
    /// Failure message, on error
    pub error: Option<String>,
}

impl DocumentOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a whole build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BuildReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}

/// Builds pages from markdown sources
pub struct Pipeline<'a> {
    config: &'a SiteConfig,
    store: &'a dyn FileStore,
    policy: FailurePolicy,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a SiteConfig, store: &'a dyn FileStore) -> Self {
        Self {
            config,
            store,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build every markdown source
    ///
    /// Failing to list the source directory is fatal. Document failures are
    /// recorded in the report, or returned under [`FailurePolicy::Halt`].
    pub fn run(&self) -> Result<BuildReport> {
        let sources = self.store.list_markdown_sources(&self.config.source_dir)?;
        if sources.is_empty() {
            warn!(
                "No markdown sources found in {}",
                self.config.source_dir.display()
            );
        }

        let mut report = BuildReport::default();
        let mut claimed: HashMap<PathBuf, String> = HashMap::new();
        for file_name in sources {
            let result = claim_output(&mut claimed, self.config, &file_name)
                .and_then(|()| self.process(&file_name));
            match result {
                Ok(output) => {
                    info!("Built {}", output.display());
                    report.outcomes.push(DocumentOutcome {
                        source: file_name,
                        output: Some(output),
                        error: None,
                    });
                }
                Err(err) => {
                    if self.policy == FailurePolicy::Halt || !err.is_recoverable() {
                        return Err(err.in_document(file_name));
                    }
                    log_failure(&file_name, &err);
                    report.outcomes.push(DocumentOutcome {
                        source: file_name,
                        output: None,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        info!(
            "Built {} of {} documents",
            report.succeeded(),
            report.outcomes.len()
        );
        Ok(report)
    }

    /// Build one source document and return the written page path
    pub fn process(&self, file_name: &str) -> Result<PathBuf> {
        let document = self.load_document(file_name)?;
        debug!(
            "{}: {} metadata entries",
            file_name,
            document.metadata().len()
        );
        for entry in document.metadata() {
            debug!("{}: {} = {:?}", file_name, entry.key, entry.values);
        }

        let body_html = segment::segment(document.body_text());

        let template = self.store.read_text(&self.config.template_path)?;
        let injector = TemplateInjector::new(self.config, self.store);
        let html = injector.inject(&template, &body_html, document.metadata())?;

        let output = self.config.page_output_path(document.name());
        self.store.write_text(&output, &html)?;
        Ok(output)
    }

    /// Read and parse one source document
    pub fn load_document(&self, file_name: &str) -> Result<Document> {
        let path = self.config.source_dir.join(file_name);
        debug!("Reading {}", path.display());
        let content = self.store.read_text(&path)?;
        Document::parse(file_name, &content)
    }
}

/// Reserve the page `file_name` builds; the first source to claim a page
/// keeps it
fn claim_output(
    claimed: &mut HashMap<PathBuf, String>,
    config: &SiteConfig,
    file_name: &str,
) -> Result<()> {
    let output = config.page_output_path(document_name(file_name));
    if let Some(other) = claimed.get(&output) {
        return Err(SiteError::output_conflict(output, other.clone()));
    }
    claimed.insert(output, file_name.to_string());
    Ok(())
}

fn log_failure(file_name: &str, err: &SiteError) {
    match err.severity() {
        ErrorSeverity::Critical | ErrorSeverity::High => error!("{}: {}", file_name, err),
        ErrorSeverity::Medium | ErrorSeverity::Low => warn!("{}: {}", file_name, err),
    }
}
