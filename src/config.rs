//! Site configuration
//!
//! All directories, placeholder tokens and link element templates used by a
//! build live in one [`SiteConfig`] value that is handed to the components
//! that need it. Nothing is read from process-wide constants, so tests can
//! point a build at any directory layout or template syntax.

use crate::error::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "site.yaml";

/// Literal tokens substituted in the page template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Placeholders {
    /// Replaced with the rendered body HTML
    pub content: String,
    /// Replaced with the `title` metadata value
    pub title: String,
    /// Replaced with the generated stylesheet link elements
    pub stylesheets: String,
    /// Replaced with the generated script elements
    pub scripts: String,
    /// Replaced with the resource name inside element templates
    pub file_name: String,
    /// Replaced with the resource output directory inside element templates
    pub directory: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            content: "{% block content %}".to_string(),
            title: "{{ title }}".to_string(),
            stylesheets: "{{ stylesheets }}".to_string(),
            scripts: "{{ scripts }}".to_string(),
            file_name: "{{ fileName }}".to_string(),
            directory: "{{ dir }}".to_string(),
        }
    }
}

/// Configuration for a site build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SiteConfig {
    /// Directory scanned for markdown sources
    pub source_dir: PathBuf,
    /// Root of the generated site
    pub output_dir: PathBuf,
    /// Base HTML template, loaded fresh for every document
    pub template_path: PathBuf,
    /// Where stylesheets named in metadata are copied from
    pub stylesheet_source_dir: PathBuf,
    /// Where scripts named in metadata are copied from
    pub script_source_dir: PathBuf,
    /// Stylesheet directory relative to `output_dir`
    pub stylesheet_output_dir: PathBuf,
    /// Script directory relative to `output_dir`
    pub script_output_dir: PathBuf,
    /// Title used when a document has no `title` entry
    pub default_title: Option<String>,
    pub placeholders: Placeholders,
    /// Element generated for each stylesheet; the directory token expands
    /// to `stylesheet_output_dir`
    pub stylesheet_element: String,
    /// Element generated for each script; the directory token expands to
    /// `script_output_dir`
    pub script_element: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./markdown"),
            output_dir: PathBuf::from("./_site"),
            template_path: PathBuf::from("./src/base.html"),
            stylesheet_source_dir: PathBuf::from("./src/css"),
            script_source_dir: PathBuf::from("./src/js"),
            stylesheet_output_dir: PathBuf::from("css"),
            script_output_dir: PathBuf::from("scripts"),
            default_title: None,
            placeholders: Placeholders::default(),
            stylesheet_element: r#"<link rel="stylesheet" href="{{ dir }}/{{ fileName }}.css">"#
                .to_string(),
            script_element: r#"<script src="{{ dir }}/{{ fileName }}.js"></script>"#.to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse a configuration from YAML text; missing fields take defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SiteError::from_io(e, path))?;
        Self::from_yaml_str(&content)
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] when it exists,
    /// else the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reject configurations that would make substitution meaningless
    pub fn validate(&self) -> Result<()> {
        let tokens = [
            ("content", &self.placeholders.content),
            ("title", &self.placeholders.title),
            ("stylesheets", &self.placeholders.stylesheets),
            ("scripts", &self.placeholders.scripts),
            ("file_name", &self.placeholders.file_name),
            ("directory", &self.placeholders.directory),
        ];
        for (name, token) in tokens {
            if token.is_empty() {
                return Err(SiteError::config(format!(
                    "placeholder '{}' must not be empty",
                    name
                )));
            }
        }

        for (name, element) in [
            ("stylesheet_element", &self.stylesheet_element),
            ("script_element", &self.script_element),
        ] {
            if !element.contains(self.placeholders.file_name.as_str()) {
                return Err(SiteError::config(format!(
                    "{} must contain the '{}' placeholder",
                    name, self.placeholders.file_name
                )));
            }
        }

        Ok(())
    }

    /// Output path of the page built from the document `name`
    pub fn page_output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.html", name))
    }
}
