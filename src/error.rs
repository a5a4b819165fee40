//! Error types for the mdsite library
//!
//! Every fallible operation in the crate returns [`Result`]. Validation
//! failures (malformed front matter, metadata with the wrong number of
//! values) are kept apart from I/O faults so callers can decide whether a
//! single document failing should stop a whole build.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum SiteError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File or directory not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Permission errors
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Front matter block missing or not framed by `---` delimiters
    #[error("Malformed metadata: {reason}")]
    MalformedMetadata { reason: String },

    /// Metadata entry with the wrong number of values
    #[error("Invalid metadata for '{key}': {reason}")]
    InvalidMetadata { key: String, reason: String },

    /// Invalid site configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Two sources of one build map to the same page
    #[error("Output {path} is already built from {other}")]
    OutputConflict { path: PathBuf, other: String },

    /// A failure while processing one source document
    #[error("Failed to build {name}: {source}")]
    Document {
        name: String,
        #[source]
        source: Box<SiteError>,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SiteError>;

impl SiteError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Create a new malformed metadata error
    pub fn malformed_metadata(reason: impl Into<String>) -> Self {
        Self::MalformedMetadata {
            reason: reason.into(),
        }
    }

    /// Create a new invalid metadata error
    pub fn invalid_metadata(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new output conflict error
    pub fn output_conflict(path: impl Into<PathBuf>, other: impl Into<String>) -> Self {
        Self::OutputConflict {
            path: path.into(),
            other: other.into(),
        }
    }

    /// Attach the name of the document being processed
    pub fn in_document(self, name: impl Into<String>) -> Self {
        Self::Document {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Map an I/O error on `path` to the most specific variant
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::Io(err),
        }
    }

    /// Check if the build can go on with other documents after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::OutOfMemory
            ),
            Self::PermissionDenied { .. } | Self::Config { .. } | Self::Yaml(_) => false,
            Self::FileNotFound { .. }
            | Self::MalformedMetadata { .. }
            | Self::InvalidMetadata { .. }
            | Self::OutputConflict { .. } => true,
            Self::Document { source, .. } => source.is_recoverable(),
        }
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PermissionDenied { .. } | Self::Config { .. } | Self::Yaml(_) => {
                ErrorSeverity::Critical
            }
            Self::Io(_) | Self::FileNotFound { .. } => ErrorSeverity::High,
            Self::MalformedMetadata { .. } | Self::OutputConflict { .. } => ErrorSeverity::Medium,
            Self::InvalidMetadata { .. } => ErrorSeverity::Low,
            Self::Document { source, .. } => source.severity(),
        }
    }

    /// Strip any [`SiteError::Document`] wrappers
    pub fn root_cause(&self) -> &SiteError {
        match self {
            Self::Document { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
