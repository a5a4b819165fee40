//! File access used by a build
//!
//! The pipeline never touches the filesystem directly; it goes through the
//! [`FileStore`] trait so builds can run against the local disk, memory or
//! a dry run.

use crate::core::document::is_markdown;
use crate::error::{Result, SiteError};
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Narrow file interface consumed by the pipeline
pub trait FileStore {
    /// Names of the markdown files directly inside `dir`, sorted by name
    fn list_markdown_sources(&self, dir: &Path) -> Result<Vec<String>>;

    /// Read a UTF-8 file
    fn read_text(&self, path: &Path) -> Result<String>;

    /// Create or replace a file
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;

    /// Copy `source` to `dest`, replacing `dest`
    fn copy_file(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// Configuration for the local file store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Write to a temporary file first, then rename over the target
    pub atomic_writes: bool,
    /// Create missing parent directories of written and copied files
    pub create_dirs: bool,
    /// Follow symbolic links when listing sources
    pub follow_links: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            atomic_writes: true,
            create_dirs: true,
            follow_links: false,
        }
    }
}

/// [`FileStore`] backed by the local filesystem
#[derive(Debug, Clone, Default)]
pub struct LocalFileStore {
    config: StoreConfig,
}

impl LocalFileStore {
    /// Create a new store with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new store with custom configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self { config }
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if !self.config.create_dirs {
            return Ok(());
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                debug!("Creating directory {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| SiteError::from_io(e, parent))
            }
            _ => Ok(()),
        }
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let parent_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file =
            NamedTempFile::new_in(parent_dir).map_err(|e| SiteError::from_io(e, parent_dir))?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(path).map_err(|e| {
            SiteError::Io(std::io::Error::other(format!(
                "Failed to persist temporary file for {}: {}",
                path.display(),
                e
            )))
        })?;

        Ok(())
    }
}

impl FileStore for LocalFileStore {
    fn list_markdown_sources(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Err(SiteError::file_not_found(dir));
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_links)
            .sort_by_file_name();

        let mut names = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                match e.into_io_error() {
                    Some(io_err) => SiteError::from_io(io_err, path),
                    None => SiteError::Io(std::io::Error::other(format!(
                        "filesystem loop at {}",
                        path.display()
                    ))),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_markdown(name) {
                    names.push(name.to_string());
                }
            }
        }

        debug!("Found {} markdown sources in {}", names.len(), dir.display());
        Ok(names)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| SiteError::from_io(e, path))
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        self.ensure_parent(path)?;
        if self.config.atomic_writes {
            self.write_atomic(path, content)
        } else {
            fs::write(path, content).map_err(|e| SiteError::from_io(e, path))
        }
    }

    fn copy_file(&self, source: &Path, dest: &Path) -> Result<()> {
        if !source.is_file() {
            return Err(SiteError::file_not_found(source));
        }
        self.ensure_parent(dest)?;

        // open both ends first so a failure names the side it happened on
        let mut reader = fs::File::open(source).map_err(|e| SiteError::from_io(e, source))?;
        let mut writer = fs::File::create(dest).map_err(|e| SiteError::from_io(e, dest))?;
        io::copy(&mut reader, &mut writer).map_err(|e| SiteError::from_io(e, dest))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_markdown_sources() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("b.markdown"), "").unwrap();
        fs::write(root.join("a.md"), "").unwrap();
        fs::write(root.join("C.MD"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::create_dir(root.join("nested.md")).unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/deep.md"), "").unwrap();

        let store = LocalFileStore::new();
        let names = store.list_markdown_sources(root).unwrap();
        assert_eq!(names, vec!["C.MD", "a.md", "b.markdown"]);
    }

    #[test]
    fn test_list_missing_dir() {
        let store = LocalFileStore::new();
        let result = store.list_markdown_sources(Path::new("/nonexistent/markdown"));
        assert!(matches!(result, Err(SiteError::FileNotFound { .. })));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("_site/nested/page.html");

        let store = LocalFileStore::new();
        store.write_text(&target, "<html></html>").unwrap();
        assert_eq!(store.read_text(&target).unwrap(), "<html></html>");

        store.write_text(&target, "replaced").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "replaced");
    }

    #[test]
    fn test_direct_write_without_dirs_fails() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("missing/page.html");

        let store = LocalFileStore::with_config(StoreConfig {
            atomic_writes: false,
            create_dirs: false,
            follow_links: false,
        });
        let result = store.write_text(&target, "x");
        assert!(matches!(result, Err(SiteError::FileNotFound { .. })));
    }

    #[test]
    fn test_copy_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("main.css");
        let dest = temp_dir.path().join("_site/css/main.css");
        fs::write(&source, "body {}").unwrap();

        let store = LocalFileStore::new();
        store.copy_file(&source, &dest).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "body {}");

        let missing = store.copy_file(&temp_dir.path().join("nope.css"), &dest);
        assert!(matches!(missing, Err(SiteError::FileNotFound { .. })));
    }

    #[test]
    fn test_copy_failure_names_destination() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("main.css");
        let dest = temp_dir.path().join("missing/css/main.css");
        fs::write(&source, "body {}").unwrap();

        let store = LocalFileStore::with_config(StoreConfig {
            create_dirs: false,
            ..StoreConfig::default()
        });
        match store.copy_file(&source, &dest) {
            Err(SiteError::FileNotFound { path }) => assert_eq!(path, dest),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let store = LocalFileStore::new();
        let result = store.read_text(Path::new("/nonexistent/file.md"));
        assert!(matches!(result, Err(SiteError::FileNotFound { .. })));
    }
}
