//! In-memory and dry-run file stores

use crate::core::document::is_markdown;
use crate::error::{Result, SiteError};
use crate::io::store::FileStore;
use log::info;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// [`FileStore`] holding every file in a map keyed by path
///
/// Paths are compared as given; a file written to `./_site/a.html` is not
/// found under `_site/a.html`.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.borrow().contains_key(path.as_ref())
    }

    /// All stored paths, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl FileStore for MemoryFileStore {
    fn list_markdown_sources(&self, dir: &Path) -> Result<Vec<String>> {
        let files = self.files.borrow();
        let names: Vec<String> = files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name()?.to_str())
            .filter(|name| is_markdown(name))
            .map(str::to_string)
            .collect();

        if names.is_empty() && !files.keys().any(|path| path.starts_with(dir)) {
            return Err(SiteError::file_not_found(dir));
        }
        Ok(names)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.get(path).ok_or_else(|| SiteError::file_not_found(path))
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        self.insert(path, content);
        Ok(())
    }

    fn copy_file(&self, source: &Path, dest: &Path) -> Result<()> {
        let content = self.read_text(source)?;
        self.insert(dest, content);
        Ok(())
    }
}

/// A write or copy recorded by [`DryRunStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlannedChange {
    Write { path: PathBuf, bytes: usize },
    Copy { source: PathBuf, dest: PathBuf },
}

/// Wraps a store, passing reads through and recording writes and copies
/// instead of performing them
#[derive(Debug)]
pub struct DryRunStore<'a, S: FileStore + ?Sized> {
    inner: &'a S,
    planned: RefCell<Vec<PlannedChange>>,
}

impl<'a, S: FileStore + ?Sized> DryRunStore<'a, S> {
    pub fn new(inner: &'a S) -> Self {
        Self {
            inner,
            planned: RefCell::new(Vec::new()),
        }
    }

    /// Changes recorded so far, in order
    pub fn planned(&self) -> Vec<PlannedChange> {
        self.planned.borrow().clone()
    }
}

impl<S: FileStore + ?Sized> FileStore for DryRunStore<'_, S> {
    fn list_markdown_sources(&self, dir: &Path) -> Result<Vec<String>> {
        self.inner.list_markdown_sources(dir)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.inner.read_text(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        info!("[dry-run] write {} ({} bytes)", path.display(), content.len());
        self.planned.borrow_mut().push(PlannedChange::Write {
            path: path.to_path_buf(),
            bytes: content.len(),
        });
        Ok(())
    }

    fn copy_file(&self, source: &Path, dest: &Path) -> Result<()> {
        // a missing source must fail here as it would in a real build
        self.inner.read_text(source)?;
        info!("[dry-run] copy {} -> {}", source.display(), dest.display());
        self.planned.borrow_mut().push(PlannedChange::Copy {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_listing() {
        let store = MemoryFileStore::new()
            .with_file("md/b.md", "")
            .with_file("md/a.MARKDOWN", "")
            .with_file("md/style.css", "")
            .with_file("md/sub/c.md", "")
            .with_file("other/d.md", "");

        let names = store.list_markdown_sources(Path::new("md")).unwrap();
        assert_eq!(names, vec!["a.MARKDOWN", "b.md"]);

        let missing = store.list_markdown_sources(Path::new("nowhere"));
        assert!(matches!(missing, Err(SiteError::FileNotFound { .. })));
    }

    #[test]
    fn test_memory_store_copy() {
        let store = MemoryFileStore::new().with_file("css/main.css", "body {}");
        store
            .copy_file(Path::new("css/main.css"), Path::new("_site/css/main.css"))
            .unwrap();
        assert_eq!(store.get("_site/css/main.css").as_deref(), Some("body {}"));

        let err = store
            .copy_file(Path::new("css/none.css"), Path::new("_site/css/none.css"))
            .unwrap_err();
        assert!(matches!(err, SiteError::FileNotFound { .. }));
    }

    #[test]
    fn test_dry_run_records_without_writing() {
        let inner = MemoryFileStore::new()
            .with_file("page.md", "---\n---\nhi")
            .with_file("css/a.css", "a {}");
        let dry_run = DryRunStore::new(&inner);

        assert_eq!(dry_run.read_text(Path::new("page.md")).unwrap(), "---\n---\nhi");
        dry_run.write_text(Path::new("out/page.html"), "<p>hi</p>").unwrap();
        dry_run
            .copy_file(Path::new("css/a.css"), Path::new("out/css/a.css"))
            .unwrap();

        assert!(!inner.contains("out/page.html"));
        assert_eq!(
            dry_run.planned(),
            vec![
                PlannedChange::Write {
                    path: PathBuf::from("out/page.html"),
                    bytes: 9
                },
                PlannedChange::Copy {
                    source: PathBuf::from("css/a.css"),
                    dest: PathBuf::from("out/css/a.css")
                },
            ]
        );
        assert!(!inner.contains("out/css/a.css"));
    }

    #[test]
    fn test_dry_run_copy_requires_source() {
        let inner = MemoryFileStore::new();
        let dry_run = DryRunStore::new(&inner);

        let err = dry_run
            .copy_file(Path::new("css/none.css"), Path::new("out/css/none.css"))
            .unwrap_err();
        assert!(matches!(err, SiteError::FileNotFound { .. }));
        assert!(dry_run.planned().is_empty());
    }
}
