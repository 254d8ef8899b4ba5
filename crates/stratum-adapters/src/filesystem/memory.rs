//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stratum_core::{
    application::{ApplicationError, ports::Filesystem},
    error::StratumResult,
};

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_directories(parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All file paths, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Path and content of every file, sorted by path.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        self.inner
            .read()
            .map(|inner| inner.files.clone())
            .unwrap_or_default()
    }

    fn read(&self) -> StratumResult<RwLockReadGuard<'_, Inner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write(&self) -> StratumResult<RwLockWriteGuard<'_, Inner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

impl Inner {
    fn add_directories(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> StratumResult<String> {
        self.read()?.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::SourceNotFound {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    fn create_dir_all(&self, path: &Path) -> StratumResult<()> {
        self.write()?.add_directories(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()> {
        let mut inner = self.write()?;

        let parent_missing = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.directories.contains(p));
        if parent_missing {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}
