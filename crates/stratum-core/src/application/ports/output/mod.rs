//! Driven (output) ports - implemented by infrastructure.

use crate::error::StratumResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stratum_adapters::filesystem::LocalFilesystem` (production)
/// - `stratum_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Writes overwrite existing files; there is no merge and no rollback.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole text file.
    fn read_to_string(&self, path: &Path) -> StratumResult<String>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StratumResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
