//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use stratum_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StratumError, StratumResult},
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> StratumResult<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::SourceNotFound {
                path: path.to_path_buf(),
            }
            .into(),
            _ => map_io_error(path, e, "read file"),
        })
    }

    fn create_dir_all(&self, path: &Path) -> StratumResult<()> {
        trace!(path = %path.display(), "create_dir_all");
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write_file");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StratumError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
