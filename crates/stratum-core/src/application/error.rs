//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O. Contract
//! violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Layer;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The model source file does not exist.
    #[error("Model file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A generator could not produce or write its artifacts.
    #[error("{layer} generation failed at {path}: {reason}")]
    GenerationFailed {
        layer: Layer,
        path: PathBuf,
        reason: String,
    },

    /// Adapter state lock was poisoned.
    #[error("Filesystem adapter lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SourceNotFound { path } => vec![
                format!("No file at: {}", path.display()),
                "Pass the path of an existing model file, e.g. .../AggregateRoots/Categories/Category.cs".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::GenerationFailed { layer, .. } => vec![
                format!("The {layer} layer was skipped; other layers were still generated"),
                format!("Re-run with --only {layer} after fixing the cause"),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::GenerationFailed { .. } => ErrorCategory::Internal,
        }
    }
}
