// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can carry them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid model name '{name}': {reason}")]
    InvalidModelName { name: String, reason: String },

    #[error("Unknown module '{name}'")]
    UnknownModule { name: String },

    #[error("Unknown layer '{name}'")]
    UnknownLayer { name: String },

    #[error("Duplicate path in artifact set: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Location Contract Violations
    // ========================================================================
    #[error(
        "Model directory mismatch: expected directory '{expected}' but the model lives in '{actual}'"
    )]
    DirectoryMismatch { expected: String, actual: String },

    #[error("Model path '{path}' does not contain the '{marker}' segment")]
    MissingLayerMarker { marker: String, path: String },

    #[error("Invalid project layout: {reason}")]
    InvalidLayout { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidModelName { name, .. } => vec![
                format!("'{name}' must be a valid type identifier"),
                "Model file names start with a letter and contain only letters, digits and '_'"
                    .into(),
            ],
            Self::UnknownModule { name } => vec![
                format!("'{name}' is not a known module"),
                "Try: stratum modules".into(),
            ],
            Self::UnknownLayer { name } => vec![
                format!("'{name}' is not a generator layer"),
                "Layers: domain, repository, application, controller, migration, unit-test".into(),
            ],
            Self::DirectoryMismatch { expected, actual } => vec![
                format!("Move the model into a directory named '{expected}'"),
                format!("Or rename '{actual}' to '{expected}'"),
            ],
            Self::MissingLayerMarker { marker, .. } => vec![
                format!("Model files must live below a '{marker}' directory"),
                "Set layout.anchor in the configuration if your project uses another name".into(),
            ],
            Self::InvalidLayout { reason } => vec![
                format!("Layout problem: {reason}"),
                "Expected <src>/<Root>.Domain/<anchor>/<Plural>/<Model>.cs".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidModelName { .. }
            | Self::UnknownModule { .. }
            | Self::UnknownLayer { .. } => ErrorCategory::Validation,
            Self::DirectoryMismatch { .. }
            | Self::MissingLayerMarker { .. }
            | Self::InvalidLayout { .. } => ErrorCategory::Precondition,
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Precondition,
    NotFound,
    Internal,
}
