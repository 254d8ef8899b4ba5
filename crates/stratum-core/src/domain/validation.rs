use std::path::Path;

use crate::domain::{
    entities::{ArtifactSet, ModelName},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Location contracts live here, not scattered across generators.
pub struct DomainValidator;

impl DomainValidator {
    /// The model name is the file stem, whatever the extension.
    pub fn model_name_from_path(path: &Path) -> Result<ModelName, DomainError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| DomainError::InvalidModelName {
                name: path.display().to_string(),
                reason: "path has no file name".into(),
            })?;
        ModelName::new(stem)
    }

    /// The model must live in a directory named exactly after its plural.
    pub fn validate_model_location(name: &ModelName, path: &Path) -> Result<(), DomainError> {
        let expected = name.plural();
        let actual = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        if actual == expected {
            Ok(())
        } else {
            Err(DomainError::DirectoryMismatch {
                expected,
                actual: actual.to_string(),
            })
        }
    }

    pub fn validate_artifact_set(set: &ArtifactSet) -> Result<(), DomainError> {
        set.validate()
    }
}
