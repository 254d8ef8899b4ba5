//! Host project layout, derived from the location of the model file.
//!
//! ```text
//! <repo>/
//! ├── src/                                   source_dir
//! │   ├── Bapsis.Api.Domain/                 domain_project_dir
//! │   │   └── AggregateRoots/                anchor
//! │   │       └── Categories/                model_dir
//! │   │           └── Category.cs
//! │   ├── Bapsis.Api.Data/
//! │   ├── Bapsis.Api.Application/
//! │   └── Bapsis.Api.Http/
//! └── test/Unit/Bapsis.Domain.Unit.Test/     unit_test_project_dir
//! ```
//!
//! [`ProjectLayout::resolve`] locates the anchor; [`ProjectLayout::validate`]
//! checks that every sibling root can be derived from it.

use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// Default anchor directory below the domain project.
pub const DEFAULT_ANCHOR: &str = "AggregateRoots";

const DOMAIN_SUFFIX: &str = ".Domain";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    model_path: PathBuf,
    anchor: String,
    anchor_dir: PathBuf,
}

impl ProjectLayout {
    /// Locate the anchor directory among the ancestors of `model_path`.
    pub fn resolve(model_path: impl Into<PathBuf>, anchor: &str) -> Result<Self, DomainError> {
        let model_path = model_path.into();
        let anchor_dir = model_path
            .ancestors()
            .skip(1)
            .find(|dir| dir.file_name().is_some_and(|n| n == anchor))
            .map(Path::to_path_buf)
            .ok_or_else(|| DomainError::MissingLayerMarker {
                marker: anchor.to_string(),
                path: model_path.display().to_string(),
            })?;

        Ok(Self {
            model_path,
            anchor: anchor.to_string(),
            anchor_dir,
        })
    }

    /// Check the `<Root>.Domain` project and the directories above it.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.root_namespace()?;
        self.unit_test_project_dir()?;
        Ok(())
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Directory holding the model file; domain artifacts are written here.
    pub fn model_dir(&self) -> &Path {
        self.model_path.parent().unwrap_or(&self.anchor_dir)
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn anchor_dir(&self) -> &Path {
        &self.anchor_dir
    }

    pub fn domain_project_dir(&self) -> Result<&Path, DomainError> {
        self.anchor_dir.parent().ok_or_else(|| DomainError::InvalidLayout {
            reason: format!("'{}' has no parent project directory", self.anchor),
        })
    }

    /// Name of the domain project directory, e.g. `Bapsis.Api.Domain`.
    pub fn domain_project_name(&self) -> Result<String, DomainError> {
        dir_name(self.domain_project_dir()?)
    }

    pub fn source_dir(&self) -> Result<&Path, DomainError> {
        self.domain_project_dir()?
            .parent()
            .ok_or_else(|| DomainError::InvalidLayout {
                reason: "the domain project has no parent source directory".into(),
            })
    }

    /// Root namespace shared by every project, e.g. `Bapsis.Api`.
    pub fn root_namespace(&self) -> Result<String, DomainError> {
        let name = self.domain_project_name()?;
        name.strip_suffix(DOMAIN_SUFFIX)
            .filter(|root| !root.is_empty())
            .map(str::to_string)
            .ok_or_else(|| DomainError::InvalidLayout {
                reason: format!("domain project '{name}' does not end with '{DOMAIN_SUFFIX}'"),
            })
    }

    /// Leading segment of the root namespace, e.g. `Bapsis`.
    pub fn company(&self) -> Result<String, DomainError> {
        let root = self.root_namespace()?;
        Ok(root.split('.').next().unwrap_or(&root).to_string())
    }

    /// Namespace of the anchor, e.g. `Bapsis.Api.Domain.AggregateRoots`.
    pub fn domain_namespace(&self) -> Result<String, DomainError> {
        Ok(format!("{}.{}", self.domain_project_name()?, self.anchor))
    }

    /// Sibling project directory, e.g. `project_dir("Data")` is
    /// `<src>/Bapsis.Api.Data`.
    pub fn project_dir(&self, layer_suffix: &str) -> Result<PathBuf, DomainError> {
        Ok(self
            .source_dir()?
            .join(format!("{}.{}", self.root_namespace()?, layer_suffix)))
    }

    /// Name of the domain unit-test project, e.g. `Bapsis.Domain.Unit.Test`.
    pub fn unit_test_project_name(&self) -> Result<String, DomainError> {
        Ok(format!("{}.Domain.Unit.Test", self.company()?))
    }

    /// `<repo>/test/Unit/<Company>.Domain.Unit.Test`.
    pub fn unit_test_project_dir(&self) -> Result<PathBuf, DomainError> {
        let repo = self
            .source_dir()?
            .parent()
            .ok_or_else(|| DomainError::InvalidLayout {
                reason: "the source directory has no parent to hold 'test'".into(),
            })?;
        Ok(repo
            .join("test")
            .join("Unit")
            .join(self.unit_test_project_name()?))
    }
}

fn dir_name(path: &Path) -> Result<String, DomainError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| DomainError::InvalidLayout {
            reason: format!("'{}' has no usable directory name", path.display()),
        })
}
