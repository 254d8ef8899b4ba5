use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// The output of one generator, ready for materialization.
///
/// All entry paths are relative to `root`. It contains no logic beyond
/// structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<ArtifactEntry>,
}

impl ArtifactSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: RelativePath, content: String) {
        self.entries
            .push(ArtifactEntry::File(Artifact { path, content }));
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries.push(ArtifactEntry::Directory(path));
    }

    pub fn with_file(mut self, path: RelativePath, content: String) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_directory(mut self, path: RelativePath) -> Self {
        self.add_directory(path);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[ArtifactEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &Artifact> {
        self.entries.iter().filter_map(|e| match e {
            ArtifactEntry::File(f) => Some(f),
            ArtifactEntry::Directory(_) => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.iter().filter_map(|e| match e {
            ArtifactEntry::Directory(d) => Some(d),
            ArtifactEntry::File(_) => None,
        })
    }

    /// Look up a file by its path relative to the root.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&Artifact> {
        let path = path.as_ref();
        self.files().find(|f| f.path.as_path() == path)
    }

    /// Absolute (root-joined) paths of every file, in generation order.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files().map(|f| self.root.join(&f.path)).collect()
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactEntry {
    File(Artifact),
    Directory(RelativePath),
}

impl ArtifactEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => d,
        }
    }
}

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    #[serde(serialize_with = "serialize_path")]
    pub path: RelativePath,
    pub content: String,
}

impl Artifact {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

fn serialize_path<S: serde::Serializer>(path: &RelativePath, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&path.to_string())
}
