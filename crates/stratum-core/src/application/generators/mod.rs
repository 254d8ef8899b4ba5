//! One generator per architectural layer.
//!
//! Every generator follows the same split: `output_root` decides where the
//! artifacts go, the free `render_*` functions decide what they contain.
//! Generators never touch the filesystem.

mod code;

pub mod application_layer;
pub mod controller;
pub mod domain_layer;
pub mod migration;
pub mod repository;
pub mod shape;
pub mod unit_test;

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{
    ArtifactSet, DomainError, Layer, PlacementConfig, RelativePath, StructuralModel,
};

pub use application_layer::ApplicationGenerator;
pub use controller::ControllerGenerator;
pub use domain_layer::DomainGenerator;
pub use migration::MigrationGenerator;
pub use repository::RepositoryGenerator;
pub use shape::{DomainServiceShape, Parameter, Setter};
pub use unit_test::UnitTestGenerator;

/// Failure of a single generator. The orchestrator records it against the
/// layer and moves on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerationError {
    #[error("cannot resolve output location for '{path}': {reason}")]
    PathResolution {
        layer: Layer,
        path: String,
        reason: String,
    },

    #[error("cannot render {layer} artifacts: {reason}")]
    Render { layer: Layer, reason: String },
}

impl GenerationError {
    pub fn layer(&self) -> Layer {
        match self {
            Self::PathResolution { layer, .. } | Self::Render { layer, .. } => *layer,
        }
    }

    /// Path the failure relates to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::PathResolution { path, .. } => Some(path),
            Self::Render { .. } => None,
        }
    }

    pub(crate) fn path_resolution(
        layer: Layer,
        config: &PlacementConfig,
        source: DomainError,
    ) -> Self {
        Self::PathResolution {
            layer,
            path: config.layout.model_path().display().to_string(),
            reason: source.to_string(),
        }
    }
}

/// Contract shared by all layer generators.
pub trait ArtifactGenerator: Send + Sync {
    fn layer(&self) -> Layer;

    /// Directory every artifact path of this layer is relative to.
    fn output_root(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<PathBuf, GenerationError>;

    fn generate(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<ArtifactSet, GenerationError>;
}

/// The generator for `layer`.
pub fn generator_for(layer: Layer) -> Box<dyn ArtifactGenerator> {
    match layer {
        Layer::Domain => Box::new(DomainGenerator),
        Layer::Repository => Box::new(RepositoryGenerator),
        Layer::Application => Box::new(ApplicationGenerator),
        Layer::Controller => Box::new(ControllerGenerator),
        Layer::Migration => Box::new(MigrationGenerator),
        Layer::UnitTest => Box::new(UnitTestGenerator),
    }
}

/// All generators in layer order.
pub fn default_generators() -> Vec<Box<dyn ArtifactGenerator>> {
    Layer::ALL.into_iter().map(generator_for).collect()
}

/// Collects files for one layer and validates the result.
pub(crate) struct SetBuilder {
    layer: Layer,
    set: ArtifactSet,
}

impl SetBuilder {
    pub(crate) fn new(layer: Layer, root: PathBuf) -> Self {
        Self {
            layer,
            set: ArtifactSet::new(root),
        }
    }

    pub(crate) fn directory(&mut self, segments: &[&str]) -> Result<(), GenerationError> {
        let path = self.path(segments)?;
        self.set.add_directory(path);
        Ok(())
    }

    pub(crate) fn file(&mut self, segments: &[&str], content: String) -> Result<(), GenerationError> {
        let path = self.path(segments)?;
        self.set.add_file(path, content);
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<ArtifactSet, GenerationError> {
        self.set.validate().map_err(|e| GenerationError::Render {
            layer: self.layer,
            reason: e.to_string(),
        })?;
        Ok(self.set)
    }

    fn path(&self, segments: &[&str]) -> Result<RelativePath, GenerationError> {
        RelativePath::from_segments(segments).map_err(|e| GenerationError::Render {
            layer: self.layer,
            reason: e.to_string(),
        })
    }
}

/// `<Name>.cs`
pub(crate) fn cs(type_name: &str) -> String {
    format!("{type_name}.cs")
}
