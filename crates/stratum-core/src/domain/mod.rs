// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stratum.
//!
//! This module contains pure logic with no I/O. Reading model files and
//! writing artifacts is handled via ports defined in the application layer.
//!
//! - **Naming**: pluralization and casing shared by every generator
//! - **Extractor**: source text to [`StructuralModel`]
//! - **Layout / Placement**: where each layer's artifacts go
//! - **Entities**: the model and the artifact sets generators produce

pub mod entities;
pub mod error;
pub mod extractor;
pub mod layout;
pub mod naming;
pub mod placement;
pub mod value_objects;

mod type_map;
mod validation;

pub use entities::{
    AUDIT_FIELDS, Artifact, ArtifactEntry, ArtifactSet, Capability, ID_FIELD, ModelName,
    Navigation, Property, Relationship, StructuralModel, StructuralModelBuilder,
    common::RelativePath, is_audit_field,
};
pub use error::{DomainError, ErrorCategory};
pub use extractor::Extractor;
pub use layout::{DEFAULT_ANCHOR, ProjectLayout};
pub use placement::{DEFAULT_CASCADE_PARENT, MigrationSettings, PlacementConfig};
pub use type_map::sql_type;
pub use validation::DomainValidator;
pub use value_objects::{CollectionKind, IdKind, IdType, Layer, ModuleName, Placement};
