pub mod artifact_set;
pub mod common;
pub mod structural_model;

pub use crate::domain::DomainError;
pub use artifact_set::{Artifact, ArtifactEntry, ArtifactSet};
pub use structural_model::{
    AUDIT_FIELDS, Capability, ID_FIELD, ModelName, Navigation, Property, Relationship,
    StructuralModel, StructuralModelBuilder, is_audit_field,
};
