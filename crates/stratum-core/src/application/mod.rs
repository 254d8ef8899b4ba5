//! Application layer for Stratum.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`GenerationService`)
//! - **Generators**: One artifact generator per architectural layer
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Generators are pure: they turn a Structural Model into artifact sets.
//! Only the service talks to the filesystem port.

pub mod error;
pub mod generators;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerationReport, GenerationRequest, GenerationService, LayerOutcome, LayerReport,
};

pub use generators::{
    ArtifactGenerator, DomainServiceShape, GenerationError, default_generators, generator_for,
};

// Re-export port traits (for adapter implementation)
pub use ports::Filesystem;

pub use error::ApplicationError;
