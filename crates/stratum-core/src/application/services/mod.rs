//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer, the generators and the ports to
//! accomplish the use cases "inspect a model" and "generate its layers".

pub mod generation_service;

pub use generation_service::{
    GenerationReport, GenerationRequest, GenerationService, LayerOutcome, LayerReport,
};
