//! Stratum Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stratum
//! scaffolding tool: one model file in, six layers of source artifacts out.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stratum-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (GenerationService)            │
//! │   Extract → Generate → Write, per layer │
//! └──────────┬───────────────────┬──────────┘
//!            │ runs              │ uses
//!            ▼                   ▼
//! ┌────────────────────┐ ┌──────────────────┐
//! │  Layer Generators  │ │  Ports (Traits)  │
//! │ (pure render_* fns)│ │   (Filesystem)   │
//! └─────────┬──────────┘ └────────┬─────────┘
//!           │                     │ implemented by
//!           │                     ▼
//!           │           ┌──────────────────────┐
//!           │           │   stratum-adapters   │
//!           │           │ (Local/Memory fs)    │
//!           │           └──────────────────────┘
//!           ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (StructuralModel, Extractor, naming,    │
//! │  ProjectLayout, ArtifactSet)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stratum_core::prelude::*;
//!
//! # fn run(filesystem: Box<dyn Filesystem>) -> StratumResult<()> {
//! let service = GenerationService::new(filesystem);
//! let request = GenerationRequest::new(
//!     "src/Bapsis.Api.Domain/AggregateRoots/Categories/Category.cs",
//!     Placement::Module(ModuleName::ProjectOffice),
//!     MigrationSettings::new("ayse", "202401151030"),
//! );
//! let report = service.generate(&request)?;
//! println!("{} files written", report.file_count());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationRequest, GenerationService, LayerOutcome, LayerReport,
        ports::Filesystem,
    };
    pub use crate::domain::{
        Extractor, IdType, Layer, MigrationSettings, ModelName, ModuleName, Placement,
        StructuralModel,
    };
    pub use crate::error::{StratumError, StratumResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
