//! Infrastructure adapters for Stratum.
//!
//! This crate implements the ports defined in `stratum-core::application::ports`.
//! All real I/O lives here.

pub mod filesystem;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
