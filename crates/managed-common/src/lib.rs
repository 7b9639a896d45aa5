//! Shared foundation types for the clrbind compilation pipeline.
//!
//! This crate provides the types every other `clrbind-*` crate depends on:
//! - The diagnostic bag (`Diagnostic`, `DiagnosticBag`, diagnostic codes)
//! - The build policy (`Policy`), deserialized from the user-authored config
//! - The fatal `BuildError` type

pub mod diagnostics;
pub mod error;
pub mod policy;

pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCategory};
pub use error::BuildError;
pub use policy::Policy;
