//! Artifact generation
//!
//! This module contains the generator proper:
//! - Embedded artifact templates and placeholder substitution
//! - The load, resolve, validate, render and write pipeline
//! - In-process execution of the same runtime the artifact links

/// Load, resolve, validate, render, write and in-process execution
pub mod pipeline;
/// Embedded artifact source with an enumerated placeholder set
pub mod template;

pub use pipeline::{GeneratedArtifact, GeneratorOptions, HostRegion, RunSummary};
pub use template::{Bindings, Placeholder, Template};
