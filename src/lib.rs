//! Configuration-driven generator for heapless per-tile anomaly detectors
//!
//! A small kv parameter file is parsed, merged over defaults and coerced
//! into an [`config::ArtifactSpec`]. The spec is baked into Rust source for
//! a detector that synthesizes a deterministic frame, computes per-tile
//! mean and variance over fixed-capacity buffers, classifies anomalies and
//! reports through a console or JSON sink.

#![deny(unsafe_code)]

/// Parameter parsing, resolution and validation
pub mod config;
/// Artifact templates and the generation pipeline
pub mod generator;
/// Command line, errors, constants, logging and image output
pub mod io;
/// Heapless runtime linked by generated detectors
pub mod runtime;
/// Console and JSON result sinks
pub mod sink;

pub use io::error::{GeneratorError, Result};
