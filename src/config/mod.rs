//! Parameter resolution pipeline
//!
//! Parsing, default merging and coercion turn a kv config file into the
//! immutable [`ArtifactSpec`] that fully determines a generated detector.

/// Line-oriented `key = value` file parsing
pub mod loader;
/// Default merging, unknown-key policy and numeric-kind coercion
pub mod resolver;
/// The resolved parameter set and its geometry validation
pub mod spec;

pub use loader::{ConfigValue, RawConfig, RawEntry, load_kv_config, parse_kv_config};
pub use resolver::{ParameterResolver, UnknownKeyPolicy, coerce_numeric_kind, drop_unknown_keys};
pub use spec::{ArtifactSpec, NumericKind, Parameter};
