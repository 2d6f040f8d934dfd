/// Command-line interface and orchestration
pub mod cli;
/// Generator constants and parameter defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// PNG export of synthesized frames
pub mod image;
/// Tracing subscriber setup
pub mod logging;
