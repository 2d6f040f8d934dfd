//! Reporting strategies for a finished engine run
//!
//! Sinks only read a [`TileReport`]; they never recompute statistics, so
//! every variant reports the same numbers for the same run.

use crate::runtime::TileReport;

/// Terse human-readable summary
pub mod console;
/// Full JSON document of every tile map
pub mod json;

pub use console::ConsoleSink;
pub use json::JsonSink;

/// Destination for the tile maps of one engine run
pub trait ResultSink {
    /// Short name used in error messages
    const NAME: &'static str;

    /// Write the report
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer
    fn report(&mut self, report: &TileReport<'_>) -> std::io::Result<()>;
}

/// Which sink a generated artifact is built around
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    /// Console summary with the first few map entries
    #[default]
    Console,
    /// JSON dump of every map plus metadata
    Json,
}
