//! Command-line interface for turning a kv config into a detector artifact

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::info;

use crate::config::UnknownKeyPolicy;
use crate::generator::pipeline::{GeneratorOptions, RunSummary, execute_with, generate};
use crate::io::configuration::{DEFAULT_ARTIFACT_PATH, DEFAULT_JSON_PATH};
use crate::io::error::Result;
use crate::sink::SinkKind;

#[derive(Parser, Debug)]
#[command(name = "tilebloom")]
#[command(
    author,
    version,
    about = "Generate a heapless per-tile anomaly detector from a kv parameter file"
)]
/// Command-line arguments for the generator
pub struct Cli {
    /// Kv parameter file (`key = value` per line)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Where to write the generated Rust source
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_ARTIFACT_PATH)]
    pub output: PathBuf,

    /// Result sink the generated detector reports through
    #[arg(long, value_enum, default_value_t = SinkKind::Console)]
    pub sink: SinkKind,

    /// Path the JSON sink writes
    #[arg(long, value_name = "PATH", default_value = DEFAULT_JSON_PATH)]
    pub json_out: PathBuf,

    /// Reject unrecognized config keys instead of dropping them
    #[arg(long)]
    pub strict: bool,

    /// Also run the detector in-process and report through the sink
    #[arg(long)]
    pub run: bool,

    /// Write the synthesized frame as a grayscale PNG (with --run)
    #[arg(long, value_name = "PNG", requires = "run")]
    pub dump_frame: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Unknown-key policy selected by `--strict`
    pub const fn unknown_key_policy(&self) -> UnknownKeyPolicy {
        if self.strict {
            UnknownKeyPolicy::Reject
        } else {
            UnknownKeyPolicy::Drop
        }
    }

    /// Generator options carried by these arguments
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            config: self.config.clone(),
            output: self.output.clone(),
            sink: self.sink,
            json_path: self.json_out.clone(),
            unknown_keys: self.unknown_key_policy(),
        }
    }
}

/// Exit status for an argument error kind: success for help and version, 1 otherwise
pub const fn usage_exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

/// Print clap's message for `err` and return its exit status
// Allow print for clap's own usage and help text
#[allow(clippy::print_stderr)]
pub fn usage_exit(err: &clap::Error) -> ExitCode {
    if err.print().is_err() {
        eprintln!("{err}");
    }
    usage_exit_code(err.kind())
}

/// Orchestrates one generator invocation
pub struct ConfigProcessor {
    cli: Cli,
}

impl ConfigProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Generate the artifact and, with `--run`, execute it in-process
    ///
    /// Returns the in-process run summary when one was requested.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing, resolution, validation, rendering,
    /// writing or the in-process run fails
    pub fn process(&self) -> Result<Option<RunSummary>> {
        let options = self.cli.generator_options();
        let artifact = generate(&options)?;

        if !self.cli.run {
            return Ok(None);
        }

        let summary = execute_with(
            self.cli.sink,
            artifact.params,
            &self.cli.json_out,
            self.cli.dump_frame.as_deref(),
        )?;
        info!(
            anomalies = summary.anomalies,
            tiles = summary.tiles_x * summary.tiles_y,
            "in-process run finished"
        );
        Ok(Some(summary))
    }
}
