//! Generator pipeline: load, resolve, validate, render and write
//!
//! The same validated [`TileParams`] can also be executed in-process over
//! host-owned regions, running exactly the runtime code a generated
//! artifact links against.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{ArtifactSpec, ParameterResolver, UnknownKeyPolicy, load_kv_config};
use crate::generator::template::{Bindings, Template};
use crate::io::configuration::{DEFAULT_ARTIFACT_PATH, DEFAULT_JSON_PATH};
use crate::io::error::{GeneratorError, Result, WithPath};
use crate::io::image::export_frame_as_png;
use crate::runtime::{Bump, TileParams, TileStatisticsEngine, Workspace};
use crate::sink::{ConsoleSink, JsonSink, ResultSink, SinkKind};

/// Everything one generator invocation needs
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Kv config file to read
    pub config: PathBuf,
    /// Where the artifact source is written
    pub output: PathBuf,
    /// Sink the artifact reports through
    pub sink: SinkKind,
    /// Path the JSON sink writes
    pub json_path: PathBuf,
    /// Handling of unrecognized config keys
    pub unknown_keys: UnknownKeyPolicy,
}

impl GeneratorOptions {
    /// Options with every default applied for `config`
    pub fn new(config: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
            output: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            sink: SinkKind::default(),
            json_path: PathBuf::from(DEFAULT_JSON_PATH),
            unknown_keys: UnknownKeyPolicy::default(),
        }
    }
}

/// A rendered artifact and the parameters baked into it
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    /// Resolved parameters
    pub spec: ArtifactSpec,
    /// Validated runtime parameters
    pub params: TileParams,
    /// Rendered Rust source
    pub source: String,
}

/// Load, resolve and validate the config named by `options`
///
/// # Errors
///
/// Returns any parse, resolution or geometry error
pub fn resolve_params(options: &GeneratorOptions) -> Result<(ArtifactSpec, TileParams)> {
    let raw = load_kv_config(&options.config)?;
    debug!(keys = raw.len(), path = %options.config.display(), "parsed config");

    let spec = ParameterResolver::new(options.unknown_keys).resolve(&raw)?;
    let params = spec.validate()?;
    debug!(
        tiles_x = params.tiles_x(),
        tiles_y = params.tiles_y(),
        "validated geometry"
    );

    Ok((spec, params))
}

/// Resolve parameters and render the artifact source without writing it
///
/// # Errors
///
/// Returns any error from [`resolve_params`] or [`Template::render`]
pub fn render_artifact(options: &GeneratorOptions) -> Result<GeneratedArtifact> {
    let (spec, params) = resolve_params(options)?;
    let template = Template::for_sink(options.sink);
    let source = template.render(&Bindings::new(params, &options.json_path))?;

    Ok(GeneratedArtifact {
        spec,
        params,
        source,
    })
}

/// Render the artifact and write it to `options.output`
///
/// # Errors
///
/// Returns any error from [`render_artifact`] or from writing the file
pub fn generate(options: &GeneratorOptions) -> Result<GeneratedArtifact> {
    let artifact = render_artifact(options)?;
    fs::write(&options.output, &artifact.source).with_path(&options.output, "write artifact")?;
    info!(
        path = %options.output.display(),
        sink = ?options.sink,
        "generated artifact"
    );
    Ok(artifact)
}

/// Host-owned backing regions for in-process runs
#[derive(Debug, Clone)]
pub struct HostRegion {
    bytes: Vec<u8>,
    floats: Vec<f32>,
}

impl HostRegion {
    /// Regions sized exactly for `params`
    pub fn for_params(params: &TileParams) -> Self {
        Self {
            bytes: vec![0; params.byte_region_len()],
            floats: vec![0.0; params.float_region_len()],
        }
    }

    /// Carve a workspace for `params` and bind an engine to it
    ///
    /// # Errors
    ///
    /// Returns an error if the regions are smaller than `params` needs
    pub fn engine(&mut self, params: TileParams) -> Result<TileStatisticsEngine<'_>> {
        let workspace = Workspace::carve(
            &params,
            &mut Bump::over(&mut self.bytes),
            &mut Bump::over(&mut self.floats),
        )?;
        Ok(TileStatisticsEngine::new(params, workspace))
    }
}

/// Numbers of one in-process run that outlive its buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Tile columns
    pub tiles_x: usize,
    /// Tile rows
    pub tiles_y: usize,
    /// Anomalous tiles
    pub anomalies: usize,
}

/// Run the engine once and report through `sink`
///
/// If `frame_png` is set the synthesized frame is also written there.
///
/// # Errors
///
/// Returns an error if the engine, the sink or the frame export fails
pub fn execute<S: ResultSink>(
    params: TileParams,
    sink: &mut S,
    frame_png: Option<&Path>,
) -> Result<RunSummary> {
    let mut region = HostRegion::for_params(&params);
    let report = region.engine(params)?.run()?;

    sink.report(&report).map_err(|source| GeneratorError::Sink {
        sink: S::NAME,
        source,
    })?;

    if let Some(path) = frame_png {
        export_frame_as_png(&report.frame, path)?;
        info!(path = %path.display(), "wrote synthesized frame");
    }

    Ok(RunSummary {
        tiles_x: report.tiles_x(),
        tiles_y: report.tiles_y(),
        anomalies: report.anomalies,
    })
}

/// Run in-process through the sink `kind` selects
///
/// Console reports go to stdout and JSON documents to `json_path`.
///
/// # Errors
///
/// Returns an error if the JSON file cannot be created or [`execute`] fails
pub fn execute_with(
    kind: SinkKind,
    params: TileParams,
    json_path: &Path,
    frame_png: Option<&Path>,
) -> Result<RunSummary> {
    match kind {
        SinkKind::Console => {
            let mut sink = ConsoleSink::new(std::io::stdout().lock());
            execute(params, &mut sink, frame_png)
        }
        SinkKind::Json => {
            let file = File::create(json_path).with_path(json_path, "create json report")?;
            let mut sink = JsonSink::new(BufWriter::new(file));
            let summary = execute(params, &mut sink, frame_png)?;
            info!(
                path = %json_path.display(),
                "wrote {}x{} tiles",
                summary.tiles_x,
                summary.tiles_y
            );
            Ok(summary)
        }
    }
}
