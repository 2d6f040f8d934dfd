//! The resolved parameter set and its geometry validation

use std::fmt;

use crate::config::loader::ConfigValue;
use crate::io::configuration::{
    DEFAULT_BRIGHTNESS_THRESHOLD, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_TILE,
    DEFAULT_VAR_THRESHOLD, DEFAULT_WIDTH, RECOGNIZED_KEYS,
};
use crate::io::error::{Result, invalid_geometry, invalid_parameter};
use crate::runtime::TileParams;

/// Numeric kind a parameter is coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Truncated toward zero
    Integer,
    /// Widened to floating point
    Float,
}

/// One of the six recognized parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    /// Frame width in samples
    Width,
    /// Frame height in samples
    Height,
    /// Tile edge length
    Tile,
    /// Variance cutoff
    VarThreshold,
    /// Frame synthesis seed
    Seed,
    /// Mean cutoff
    BrightnessThreshold,
}

impl Parameter {
    /// Every parameter in declaration order
    pub const ALL: [Self; 6] = [
        Self::Width,
        Self::Height,
        Self::Tile,
        Self::VarThreshold,
        Self::Seed,
        Self::BrightnessThreshold,
    ];

    /// Config key naming this parameter
    // Discriminants are 0..6, matching RECOGNIZED_KEYS
    #[allow(clippy::indexing_slicing)]
    pub const fn key(self) -> &'static str {
        RECOGNIZED_KEYS[self as usize]
    }

    /// Look up a parameter by config key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|parameter| parameter.key() == key)
    }

    /// Kind the resolver coerces this parameter to
    pub const fn kind(self) -> NumericKind {
        match self {
            Self::Width | Self::Height | Self::Tile | Self::Seed => NumericKind::Integer,
            Self::VarThreshold | Self::BrightnessThreshold => NumericKind::Float,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fully resolved, typed parameters of one generator run
///
/// No sign or magnitude checks happen during resolution; [`ArtifactSpec::validate`]
/// is the only gate between these values and the statistics engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtifactSpec {
    /// Frame width in samples
    pub width: i64,
    /// Frame height in samples
    pub height: i64,
    /// Tile edge length
    pub tile: i64,
    /// Variance cutoff
    pub var_threshold: f64,
    /// Frame synthesis seed
    pub seed: i64,
    /// Mean cutoff
    pub brightness_threshold: f64,
}

impl Default for ArtifactSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile: DEFAULT_TILE,
            var_threshold: DEFAULT_VAR_THRESHOLD,
            seed: DEFAULT_SEED,
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
        }
    }
}

impl ArtifactSpec {
    /// Current value of `parameter` in its resolved kind
    pub const fn value(&self, parameter: Parameter) -> ConfigValue {
        match parameter {
            Parameter::Width => ConfigValue::Integer(self.width),
            Parameter::Height => ConfigValue::Integer(self.height),
            Parameter::Tile => ConfigValue::Integer(self.tile),
            Parameter::Seed => ConfigValue::Integer(self.seed),
            Parameter::VarThreshold => ConfigValue::Float(self.var_threshold),
            Parameter::BrightnessThreshold => ConfigValue::Float(self.brightness_threshold),
        }
    }

    /// Overwrite `parameter` with an already coerced value
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not of the parameter's [`NumericKind`]
    pub fn assign(&mut self, parameter: Parameter, value: ConfigValue) -> Result<()> {
        match (parameter, value) {
            (Parameter::Width, ConfigValue::Integer(v)) => self.width = v,
            (Parameter::Height, ConfigValue::Integer(v)) => self.height = v,
            (Parameter::Tile, ConfigValue::Integer(v)) => self.tile = v,
            (Parameter::Seed, ConfigValue::Integer(v)) => self.seed = v,
            (Parameter::VarThreshold, ConfigValue::Float(v)) => self.var_threshold = v,
            (Parameter::BrightnessThreshold, ConfigValue::Float(v)) => {
                self.brightness_threshold = v;
            }
            _ => {
                return Err(invalid_parameter(
                    parameter.key(),
                    &value,
                    &format!("expected {:?} value", parameter.kind()),
                ));
            }
        }
        Ok(())
    }

    /// Check geometry and narrow every field to what the runtime uses
    ///
    /// Width, height and tile must be positive and every buffer of a run
    /// must fit in one allocation (see [`TileParams::checked_region_bytes`]).
    /// The seed is reduced modulo 2^32. Thresholds are narrowed to `f32`
    /// and must stay finite.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeneratorError::InvalidGeometry`] for unusable
    /// dimensions and [`crate::GeneratorError::InvalidParameter`] for a
    /// threshold that overflows `f32`
    pub fn validate(&self) -> Result<TileParams> {
        let width = positive_dimension(Parameter::Width, self.width)?;
        let height = positive_dimension(Parameter::Height, self.height)?;
        let tile = positive_dimension(Parameter::Tile, self.tile)?;

        let params = TileParams {
            width,
            height,
            tile,
            var_threshold: narrow_threshold(Parameter::VarThreshold, self.var_threshold)?,
            brightness_threshold: narrow_threshold(
                Parameter::BrightnessThreshold,
                self.brightness_threshold,
            )?,
            seed: self.seed as u32,
        };

        if params.checked_region_bytes().is_none() {
            return Err(invalid_geometry(
                "width*height",
                self.width,
                "run buffers exceed the addressable size",
            ));
        }

        Ok(params)
    }
}

impl fmt::Display for ArtifactSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (position, parameter) in Parameter::ALL.into_iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{parameter}: {}", self.value(parameter))?;
        }
        write!(f, "}}")
    }
}

fn positive_dimension(parameter: Parameter, value: i64) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|&dimension| dimension > 0)
        .ok_or_else(|| invalid_geometry(parameter.key(), value, "must be a positive integer"))
}

fn narrow_threshold(parameter: Parameter, value: f64) -> Result<f32> {
    let narrowed = value as f32;
    if narrowed.is_finite() {
        Ok(narrowed)
    } else {
        Err(invalid_parameter(
            parameter.key(),
            &value,
            &"must be representable as a finite f32",
        ))
    }
}
