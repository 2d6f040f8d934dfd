//! Generator constants and parameter defaults

// Defaults applied before the config file is merged
/// Default frame width in samples
pub const DEFAULT_WIDTH: i64 = 160;
/// Default frame height in samples
pub const DEFAULT_HEIGHT: i64 = 120;
/// Default tile edge length
pub const DEFAULT_TILE: i64 = 32;
/// Default variance cutoff
pub const DEFAULT_VAR_THRESHOLD: f64 = 400.0;
/// Default frame synthesis seed
pub const DEFAULT_SEED: i64 = 1;

// High enough that no u8 tile mean can exceed it
/// Default mean cutoff
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f64 = 9999.0;

/// Keys the resolver accepts, in artifact declaration order
pub const RECOGNIZED_KEYS: [&str; 6] = [
    "width",
    "height",
    "tile",
    "var_threshold",
    "seed",
    "brightness_threshold",
];

/// Number of leading map entries echoed by the console report
pub const PREVIEW_LEN: usize = 8;

// Output settings
/// Artifact path used when none is given on the command line
pub const DEFAULT_ARTIFACT_PATH: &str = "out.rs";
/// Path the JSON sink writes when none is given on the command line
pub const DEFAULT_JSON_PATH: &str = "out.json";

/// Starts a comment that runs to the end of the line
pub const COMMENT_MARKER: char = '#';
/// Separates key from value
pub const KEY_VALUE_SEPARATOR: char = '=';
