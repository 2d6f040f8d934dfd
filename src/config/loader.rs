//! Kv config parsing
//!
//! One `key = value` pair per line. `#` starts a comment that runs to the
//! end of the line and blank lines are skipped. The line is split at its
//! first `=`; the value must be an optional `-`, one or more ASCII digits,
//! and optionally `.` followed by one or more digits. Values containing
//! `.` are stored as floats, all others as integers.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use num_traits::ToPrimitive;

use crate::io::configuration::{COMMENT_MARKER, KEY_VALUE_SEPARATOR};
use crate::io::error::{GeneratorError, Result, WithPath};

/// A parsed numeric value, keeping the kind the literal was written in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigValue {
    /// Literal without a decimal point
    Integer(i64),
    /// Literal with a decimal point
    Float(f64),
}

impl ToPrimitive for ConfigValue {
    // Floats truncate toward zero; out-of-range values yield None
    fn to_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(value) => Some(value),
            Self::Float(value) => value.to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match *self {
            Self::Integer(value) => value.to_u64(),
            Self::Float(value) => value.to_u64(),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match *self {
            Self::Integer(value) => value.to_f64(),
            Self::Float(value) => Some(value),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
        }
    }
}

/// A parsed value and the line it was last assigned on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEntry {
    /// Parsed value
    pub value: ConfigValue,
    /// 1-based line number
    pub line: usize,
}

/// Every key of one config file mapped to its last parsed value
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    path: PathBuf,
    entries: HashMap<String, RawEntry>,
}

impl RawConfig {
    /// Create an empty config attributed to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: HashMap::new(),
        }
    }

    /// File the entries were read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `key`, replacing any earlier assignment
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue, line: usize) {
        self.entries.insert(key.into(), RawEntry { value, line });
    }

    /// Last value assigned to `key`
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.entries.get(key).map(|entry| entry.value)
    }

    /// Last value and line assigned to `key`
    pub fn entry(&self, key: &str) -> Option<&RawEntry> {
        self.entries.get(key)
    }

    /// Iterate over every key in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file assigned no keys at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read and parse a kv config file
///
/// # Errors
///
/// Returns an error if the file cannot be read, or any error from [`parse_kv_config`]
pub fn load_kv_config(path: &Path) -> Result<RawConfig> {
    let text = fs::read_to_string(path).with_path(path, "read config")?;
    parse_kv_config(&text, path)
}

/// Parse kv config text, attributing errors to `path`
///
/// # Errors
///
/// Returns [`GeneratorError::ConfigSyntax`] for a line without `=` and
/// [`GeneratorError::ConfigValue`] for a value that is not a number
pub fn parse_kv_config(text: &str, path: &Path) -> Result<RawConfig> {
    let mut config = RawConfig::new(path);

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let content = strip_comment(raw_line).trim();
        if content.is_empty() {
            continue;
        }

        let Some((key, value)) = content.split_once(KEY_VALUE_SEPARATOR) else {
            return Err(GeneratorError::ConfigSyntax {
                path: path.to_path_buf(),
                line,
                content: content.to_string(),
            });
        };
        let value = value.trim();

        let parsed = parse_number(value).ok_or_else(|| GeneratorError::ConfigValue {
            path: path.to_path_buf(),
            line,
            value: value.to_string(),
        })?;

        config.insert(key.trim(), parsed, line);
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    line.split_once(COMMENT_MARKER)
        .map_or(line, |(content, _comment)| content)
}

/// Whether `text` matches `-?[0-9]+(\.[0-9]+)?`
pub fn is_numeric_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match unsigned.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(unsigned),
    }
}

/// Parse a numeric literal, keeping its written kind
///
/// Returns `None` if the grammar does not match or an integer literal
/// overflows `i64`.
pub fn parse_number(text: &str) -> Option<ConfigValue> {
    if !is_numeric_literal(text) {
        return None;
    }

    if text.contains('.') {
        text.parse().ok().map(ConfigValue::Float)
    } else {
        text.parse().ok().map(ConfigValue::Integer)
    }
}
