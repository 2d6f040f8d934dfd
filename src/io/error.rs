//! Error types and context management for generator operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::runtime::RuntimeError;

/// Main error type for all generator operations
#[derive(Debug)]
pub enum GeneratorError {
    /// A non-empty, non-comment config line has no `=`
    ConfigSyntax {
        /// Config file being parsed
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// The offending line with comments and surrounding whitespace removed
        content: String,
    },

    /// The value side of a `key = value` line is not a number
    ///
    /// Also raised for integer literals that do not fit in 64 bits.
    ConfigValue {
        /// Config file being parsed
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// The offending value text
        value: String,
    },

    /// A key outside the recognized parameter set under strict resolution
    UnknownKey {
        /// Config file the key came from
        path: PathBuf,
        /// 1-based line number of the key's last occurrence
        line: usize,
        /// The unrecognized key
        key: String,
    },

    /// Frame or tile dimensions that would make the detector divide by zero
    /// or read out of bounds
    InvalidGeometry {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Resolved value of the parameter
        value: i64,
        /// Why the value cannot be used
        reason: &'static str,
    },

    /// Parameter validation or coercion failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A template placeholder is not present exactly once
    Template {
        /// Template variant being rendered
        template: &'static str,
        /// Placeholder token
        placeholder: &'static str,
        /// How many times the token was found
        occurrences: usize,
    },

    /// Runtime buffer carving failed
    Runtime(RuntimeError),

    /// A result sink failed to write its report
    Sink {
        /// Name of the sink
        sink: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save the synthesized frame to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigSyntax {
                path,
                line,
                content,
            } => {
                write!(
                    f,
                    "{}:{line}: expected 'key = value', got: {content}",
                    path.display()
                )
            }
            Self::ConfigValue { path, line, value } => {
                write!(
                    f,
                    "{}:{line}: value must be number, got: {value}",
                    path.display()
                )
            }
            Self::UnknownKey { path, line, key } => {
                write!(f, "{}:{line}: unknown key '{key}'", path.display())
            }
            Self::InvalidGeometry {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid geometry: {parameter} = {value} ({reason})")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Template {
                template,
                placeholder,
                occurrences,
            } => {
                write!(
                    f,
                    "Template '{template}' contains placeholder {placeholder} {occurrences} times (expected exactly once)"
                )
            }
            Self::Runtime(source) => write!(f, "Runtime error: {source}"),
            Self::Sink { sink, source } => {
                write!(f, "Failed to write {sink} report: {source}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export frame to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::Sink { source, .. } => Some(source),
            Self::Runtime(source) => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generator results
pub type Result<T> = std::result::Result<T, GeneratorError>;

impl From<RuntimeError> for GeneratorError {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(err)
    }
}

/// Attaches the path and operation to raw I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into a [`GeneratorError::FileSystem`]
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| GeneratorError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GeneratorError {
    GeneratorError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid geometry error
pub const fn invalid_geometry(
    parameter: &'static str,
    value: i64,
    reason: &'static str,
) -> GeneratorError {
    GeneratorError::InvalidGeometry {
        parameter,
        value,
        reason,
    }
}
