//! Default merging with explicit unknown-key and coercion policies

use std::collections::HashMap;

use num_traits::ToPrimitive;
use tracing::{debug, info, warn};

use crate::config::loader::{ConfigValue, RawConfig};
use crate::config::spec::{ArtifactSpec, NumericKind, Parameter};
use crate::io::error::{GeneratorError, Result, invalid_parameter};

/// What to do with config keys outside the recognized parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeyPolicy {
    /// Discard silently (logged at debug level)
    #[default]
    Drop,
    /// Fail on the first unknown key in line order
    Reject,
}

/// Keep only recognized keys, applying `policy` to the rest
///
/// The result is ordered by the line each key was last assigned on.
///
/// # Errors
///
/// Returns [`GeneratorError::UnknownKey`] under [`UnknownKeyPolicy::Reject`]
pub fn drop_unknown_keys(
    raw: &RawConfig,
    policy: UnknownKeyPolicy,
) -> Result<Vec<(Parameter, ConfigValue)>> {
    let mut entries: Vec<_> = raw.iter().collect();
    entries.sort_by_key(|(_, entry)| entry.line);

    let mut recognized = Vec::with_capacity(entries.len());
    for (key, entry) in entries {
        match Parameter::from_key(key) {
            Some(parameter) => recognized.push((parameter, entry.value)),
            None => match policy {
                UnknownKeyPolicy::Drop => {
                    debug!(key, line = entry.line, "dropping unrecognized key");
                }
                UnknownKeyPolicy::Reject => {
                    return Err(GeneratorError::UnknownKey {
                        path: raw.path().to_path_buf(),
                        line: entry.line,
                        key: key.to_string(),
                    });
                }
            },
        }
    }

    Ok(recognized)
}

/// Force `value` into the numeric kind `parameter` requires
///
/// Fractional values for integer parameters truncate toward zero and
/// integer values for float parameters widen. Neither is an error.
///
/// # Errors
///
/// Returns an error if a fractional value lies outside the `i64` range
pub fn coerce_numeric_kind(parameter: Parameter, value: ConfigValue) -> Result<ConfigValue> {
    match (parameter.kind(), value) {
        (NumericKind::Integer, ConfigValue::Integer(_))
        | (NumericKind::Float, ConfigValue::Float(_)) => Ok(value),
        (NumericKind::Integer, ConfigValue::Float(fractional)) => {
            let truncated = value.to_i64().ok_or_else(|| {
                invalid_parameter(parameter.key(), &value, &"out of integer range")
            })?;
            if fractional.fract() != 0.0 {
                warn!(
                    parameter = parameter.key(),
                    from = fractional,
                    to = truncated,
                    "truncating fractional value"
                );
            }
            Ok(ConfigValue::Integer(truncated))
        }
        (NumericKind::Float, ConfigValue::Integer(_)) => value
            .to_f64()
            .map(ConfigValue::Float)
            .ok_or_else(|| invalid_parameter(parameter.key(), &value, &"not representable")),
    }
}

/// Merges a parsed config over the defaults and coerces every field
#[derive(Debug, Clone, Default)]
pub struct ParameterResolver {
    policy: UnknownKeyPolicy,
    defaults: ArtifactSpec,
}

impl ParameterResolver {
    /// Create a resolver over the built-in defaults
    pub fn new(policy: UnknownKeyPolicy) -> Self {
        Self {
            policy,
            defaults: ArtifactSpec::default(),
        }
    }

    /// Replace the defaults the config is merged over
    #[must_use]
    pub const fn with_defaults(mut self, defaults: ArtifactSpec) -> Self {
        self.defaults = defaults;
        self
    }

    /// Unknown-key policy in effect
    pub const fn policy(&self) -> UnknownKeyPolicy {
        self.policy
    }

    /// Resolve `raw` into a fully typed spec
    ///
    /// # Errors
    ///
    /// Returns any error from [`drop_unknown_keys`] or [`coerce_numeric_kind`]
    pub fn resolve(&self, raw: &RawConfig) -> Result<ArtifactSpec> {
        let mut merged: HashMap<Parameter, ConfigValue> = Parameter::ALL
            .into_iter()
            .map(|parameter| (parameter, self.defaults.value(parameter)))
            .collect();
        merged.extend(drop_unknown_keys(raw, self.policy)?);

        let mut spec = self.defaults;
        for parameter in Parameter::ALL {
            if let Some(&value) = merged.get(&parameter) {
                spec.assign(parameter, coerce_numeric_kind(parameter, value)?)?;
            }
        }

        info!(path = %raw.path().display(), "resolved parameters {spec}");
        Ok(spec)
    }
}
