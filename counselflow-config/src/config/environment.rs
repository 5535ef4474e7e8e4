//! Process environment capture.
//!
//! The resolver never calls `std::env::var` per field. Instead it takes one
//! snapshot of the schema keys present in the environment, or accepts an
//! injected map in its place, so resolution can be exercised without mutating
//! real process state.

use crate::config::loader::{ConfigSource, SourceOrigin};
use crate::config::schema::{FieldSpec, SCHEMA};
use crate::error::{Error, Result, REDACTED};
use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};

/// Builds the environment layer of configuration.
///
/// # Examples
///
/// ```
/// use counselflow_config::config::ProcessEnvironment;
///
/// let source = ProcessEnvironment::from_vars([
///     ("DEBUG", "false"),
///     ("UNRELATED", "ignored"),
/// ]);
/// assert_eq!(source.get("DEBUG"), Some("false"));
/// assert_eq!(source.get("UNRELATED"), None);
/// ```
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Snapshot schema keys from the real process environment.
    ///
    /// Names match exactly (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedValue`] if a schema key holds a value that
    /// is not valid UTF-8.
    pub fn capture() -> Result<ConfigSource> {
        Self::from_os_vars(env::vars_os())
    }

    /// Build the environment layer from OS strings.
    ///
    /// Variables whose names are not schema keys are skipped, whatever their
    /// encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedValue`] if a schema key holds a value that
    /// is not valid UTF-8.
    pub fn from_os_vars<I>(vars: I) -> Result<ConfigSource>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut values = HashMap::new();

        for (name, value) in vars {
            let Some(spec) = schema_field(&name) else {
                continue;
            };

            let value = value.into_string().map_err(|raw| Error::MalformedValue {
                field: spec.key.into(),
                value: if spec.secret {
                    REDACTED.into()
                } else {
                    raw.to_string_lossy().into_owned()
                },
                reason: "value is not valid UTF-8".into(),
            })?;

            values.insert(spec.key.to_string(), value);
        }

        Ok(ConfigSource::new(SourceOrigin::Environment, values))
    }

    /// Build the environment layer from an injected map instead of the real
    /// environment. Keys outside the schema are dropped.
    pub fn from_vars<I, K, V>(vars: I) -> ConfigSource
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| -> (String, String) { (k.into(), v.into()) })
            .filter(|(k, _)| SCHEMA.iter().any(|spec| spec.key == k.as_str()))
            .collect();

        ConfigSource::new(SourceOrigin::Environment, values)
    }
}

fn schema_field(name: &OsStr) -> Option<&'static FieldSpec> {
    let name = name.to_str()?;
    SCHEMA.iter().find(|spec| spec.key == name)
}
