//! Local environment file loading.
//!
//! This module reads the optional `KEY=VALUE` file (`.env` by default) into a
//! [`ConfigSource`] without touching the process environment.

use crate::config::schema;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default name of the local environment file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Where a resolved value came from.
///
/// Ordered from lowest to highest precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    /// The schema-declared default.
    Default,
    /// A local environment file.
    EnvFile(PathBuf),
    /// The process environment (or a map injected in its place).
    Environment,
    /// A programmatic override.
    Override,
}

impl SourceOrigin {
    /// Precedence level; higher values take priority.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Default => 0,
            Self::EnvFile(_) => 1,
            Self::Environment => 2,
            Self::Override => 3,
        }
    }
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::EnvFile(path) => write!(f, "env file {}", path.display()),
            Self::Environment => write!(f, "environment"),
            Self::Override => write!(f, "override"),
        }
    }
}

/// One layer of raw string values with its precedence.
///
/// # Examples
///
/// ```
/// use counselflow_config::config::{ConfigSource, SourceOrigin};
/// use std::collections::HashMap;
///
/// let mut values = HashMap::new();
/// values.insert("DEBUG".to_string(), "false".to_string());
///
/// let source = ConfigSource::new(SourceOrigin::Environment, values);
/// assert_eq!(source.precedence, 2);
/// assert_eq!(source.get("DEBUG"), Some("false"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Where these values were read from.
    pub origin: SourceOrigin,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Raw values keyed by schema key.
    pub values: HashMap<String, String>,
}

impl ConfigSource {
    /// Create a source; precedence follows from the origin.
    #[must_use]
    pub fn new(origin: SourceOrigin, values: HashMap<String, String>) -> Self {
        Self {
            precedence: origin.precedence(),
            origin,
            values,
        }
    }

    /// Raw value for `key`, if this source defines it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether this source defines no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Loads the local environment file.
pub struct EnvFileLoader;

impl EnvFileLoader {
    /// Load and parse an environment file.
    ///
    /// Returns `Ok(None)` when the file does not exist. Blank lines and
    /// `#` comments are skipped; quoting and an `export ` prefix are honoured.
    /// When a key appears more than once, the last line wins. Keys outside the
    /// schema are logged and ignored.
    ///
    /// Unquoted and double-quoted values expand `$VAR` and `${VAR}`. The real
    /// process environment is consulted first, then keys defined earlier in
    /// the same file. Single-quoted values are taken literally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvFile`] if the file exists but cannot be read or a
    /// line cannot be parsed.
    pub fn load(path: &Path) -> Result<Option<ConfigSource>> {
        if !path.exists() {
            log::debug!("no environment file at {}", path.display());
            return Ok(None);
        }

        if !path.is_file() {
            return Err(Error::EnvFile {
                path: path.to_path_buf(),
                reason: "not a regular file".into(),
            });
        }

        let env_file_error = |e: dotenvy::Error| Error::EnvFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut values = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(env_file_error)? {
            let (key, value) = item.map_err(env_file_error)?;

            if !schema::is_known(&key) {
                log::warn!(
                    "ignoring unrecognized key '{key}' in environment file {}",
                    path.display()
                );
                continue;
            }

            values.insert(key, value);
        }

        log::debug!(
            "loaded {} setting(s) from environment file {}",
            values.len(),
            path.display()
        );

        Ok(Some(ConfigSource::new(
            SourceOrigin::EnvFile(path.to_path_buf()),
            values,
        )))
    }
}
