//! Error types for configuration resolution.
//!
//! Every variant is startup-fatal: a process that fails to resolve its
//! configuration must not continue with a partially valid snapshot.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration operations.
///
/// # Examples
///
/// ```
/// use counselflow_config::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(30)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Placeholder shown instead of secret values in error messages and dumps.
pub const REDACTED: &str = "********";

/// The error type for configuration resolution.
#[derive(Debug, Error)]
pub enum Error {
    /// A field without a default was not supplied by any source.
    #[error("missing required value for '{field}': no default and no source defines it")]
    MissingRequiredValue {
        /// The schema key that was missing.
        field: String,
    },

    /// A raw value could not be coerced to the field's type.
    #[error("malformed value for '{field}' ('{value}'): {reason}")]
    MalformedValue {
        /// The schema key.
        field: String,
        /// The raw value that was considered.
        value: String,
        /// Why coercion failed.
        reason: String,
    },

    /// A coerced snapshot broke a single-field or cross-field rule.
    #[error("validation failed for '{field}' (value '{value}'): {rule}")]
    ValidationViolation {
        /// The schema key that violated the rule.
        field: String,
        /// The value considered (redacted for secrets).
        value: String,
        /// The rule that was breached.
        rule: String,
    },

    /// `ENVIRONMENT` named something outside the closed set.
    #[error(
        "unknown environment name '{value}' for 'ENVIRONMENT' \
         (expected one of: development, staging, production)"
    )]
    UnknownEnvironmentName {
        /// The rejected environment name.
        value: String,
    },

    /// The local environment file exists but could not be read or parsed.
    #[error("cannot load environment file {}: {reason}", path.display())]
    EnvFile {
        /// Path of the environment file.
        path: PathBuf,
        /// The underlying read or parse failure.
        reason: String,
    },

    /// A programmatic override named a key the schema does not know.
    #[error("unknown configuration field '{field}'")]
    UnknownField {
        /// The unrecognized key.
        field: String,
    },

    /// The redacted settings dump could not be produced.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// The schema key this error is about, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use counselflow_config::Error;
    ///
    /// let err = Error::UnknownEnvironmentName { value: "qa".into() };
    /// assert_eq!(err.field(), Some("ENVIRONMENT"));
    /// ```
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredValue { field }
            | Self::MalformedValue { field, .. }
            | Self::ValidationViolation { field, .. }
            | Self::UnknownField { field } => Some(field),
            Self::UnknownEnvironmentName { .. } => Some("ENVIRONMENT"),
            Self::EnvFile { .. } | Self::Serialization(_) => None,
        }
    }

    /// Check if error is a post-coercion validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationViolation { .. })
    }

    /// Check if error is a type-coercion failure.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedValue { .. })
    }
}
