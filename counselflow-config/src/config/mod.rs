//! Layered configuration for the CounselFlow backend.
//!
//! Every setting has a schema entry with a type and a default. At startup the
//! resolver layers three kinds of source over those defaults and produces one
//! immutable, validated [`Settings`] snapshot.
//!
//! # Configuration Precedence
//!
//! Sources are merged with the following precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigurationResolver::with_override`])
//! 2. Process environment variables, matched by exact key name
//! 3. The environment file (`.env` in the working directory by default)
//! 4. Built-in schema defaults
//!
//! An empty value still counts as defined and wins over lower layers.
//!
//! # Examples
//!
//! Loading from the real process environment and `./.env`:
//!
//! ```no_run
//! use counselflow_config::Settings;
//!
//! let settings = Settings::load().unwrap();
//! println!("{} {} ({})", settings.project_name, settings.version, settings.environment);
//! ```
//!
//! Resolving against an explicit file and injected variables:
//!
//! ```
//! use counselflow_config::{ConfigurationResolver, Environment};
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join(".env");
//! fs::write(&path, "ENVIRONMENT=staging\nSUPPORTED_LANGUAGES=en,fr,EN\n").unwrap();
//!
//! let settings = ConfigurationResolver::new()
//!     .with_env_file(&path)
//!     .with_env_vars([("ENVIRONMENT", "development")])
//!     .resolve()
//!     .unwrap();
//!
//! assert_eq!(settings.environment, Environment::Development);
//! assert_eq!(settings.supported_languages, vec!["en", "fr"]);
//! ```

pub mod coerce;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod resolver;
pub mod schema;
pub mod settings;
pub mod validator;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use environment::ProcessEnvironment;
pub use loader::{ConfigSource, EnvFileLoader, SourceOrigin, DEFAULT_ENV_FILE};
pub use merger::{ConfigMerger, ResolvedField, ResolvedValues};
pub use resolver::{ConfigurationResolver, Resolution};
pub use schema::{FieldGroup, FieldKind, FieldSpec, SCHEMA};
pub use settings::{Environment, Secret, Settings};
pub use validator::{SettingsValidator, PASSWORD_MIN_LENGTH_FLOOR};
