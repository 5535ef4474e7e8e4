#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # counselflow-config
//!
//! Process configuration for the CounselFlow backend.
//!
//! This library resolves every setting the backend needs from built-in
//! defaults, an optional `.env` file, and the process environment, coerces
//! the raw strings to typed values, validates them, and exposes the result as
//! an immutable snapshot.
//!
//! ## Core Types
//!
//! - [`ConfigurationResolver`]: Builds a snapshot from layered sources
//! - [`Settings`], [`Environment`] and [`Secret`]: The resolved snapshot
//! - [`SettingsHandle`]: Shared, reloadable access to the active snapshot
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use counselflow_config::{ConfigurationResolver, Environment};
//!
//! let settings = ConfigurationResolver::new()
//!     .skip_env_file()
//!     .with_env_vars([("ENVIRONMENT", "Staging"), ("MAX_UPLOAD_SIZE", "1048576")])
//!     .resolve()
//!     .unwrap();
//!
//! assert_eq!(settings.environment, Environment::Staging);
//! assert_eq!(settings.max_upload_size, 1_048_576);
//! assert_eq!(settings.smtp_port, 587);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod logging;

// Re-export key types at crate root for convenience
pub use config::{ConfigurationResolver, Environment, Resolution, Secret, Settings};
pub use context::SettingsHandle;
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
