//! Logging infrastructure.
//!
//! This module maps the `LOG_LEVEL` setting onto the `log` facade and provides
//! a simple stderr-based logger for processes that do not install their own.

use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::fmt;

/// Log verbosity as spelled in the `LOG_LEVEL` setting.
///
/// Levels are ordered from most verbose (`Debug`) to least (`Critical`).
///
/// # Examples
///
/// ```
/// use counselflow_config::LogLevel;
///
/// assert!(LogLevel::Debug < LogLevel::Info);
/// assert!(LogLevel::Error < LogLevel::Critical);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Routine operational messages.
    #[default]
    Info,
    /// Something unexpected that did not stop the operation.
    Warning,
    /// An operation failed.
    Error,
    /// The service cannot continue.
    Critical,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes `DEBUG`, `INFO`, `WARNING` (or `WARN`), `ERROR` and
    /// `CRITICAL`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use counselflow_config::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("info").unwrap(), LogLevel::Info);
    /// assert_eq!(LogLevel::parse("WARN").unwrap(), LogLevel::Warning);
    /// assert!(LogLevel::parse("verbose").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(format!(
                "invalid log level: {s} (expected DEBUG, INFO, WARNING, ERROR or CRITICAL)"
            )),
        }
    }

    /// The equivalent `log` crate filter.
    ///
    /// `log` has no critical level, so `Critical` and `Error` both map to
    /// [`LevelFilter::Error`].
    #[must_use]
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::Debug,
            Self::Info => LevelFilter::Info,
            Self::Warning => LevelFilter::Warn,
            Self::Error | Self::Critical => LevelFilter::Error,
        }
    }
}

/// A simple stderr logger for the `log` facade.
///
/// # Examples
///
/// ```
/// use counselflow_config::{LogLevel, Logger};
/// use log::Log;
///
/// let logger = Logger::new(LogLevel::Warning);
/// assert_eq!(logger.level(), LogLevel::Warning);
/// assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Info).build()));
/// ```
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.to_level_filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs a stderr [`Logger`] at `level` as the global `log` backend.
///
/// Only the first call in a process installs a logger; later calls return
/// an error and leave the existing logger in place.
///
/// # Errors
///
/// Returns [`log::SetLoggerError`] if a logger was already installed.
///
/// # Examples
///
/// ```
/// use counselflow_config::{init_logger, LogLevel};
///
/// let first = init_logger(LogLevel::Info);
/// assert!(first.is_ok());
/// assert!(init_logger(LogLevel::Debug).is_err());
/// ```
pub fn init_logger(level: LogLevel) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger::new(level)))?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}
