//! The resolved settings snapshot.
//!
//! [`Settings`] exposes every schema field by name, fully typed. It is built
//! once by the resolver and never mutated afterwards.

use crate::config::coerce::FieldReader;
use crate::config::resolver::ConfigurationResolver;
use crate::error::{Error, Result, REDACTED};
use crate::logging::LogLevel;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Deployment environment, a closed set.
///
/// # Examples
///
/// ```
/// use counselflow_config::Environment;
///
/// let env: Environment = "Production".parse().unwrap();
/// assert_eq!(env, Environment::Production);
/// assert!("staging_typo".parse::<Environment>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Pre-production.
    Staging,
    /// Live deployment; enables the production secret checks.
    Production,
}

impl Environment {
    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err(Error::UnknownEnvironmentName {
                value: s.to_string(),
            }),
        }
    }
}

/// A secret string whose `Debug` and `Serialize` output is masked.
///
/// Not `Display`; use [`Secret::expose`] to read the value.
///
/// # Examples
///
/// ```
/// use counselflow_config::Secret;
///
/// let key = Secret::new("s3cr3t");
/// assert_eq!(key.expose(), "s3cr3t");
/// assert!(!format!("{key:?}").contains("s3cr3t"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The plain-text value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED})")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// Fully resolved, validated configuration snapshot.
///
/// Field names are the snake-case forms of the schema keys
/// (`MAX_UPLOAD_SIZE` is `max_upload_size`).
///
/// # Examples
///
/// ```
/// use counselflow_config::{ConfigurationResolver, Environment};
///
/// let settings = ConfigurationResolver::new()
///     .skip_env_file()
///     .skip_env()
///     .resolve()
///     .unwrap();
///
/// assert_eq!(settings.environment, Environment::Development);
/// assert_eq!(settings.max_upload_size, 50 * 1024 * 1024);
/// assert_eq!(settings.smtp_host, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// `PROJECT_NAME`.
    pub project_name: String,
    /// `VERSION`.
    pub version: String,
    /// `DESCRIPTION`.
    pub description: String,
    /// `ENVIRONMENT`.
    pub environment: Environment,
    /// `DEBUG`.
    pub debug: bool,

    /// `SECRET_KEY`.
    pub secret_key: Secret,
    /// `ALGORITHM`.
    pub algorithm: String,
    /// `ACCESS_TOKEN_EXPIRE_MINUTES`.
    pub access_token_expire_minutes: i64,
    /// `REFRESH_TOKEN_EXPIRE_DAYS`.
    pub refresh_token_expire_days: i64,
    /// `PASSWORD_MIN_LENGTH`.
    pub password_min_length: i64,
    /// `PASSWORD_REQUIRE_SPECIAL`.
    pub password_require_special: bool,
    /// `MFA_ISSUER_NAME`.
    pub mfa_issuer_name: String,

    /// `SESSION_TIMEOUT_MINUTES`.
    pub session_timeout_minutes: i64,
    /// `MAX_LOGIN_ATTEMPTS`.
    pub max_login_attempts: i64,
    /// `LOCKOUT_DURATION_MINUTES`.
    pub lockout_duration_minutes: i64,

    /// `ENCRYPTION_ALGORITHM`.
    pub encryption_algorithm: String,
    /// `CLIENT_ISOLATION_ENABLED`.
    pub client_isolation_enabled: bool,
    /// `PRIVILEGE_PROTECTION_LEVEL`.
    pub privilege_protection_level: String,
    /// `DOCUMENT_ENCRYPTION_ENABLED`.
    pub document_encryption_enabled: bool,

    /// `DATABASE_URL`.
    pub database_url: Secret,
    /// `REDIS_URL`.
    pub redis_url: String,
    /// `LLAMA_INDEX_CACHE_DIR`.
    pub llama_index_cache_dir: String,
    /// `LANGCHAIN_CACHE_DIR`.
    pub langchain_cache_dir: String,

    /// `OPENAI_API_KEY`.
    pub openai_api_key: Option<Secret>,
    /// `ANTHROPIC_API_KEY`.
    pub anthropic_api_key: Option<Secret>,
    /// `GEMINI_API_KEY`.
    pub gemini_api_key: Option<Secret>,
    /// `LANGCHAIN_TRACING_V2`.
    pub langchain_tracing_v2: bool,
    /// `LANGCHAIN_API_KEY`.
    pub langchain_api_key: Option<Secret>,
    /// `AZURE_OPENAI_ENDPOINT`.
    pub azure_openai_endpoint: Option<String>,
    /// `AZURE_OPENAI_KEY`.
    pub azure_openai_key: Option<Secret>,

    /// `UPLOAD_FOLDER`.
    pub upload_folder: String,
    /// `MAX_UPLOAD_SIZE`, in bytes.
    pub max_upload_size: i64,
    /// `ALLOWED_EXTENSIONS`.
    pub allowed_extensions: Vec<String>,

    /// `SMTP_HOST`.
    pub smtp_host: Option<String>,
    /// `SMTP_PORT`.
    pub smtp_port: i64,
    /// `SMTP_USERNAME`.
    pub smtp_username: Option<String>,
    /// `SMTP_PASSWORD`.
    pub smtp_password: Option<Secret>,
    /// `SMTP_USE_TLS`.
    pub smtp_use_tls: bool,

    /// `LOG_LEVEL`.
    pub log_level: LogLevel,
    /// `LOG_FILE`.
    pub log_file: String,

    /// `RATE_LIMIT_PER_MINUTE`.
    pub rate_limit_per_minute: i64,

    /// `AUDIT_LOG_RETENTION_DAYS`.
    pub audit_log_retention_days: i64,
    /// `ENCRYPTION_KEY`.
    pub encryption_key: Option<Secret>,

    /// `SUPPORTED_JURISDICTIONS`.
    pub supported_jurisdictions: Vec<String>,
    /// `SUPPORTED_LANGUAGES`.
    pub supported_languages: Vec<String>,
}

impl Settings {
    /// Resolve from the process environment and `./.env`.
    ///
    /// # Errors
    ///
    /// Returns the first coercion or validation failure.
    pub fn load() -> Result<Self> {
        ConfigurationResolver::new().resolve()
    }

    /// Build the typed snapshot from resolved raw values (no validation).
    pub(crate) fn from_reader(r: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            project_name: r.text("PROJECT_NAME")?,
            version: r.text("VERSION")?,
            description: r.text("DESCRIPTION")?,
            environment: r.environment("ENVIRONMENT")?,
            debug: r.boolean("DEBUG")?,

            secret_key: r.secret("SECRET_KEY")?,
            algorithm: r.text("ALGORITHM")?,
            access_token_expire_minutes: r.integer("ACCESS_TOKEN_EXPIRE_MINUTES")?,
            refresh_token_expire_days: r.integer("REFRESH_TOKEN_EXPIRE_DAYS")?,
            password_min_length: r.integer("PASSWORD_MIN_LENGTH")?,
            password_require_special: r.boolean("PASSWORD_REQUIRE_SPECIAL")?,
            mfa_issuer_name: r.text("MFA_ISSUER_NAME")?,

            session_timeout_minutes: r.integer("SESSION_TIMEOUT_MINUTES")?,
            max_login_attempts: r.integer("MAX_LOGIN_ATTEMPTS")?,
            lockout_duration_minutes: r.integer("LOCKOUT_DURATION_MINUTES")?,

            encryption_algorithm: r.text("ENCRYPTION_ALGORITHM")?,
            client_isolation_enabled: r.boolean("CLIENT_ISOLATION_ENABLED")?,
            privilege_protection_level: r.text("PRIVILEGE_PROTECTION_LEVEL")?,
            document_encryption_enabled: r.boolean("DOCUMENT_ENCRYPTION_ENABLED")?,

            database_url: r.secret("DATABASE_URL")?,
            redis_url: r.text("REDIS_URL")?,
            llama_index_cache_dir: r.text("LLAMA_INDEX_CACHE_DIR")?,
            langchain_cache_dir: r.text("LANGCHAIN_CACHE_DIR")?,

            openai_api_key: r.optional_secret("OPENAI_API_KEY")?,
            anthropic_api_key: r.optional_secret("ANTHROPIC_API_KEY")?,
            gemini_api_key: r.optional_secret("GEMINI_API_KEY")?,
            langchain_tracing_v2: r.boolean("LANGCHAIN_TRACING_V2")?,
            langchain_api_key: r.optional_secret("LANGCHAIN_API_KEY")?,
            azure_openai_endpoint: r.optional("AZURE_OPENAI_ENDPOINT")?,
            azure_openai_key: r.optional_secret("AZURE_OPENAI_KEY")?,

            upload_folder: r.text("UPLOAD_FOLDER")?,
            max_upload_size: r.integer("MAX_UPLOAD_SIZE")?,
            allowed_extensions: r.list("ALLOWED_EXTENSIONS")?,

            smtp_host: r.optional("SMTP_HOST")?,
            smtp_port: r.integer("SMTP_PORT")?,
            smtp_username: r.optional("SMTP_USERNAME")?,
            smtp_password: r.optional_secret("SMTP_PASSWORD")?,
            smtp_use_tls: r.boolean("SMTP_USE_TLS")?,

            log_level: r.log_level("LOG_LEVEL")?,
            log_file: r.text("LOG_FILE")?,

            rate_limit_per_minute: r.integer("RATE_LIMIT_PER_MINUTE")?,

            audit_log_retention_days: r.integer("AUDIT_LOG_RETENTION_DAYS")?,
            encryption_key: r.optional_secret("ENCRYPTION_KEY")?,

            supported_jurisdictions: r.list("SUPPORTED_JURISDICTIONS")?,
            supported_languages: r.list("SUPPORTED_LANGUAGES")?,
        })
    }

    /// Whether this snapshot targets production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// The effective configuration as JSON, with secrets masked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use counselflow_config::ConfigurationResolver;
    ///
    /// let settings = ConfigurationResolver::new()
    ///     .skip_env_file()
    ///     .skip_env()
    ///     .resolve()
    ///     .unwrap();
    /// let dump = settings.redacted_json().unwrap();
    ///
    /// assert_eq!(dump["secret_key"], "********");
    /// assert_eq!(dump["environment"], "development");
    /// ```
    pub fn redacted_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
