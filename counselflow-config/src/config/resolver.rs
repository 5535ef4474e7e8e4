//! Configuration resolution.
//!
//! [`ConfigurationResolver`] gathers the configured sources, merges them by
//! precedence, coerces the winners to their schema types, and validates the
//! result. It either returns a complete [`Settings`] or an error; no partial
//! snapshot ever escapes.

use crate::config::coerce::FieldReader;
use crate::config::environment::ProcessEnvironment;
use crate::config::loader::{ConfigSource, EnvFileLoader, SourceOrigin, DEFAULT_ENV_FILE};
use crate::config::merger::{ConfigMerger, ResolvedValues};
use crate::config::schema;
use crate::config::settings::Settings;
use crate::config::validator::SettingsValidator;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Where the environment layer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EnvLayer {
    /// Snapshot the real process environment at resolve time.
    Process,
    /// Use an injected map in place of the process environment.
    Injected(HashMap<String, String>),
    /// No environment layer.
    Disabled,
}

/// Resolves a [`Settings`] snapshot from layered sources.
///
/// By default the resolver reads `.env` from the working directory and the
/// process environment, which takes priority over the file.
///
/// # Examples
///
/// ```
/// use counselflow_config::ConfigurationResolver;
///
/// let settings = ConfigurationResolver::new()
///     .skip_env_file()
///     .with_env_vars([("SMTP_PORT", "2525"), ("DEBUG", "no")])
///     .resolve()
///     .unwrap();
///
/// assert_eq!(settings.smtp_port, 2525);
/// assert!(!settings.debug);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigurationResolver {
    env_file: Option<PathBuf>,
    env: EnvLayer,
    overrides: BTreeMap<String, String>,
}

impl Default for ConfigurationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationResolver {
    /// Resolver over `./.env` and the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            env: EnvLayer::Process,
            overrides: BTreeMap::new(),
        }
    }

    /// Read the environment file from `path` instead of `./.env`.
    #[must_use]
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Do not read any environment file.
    #[must_use]
    pub fn skip_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Use `vars` in place of the process environment.
    #[must_use]
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.env = EnvLayer::Injected(vars);
        self
    }

    /// Drop the environment layer.
    ///
    /// Schema keys are no longer read from the process environment. Variable
    /// references inside the env file are still expanded from it; see
    /// [`EnvFileLoader::load`].
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.env = EnvLayer::Disabled;
        self
    }

    /// Set a raw value that takes priority over every other source.
    ///
    /// The value goes through the same coercion as environment values.
    /// Unknown keys are rejected when resolving.
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// The environment file this resolver reads, if any.
    #[must_use]
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Resolve, coerce, and validate.
    ///
    /// # Errors
    ///
    /// Returns the first failure: an unreadable env file, a missing required
    /// value, a malformed value, an unknown environment name, or a validation
    /// violation.
    pub fn resolve(&self) -> Result<Settings> {
        self.resolve_with_report().map(Resolution::into_settings)
    }

    /// Like [`resolve`](Self::resolve), also reporting where each value came from.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_with_report(&self) -> Result<Resolution> {
        let sources = self.collect_sources()?;
        let values = ConfigMerger::resolve(&sources)?;
        let settings = Settings::from_reader(&FieldReader::new(&values))?;
        SettingsValidator::validate(&settings)?;

        if settings.is_production() && settings.debug {
            log::warn!("DEBUG is enabled in a production environment");
        }

        let overridden = values
            .iter()
            .filter(|field| field.origin != SourceOrigin::Default)
            .count();
        log::debug!(
            "resolved {} settings for {} ({overridden} from sources, {} defaults)",
            values.len(),
            settings.environment,
            values.len() - overridden
        );

        Ok(Resolution { settings, values })
    }

    /// Gather the configured layers, lowest precedence first.
    fn collect_sources(&self) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(ref path) = self.env_file {
            if let Some(file) = EnvFileLoader::load(path)? {
                sources.push(file);
            }
        }

        match &self.env {
            EnvLayer::Process => sources.push(ProcessEnvironment::capture()?),
            EnvLayer::Injected(vars) => sources.push(ProcessEnvironment::from_vars(vars.clone())),
            EnvLayer::Disabled => {}
        }

        if !self.overrides.is_empty() {
            if let Some(key) = self.overrides.keys().find(|key| !schema::is_known(key)) {
                return Err(Error::UnknownField { field: key.clone() });
            }
            let values = self
                .overrides
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            sources.push(ConfigSource::new(SourceOrigin::Override, values));
        }

        Ok(sources)
    }
}

/// A resolved snapshot together with per-key provenance.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The validated settings.
    pub settings: Settings,
    /// Raw merge results, including the origin of every key.
    pub values: ResolvedValues,
}

impl Resolution {
    /// Discard provenance and keep the settings.
    #[must_use]
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Where the value for `key` came from.
    #[must_use]
    pub fn origin_of(&self, key: &str) -> Option<&SourceOrigin> {
        self.values.origin_of(key)
    }

    /// Keys whose value did not come from the schema default, in schema order.
    pub fn overridden(&self) -> impl Iterator<Item = (&'static str, &SourceOrigin)> {
        self.values
            .iter()
            .filter(|field| field.origin != SourceOrigin::Default)
            .map(|field| (field.key, &field.origin))
    }
}
