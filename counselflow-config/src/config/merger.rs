//! Source merging and precedence handling.
//!
//! For every schema entry the highest-precedence source that defines the key
//! wins; when no source defines it the schema default applies.

use crate::config::loader::{ConfigSource, SourceOrigin};
use crate::config::schema::{FieldSpec, SCHEMA};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// The raw outcome of merging for one schema key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Schema key.
    pub key: &'static str,
    /// Raw string from the winning source; `None` when the default applies.
    pub raw: Option<String>,
    /// Which source supplied the value.
    pub origin: SourceOrigin,
}

/// Raw values for every schema key, before type coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedValues {
    fields: HashMap<&'static str, ResolvedField>,
}

impl ResolvedValues {
    /// The merge result for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResolvedField> {
        self.fields.get(key)
    }

    /// Where the value for `key` came from.
    #[must_use]
    pub fn origin_of(&self, key: &str) -> Option<&SourceOrigin> {
        self.get(key).map(|field| &field.origin)
    }

    /// Number of resolved keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolved fields in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedField> {
        SCHEMA.iter().filter_map(|spec| self.fields.get(spec.key))
    }
}

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use counselflow_config::config::{ConfigMerger, ConfigSource, SourceOrigin};
/// use std::collections::HashMap;
/// use std::path::PathBuf;
///
/// let file = ConfigSource::new(
///     SourceOrigin::EnvFile(PathBuf::from(".env")),
///     HashMap::from([("LOG_LEVEL".to_string(), "DEBUG".to_string())]),
/// );
/// let env = ConfigSource::new(
///     SourceOrigin::Environment,
///     HashMap::from([("LOG_LEVEL".to_string(), "ERROR".to_string())]),
/// );
///
/// let resolved = ConfigMerger::resolve(&[file, env]).unwrap();
/// assert_eq!(resolved.get("LOG_LEVEL").unwrap().raw.as_deref(), Some("ERROR"));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Resolve every schema key against the given sources.
    ///
    /// Sources may be passed in any order; precedence is taken from each
    /// source's `precedence` field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredValue`] if a required field is defined
    /// by no source.
    pub fn resolve(sources: &[ConfigSource]) -> Result<ResolvedValues> {
        let mut ordered: Vec<&ConfigSource> = sources.iter().collect();
        // Highest precedence first
        ordered.sort_by(|a, b| b.precedence.cmp(&a.precedence));

        let mut fields = HashMap::with_capacity(SCHEMA.len());
        for spec in SCHEMA {
            let field = Self::resolve_ordered(spec, &ordered)?;
            fields.insert(spec.key, field);
        }

        Ok(ResolvedValues { fields })
    }

    /// Resolve a single schema entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredValue`] if the field is required and
    /// no source defines it.
    pub fn resolve_field(spec: &FieldSpec, sources: &[ConfigSource]) -> Result<ResolvedField> {
        let mut ordered: Vec<&ConfigSource> = sources.iter().collect();
        ordered.sort_by(|a, b| b.precedence.cmp(&a.precedence));
        Self::resolve_ordered(spec, &ordered)
    }

    fn resolve_ordered(spec: &FieldSpec, ordered: &[&ConfigSource]) -> Result<ResolvedField> {
        if let Some((source, raw)) = ordered
            .iter()
            .find_map(|source| source.get(spec.key).map(|raw| (source, raw)))
        {
            log::debug!("{} set from {}", spec.key, source.origin);
            return Ok(ResolvedField {
                key: spec.key,
                raw: Some(raw.to_string()),
                origin: source.origin.clone(),
            });
        }

        if spec.kind.is_required() {
            return Err(Error::MissingRequiredValue {
                field: spec.key.into(),
            });
        }

        Ok(ResolvedField {
            key: spec.key,
            raw: None,
            origin: SourceOrigin::Default,
        })
    }
}
