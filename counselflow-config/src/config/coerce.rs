//! Type coercion from raw string values.
//!
//! Values taken from the environment or the env file are always strings.
//! This module turns them into the types the schema declares. Defaults are
//! already typed and bypass string parsing entirely.

use crate::config::merger::ResolvedValues;
use crate::config::schema::{self, FieldKind, FieldSpec};
use crate::config::settings::{Environment, Secret};
use crate::error::{Error, Result};
use crate::logging::LogLevel;
use std::collections::HashSet;

/// Delimiter for list values given as plain strings.
pub const LIST_DELIMITER: char = ',';

/// Parse a boolean token.
///
/// Accepts `true`/`1`/`yes` and `false`/`0`/`no`, case-insensitively, after
/// trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`Error::MalformedValue`] for any other token.
///
/// # Examples
///
/// ```
/// use counselflow_config::config::coerce::parse_bool;
///
/// assert!(parse_bool("DEBUG", "Yes").unwrap());
/// assert!(!parse_bool("DEBUG", "0").unwrap());
/// assert!(parse_bool("DEBUG", "on").is_err());
/// ```
pub fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::MalformedValue {
            field: field.into(),
            value: raw.into(),
            reason: "invalid boolean (expected true/false/1/0/yes/no)".into(),
        }),
    }
}

/// Parse a base-10 integer.
///
/// # Errors
///
/// Returns [`Error::MalformedValue`] if the value is not an integer.
pub fn parse_int(field: &str, raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|e| Error::MalformedValue {
        field: field.into(),
        value: raw.into(),
        reason: format!("invalid integer: {e}"),
    })
}

/// Parse a list of strings.
///
/// A value starting with `[` is read as a JSON array of strings; anything else
/// is split on [`LIST_DELIMITER`]. Entries are trimmed, blanks are dropped, and
/// later entries that repeat an earlier one (ignoring case) are removed.
///
/// # Errors
///
/// Returns [`Error::MalformedValue`] if a JSON array is malformed.
///
/// # Examples
///
/// ```
/// use counselflow_config::config::coerce::parse_list;
///
/// let langs = parse_list("SUPPORTED_LANGUAGES", "en, fr, EN ,de").unwrap();
/// assert_eq!(langs, vec!["en", "fr", "de"]);
///
/// let json = parse_list("SUPPORTED_LANGUAGES", r#"["en", "es"]"#).unwrap();
/// assert_eq!(json, vec!["en", "es"]);
/// ```
pub fn parse_list(field: &str, raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();

    let items: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|e| Error::MalformedValue {
            field: field.into(),
            value: raw.into(),
            reason: format!("invalid JSON list of strings: {e}"),
        })?
    } else {
        trimmed
            .split(LIST_DELIMITER)
            .map(ToString::to_string)
            .collect()
    };

    Ok(dedup_case_insensitive(items))
}

/// Trim entries, drop blanks, and keep only the first of any case-insensitive
/// repeats, preserving order.
fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

/// Reads typed values out of a [`ResolvedValues`] set.
///
/// A value that came from a string source is coerced; a value that fell
/// through to the schema default is taken as declared.
pub(crate) struct FieldReader<'a> {
    values: &'a ResolvedValues,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(values: &'a ResolvedValues) -> Self {
        Self { values }
    }

    fn entry(&self, key: &str) -> Result<(&'static FieldSpec, Option<&'a str>)> {
        let spec = schema::field(key).ok_or_else(|| Error::UnknownField { field: key.into() })?;
        let raw = self.values.get(key).and_then(|field| field.raw.as_deref());
        Ok((spec, raw))
    }

    pub(crate) fn text(&self, key: &str) -> Result<String> {
        match self.entry(key)? {
            (_, Some(raw)) => Ok(raw.to_string()),
            (spec, None) => match spec.kind {
                FieldKind::Text {
                    default: Some(default),
                } => Ok(default.to_string()),
                FieldKind::Text { default: None } => Err(Error::MissingRequiredValue {
                    field: spec.key.into(),
                }),
                _ => Err(kind_mismatch(spec, "string")),
            },
        }
    }

    pub(crate) fn secret(&self, key: &str) -> Result<Secret> {
        self.text(key).map(Secret::new)
    }

    pub(crate) fn boolean(&self, key: &str) -> Result<bool> {
        match self.entry(key)? {
            (spec, Some(raw)) => parse_bool(spec.key, raw),
            (spec, None) => match spec.kind {
                FieldKind::Boolean { default } => Ok(default),
                _ => Err(kind_mismatch(spec, "boolean")),
            },
        }
    }

    pub(crate) fn integer(&self, key: &str) -> Result<i64> {
        match self.entry(key)? {
            (spec, Some(raw)) => parse_int(spec.key, raw),
            (spec, None) => match spec.kind {
                FieldKind::Integer { default } => Ok(default),
                _ => Err(kind_mismatch(spec, "integer")),
            },
        }
    }

    pub(crate) fn optional(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)? {
            (_, Some(raw)) => Ok(Some(raw.to_string())),
            (spec, None) => match spec.kind {
                FieldKind::OptionalText => Ok(None),
                _ => Err(kind_mismatch(spec, "optional string")),
            },
        }
    }

    pub(crate) fn optional_secret(&self, key: &str) -> Result<Option<Secret>> {
        Ok(self.optional(key)?.map(Secret::new))
    }

    pub(crate) fn list(&self, key: &str) -> Result<Vec<String>> {
        match self.entry(key)? {
            (spec, Some(raw)) => parse_list(spec.key, raw),
            (spec, None) => match spec.kind {
                FieldKind::List { default } => {
                    Ok(default.iter().map(ToString::to_string).collect())
                }
                _ => Err(kind_mismatch(spec, "list of strings")),
            },
        }
    }

    pub(crate) fn environment(&self, key: &str) -> Result<Environment> {
        self.text(key)?.parse()
    }

    pub(crate) fn log_level(&self, key: &str) -> Result<LogLevel> {
        let raw = self.text(key)?;
        LogLevel::parse(&raw).map_err(|reason| Error::MalformedValue {
            field: key.into(),
            value: raw,
            reason,
        })
    }
}

fn kind_mismatch(spec: &FieldSpec, requested: &str) -> Error {
    Error::MalformedValue {
        field: spec.key.into(),
        value: String::new(),
        reason: format!(
            "schema declares {} but it was read as {requested}",
            spec.kind.type_name()
        ),
    }
}
