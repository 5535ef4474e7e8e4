//! Settings validation.
//!
//! Runs over a fully coerced [`Settings`] snapshot and reports the first rule
//! that does not hold.

use crate::config::schema::SECRET_KEY_PLACEHOLDER;
use crate::config::settings::{Secret, Settings};
use crate::error::{Error, Result, REDACTED};
use std::collections::HashSet;

/// Lowest value accepted for `PASSWORD_MIN_LENGTH`.
pub const PASSWORD_MIN_LENGTH_FLOOR: i64 = 8;

/// Validates a resolved settings snapshot.
///
/// # Examples
///
/// ```
/// use counselflow_config::config::SettingsValidator;
/// use counselflow_config::ConfigurationResolver;
///
/// let mut settings = ConfigurationResolver::new()
///     .skip_env_file()
///     .skip_env()
///     .resolve()
///     .unwrap();
/// assert!(SettingsValidator::validate(&settings).is_ok());
///
/// settings.password_min_length = 4;
/// assert!(SettingsValidator::validate(&settings).is_err());
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate a complete snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationViolation`] naming the first field that
    /// breaks a rule.
    pub fn validate(settings: &Settings) -> Result<()> {
        let positive = [
            ("MAX_UPLOAD_SIZE", settings.max_upload_size),
            (
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                settings.access_token_expire_minutes,
            ),
            ("REFRESH_TOKEN_EXPIRE_DAYS", settings.refresh_token_expire_days),
            ("SESSION_TIMEOUT_MINUTES", settings.session_timeout_minutes),
            ("MAX_LOGIN_ATTEMPTS", settings.max_login_attempts),
            ("LOCKOUT_DURATION_MINUTES", settings.lockout_duration_minutes),
            ("RATE_LIMIT_PER_MINUTE", settings.rate_limit_per_minute),
            ("AUDIT_LOG_RETENTION_DAYS", settings.audit_log_retention_days),
        ];
        for (field, value) in positive {
            Self::validate_positive(field, value)?;
        }

        Self::validate_password_floor(settings.password_min_length)?;
        Self::validate_port("SMTP_PORT", settings.smtp_port)?;

        Self::validate_list("ALLOWED_EXTENSIONS", &settings.allowed_extensions)?;
        Self::validate_list(
            "SUPPORTED_JURISDICTIONS",
            &settings.supported_jurisdictions,
        )?;
        Self::validate_list("SUPPORTED_LANGUAGES", &settings.supported_languages)?;

        if settings.is_production() {
            Self::validate_production_secrets(settings)?;
        }

        Ok(())
    }

    fn validate_positive(field: &str, value: i64) -> Result<()> {
        if value <= 0 {
            return Err(Error::ValidationViolation {
                field: field.into(),
                value: value.to_string(),
                rule: "must be greater than 0".into(),
            });
        }
        Ok(())
    }

    fn validate_password_floor(value: i64) -> Result<()> {
        if value < PASSWORD_MIN_LENGTH_FLOOR {
            return Err(Error::ValidationViolation {
                field: "PASSWORD_MIN_LENGTH".into(),
                value: value.to_string(),
                rule: format!("must be at least {PASSWORD_MIN_LENGTH_FLOOR}"),
            });
        }
        Ok(())
    }

    fn validate_port(field: &str, value: i64) -> Result<()> {
        if !(1..=i64::from(u16::MAX)).contains(&value) {
            return Err(Error::ValidationViolation {
                field: field.into(),
                value: value.to_string(),
                rule: "must be a port number between 1 and 65535".into(),
            });
        }
        Ok(())
    }

    /// Lists must be non-empty with no blank entries and no duplicates once
    /// case is ignored.
    fn validate_list(field: &str, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Err(Error::ValidationViolation {
                field: field.into(),
                value: "[]".into(),
                rule: "must contain at least one entry".into(),
            });
        }

        let mut seen = HashSet::new();
        for item in items {
            if item.trim().is_empty() {
                return Err(Error::ValidationViolation {
                    field: field.into(),
                    value: items.join(","),
                    rule: "entries must not be blank".into(),
                });
            }
            if !seen.insert(item.trim().to_lowercase()) {
                return Err(Error::ValidationViolation {
                    field: field.into(),
                    value: items.join(","),
                    rule: format!("duplicate entry '{item}' (case-insensitive)"),
                });
            }
        }

        Ok(())
    }

    fn validate_production_secrets(settings: &Settings) -> Result<()> {
        let secret_key = settings.secret_key.expose().trim();
        if secret_key.is_empty() || secret_key == SECRET_KEY_PLACEHOLDER {
            return Err(Error::ValidationViolation {
                field: "SECRET_KEY".into(),
                value: redact(secret_key).into(),
                rule: "must be replaced with a real key in production".into(),
            });
        }

        match settings.encryption_key.as_ref().map(Secret::is_empty) {
            None => Err(Error::ValidationViolation {
                field: "ENCRYPTION_KEY".into(),
                value: "<unset>".into(),
                rule: "must be set in production".into(),
            }),
            Some(true) => Err(Error::ValidationViolation {
                field: "ENCRYPTION_KEY".into(),
                value: String::new(),
                rule: "must not be empty in production".into(),
            }),
            Some(false) => Ok(()),
        }
    }
}

/// Mask a secret for diagnostics unless it is the public placeholder.
#[must_use]
pub fn redact(value: &str) -> &str {
    if value.is_empty() || value == SECRET_KEY_PLACEHOLDER {
        value
    } else {
        REDACTED
    }
}


#[cfg(test)]
#[allow(unused_doc_comments)] // proptest! macro doesn't support doc comments
mod property_tests {
    use super::*;
    use crate::config::resolver::ConfigurationResolver;
    use proptest::prelude::*;

    fn defaults() -> Settings {
        ConfigurationResolver::new()
            .skip_env_file()
            .skip_env()
            .resolve()
            .unwrap()
    }

    /// Property: any password floor at or above the minimum is accepted,
    /// anything below is rejected.
    proptest! {
        #[test]
        fn prop_password_floor(length in -100i64..=100) {
            let settings = Settings { password_min_length: length, ..defaults() };
            let result = SettingsValidator::validate(&settings);
            prop_assert_eq!(result.is_ok(), length >= PASSWORD_MIN_LENGTH_FLOOR);
        }
    }

    /// Property: positive upload sizes pass and are left unchanged.
    proptest! {
        #[test]
        fn prop_positive_upload_size_accepted(size in 1i64..=i64::MAX) {
            let settings = Settings { max_upload_size: size, ..defaults() };
            prop_assert!(SettingsValidator::validate(&settings).is_ok());
            prop_assert_eq!(settings.max_upload_size, size);
        }
    }

    /// Property: a list with a case-variant repeat is always rejected.
    proptest! {
        #[test]
        fn prop_case_variant_duplicates_rejected(entry in "[a-z]{1,8}") {
            let settings = Settings {
                supported_languages: vec![entry.clone(), entry.to_uppercase()],
                ..defaults()
            };
            prop_assert!(SettingsValidator::validate(&settings).is_err());
        }
    }
}
