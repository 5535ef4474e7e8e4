//! Property-based tests for resolution as a whole.

use super::resolver::ConfigurationResolver;
use super::schema::{FieldKind, FieldSpec, SCHEMA};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn keys_where(keep: impl Fn(&FieldSpec) -> bool) -> Vec<&'static str> {
    SCHEMA
        .iter()
        .filter(|spec| keep(spec))
        .map(|spec| spec.key)
        .collect()
}

// Free-text keys whose value reaches Settings unchanged
fn text_keys() -> Vec<&'static str> {
    keys_where(|spec| {
        matches!(spec.kind, FieldKind::Text { .. })
            && !matches!(spec.key, "ENVIRONMENT" | "LOG_LEVEL")
    })
}

// Values that survive a round trip through a .env line unquoted
fn plain_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./:-]{1,24}"
}

fn bool_token_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["true", "false", "yes", "no", "1", "0", "TRUE", "No"])
        .prop_map(String::from)
}

// Every integer field accepts this range (password floor 8, port ceiling 65535)
fn int_value_strategy() -> impl Strategy<Value = String> {
    (8i64..=65_535).prop_map(|n| n.to_string())
}

fn list_value_strategy() -> impl Strategy<Value = String> {
    prop::collection::btree_set("[a-z]{1,6}", 1..5)
        .prop_map(|entries| entries.into_iter().collect::<Vec<_>>().join(","))
}

// A key together with two valid raw values for it
fn keyed_values_strategy() -> impl Strategy<Value = (&'static str, String, String)> {
    prop_oneof![
        (
            prop::sample::select(text_keys()),
            plain_value_strategy(),
            plain_value_strategy(),
        ),
        (
            prop::sample::select(keys_where(|spec| matches!(spec.kind, FieldKind::Boolean { .. }))),
            bool_token_strategy(),
            bool_token_strategy(),
        ),
        (
            prop::sample::select(keys_where(|spec| matches!(spec.kind, FieldKind::Integer { .. }))),
            int_value_strategy(),
            int_value_strategy(),
        ),
        (
            prop::sample::select(keys_where(|spec| matches!(spec.kind, FieldKind::List { .. }))),
            list_value_strategy(),
            list_value_strategy(),
        ),
        (
            prop::sample::select(keys_where(|spec| spec.kind == FieldKind::OptionalText)),
            plain_value_strategy(),
            plain_value_strategy(),
        ),
    ]
}

fn isolated() -> ConfigurationResolver {
    ConfigurationResolver::new().skip_env_file().skip_env()
}

fn raw_value(resolver: &ConfigurationResolver, key: &str) -> String {
    let report = resolver.resolve_with_report().unwrap();
    report
        .values
        .get(key)
        .and_then(|field| field.raw.clone())
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // The environment layer beats the env file for every key
    #[test]
    fn environment_beats_env_file((key, file_value, env_value) in keyed_values_strategy()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, format!("{key}={file_value}\n")).unwrap();

        let from_file = isolated().with_env_file(&path);
        prop_assert_eq!(raw_value(&from_file, key), file_value);

        let both = from_file.with_env_vars([(key, env_value.as_str())]);
        prop_assert_eq!(raw_value(&both, key), env_value);
    }

    // An override beats every other layer
    #[test]
    fn override_beats_environment((key, env_value, override_value) in keyed_values_strategy()) {
        let resolver = isolated()
            .with_env_vars([(key, env_value.as_str())])
            .with_override(key, override_value.clone());
        prop_assert_eq!(raw_value(&resolver, key), override_value);
    }

    // Resolving twice over unchanged sources yields equal snapshots
    #[test]
    fn resolution_is_idempotent(
        port in 1i64..=65535,
        rate in 1i64..=10_000,
        debug in any::<bool>(),
    ) {
        let resolver = isolated().with_env_vars([
            ("SMTP_PORT", port.to_string()),
            ("RATE_LIMIT_PER_MINUTE", rate.to_string()),
            ("DEBUG", debug.to_string()),
        ]);

        let first = resolver.resolve().unwrap();
        let second = resolver.resolve().unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.smtp_port, port);
        prop_assert_eq!(first.rate_limit_per_minute, rate);
        prop_assert_eq!(first.debug, debug);
    }

    // Keys no source defines keep their defaults
    #[test]
    fn untouched_keys_keep_defaults((key, value, _) in keyed_values_strategy()) {
        let defaults = isolated().resolve_with_report().unwrap();
        let report = isolated().with_env_vars([(key, value.as_str())]).resolve_with_report().unwrap();

        for field in report.values.iter().filter(|field| field.key != key) {
            prop_assert_eq!(Some(field), defaults.values.get(field.key));
        }
    }
}
