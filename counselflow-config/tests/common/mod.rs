//! Shared test utilities for integration tests.

#![allow(dead_code)]

use counselflow_config::config::SCHEMA;
use counselflow_config::ConfigurationResolver;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolver that sees neither `./.env` nor the real process environment.
pub fn isolated() -> ConfigurationResolver {
    ConfigurationResolver::new().skip_env_file().skip_env()
}

/// Write an env file named `filename` under `dir` and return its path.
pub fn write_env_file(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// RAII guard for setting and restoring environment variables.
///
/// Tests using this must be marked `#[serial]`.
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clear every schema key from the process environment for the guard's lifetime.
pub fn clear_schema_env_vars() -> Vec<EnvGuard> {
    SCHEMA.iter().map(|spec| EnvGuard::remove(spec.key)).collect()
}
