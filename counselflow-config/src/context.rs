//! Shared access to the active settings snapshot.
//!
//! A [`SettingsHandle`] is cheap to clone and hands out `Arc<Settings>`
//! snapshots. Reloading swaps in a new snapshot only when resolution
//! succeeds, so readers always see a complete, validated configuration.

use crate::config::resolver::ConfigurationResolver;
use crate::config::settings::Settings;
use crate::error::Result;
use std::sync::{Arc, PoisonError, RwLock};

/// Process-wide holder for the current [`Settings`].
///
/// # Examples
///
/// ```
/// use counselflow_config::{ConfigurationResolver, SettingsHandle};
///
/// let resolver = ConfigurationResolver::new().skip_env_file().skip_env();
/// let handle = SettingsHandle::new(resolver.resolve().unwrap());
/// assert_eq!(handle.current().smtp_port, 587);
///
/// let resolver = resolver.with_override("SMTP_PORT", "2525");
/// handle.reload(&resolver).unwrap();
/// assert_eq!(handle.current().smtp_port, 2525);
/// ```
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    inner: Arc<RwLock<Arc<Settings>>>,
}

impl SettingsHandle {
    /// Wrap an already-resolved snapshot.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    /// Resolve with `resolver` and wrap the result.
    ///
    /// # Errors
    ///
    /// Returns the resolution error; no handle is created.
    pub fn resolve(resolver: &ConfigurationResolver) -> Result<Self> {
        resolver.resolve().map(Self::new)
    }

    /// The active snapshot.
    ///
    /// The returned `Arc` stays valid after a reload; callers holding it keep
    /// seeing the values they started with.
    #[must_use]
    pub fn current(&self) -> Arc<Settings> {
        // The lock only guards an Arc swap, so a poisoned lock still holds a
        // complete snapshot.
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Re-resolve and install the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns the resolution error and leaves the active snapshot untouched.
    pub fn reload(&self, resolver: &ConfigurationResolver) -> Result<Arc<Settings>> {
        let settings = Arc::new(resolver.resolve()?);
        self.install(Arc::clone(&settings));
        log::info!("settings reloaded for {}", settings.environment);
        Ok(settings)
    }

    /// Install `settings` as is, returning the snapshot it replaced.
    pub fn replace(&self, settings: Settings) -> Arc<Settings> {
        self.install(Arc::new(settings))
    }

    fn install(&self, settings: Arc<Settings>) -> Arc<Settings> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, settings)
    }
}
