//! Theme preference service.
//!
//! Loads and persists the user's light/dark/system preference and resolves it
//! against the host color scheme.

use tracing::{debug, warn};

use milan_types::error::StorageError;
use milan_types::theme::{ResolvedTheme, ThemePreference};

use crate::storage::preference::PreferenceStore;

/// Reports whether the host environment prefers a dark color scheme.
pub trait ColorSchemeProbe: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

/// Service for reading and updating the theme preference.
///
/// Generic over the store and probe so tests can use in-memory doubles.
pub struct ThemeService<S: PreferenceStore, P: ColorSchemeProbe> {
    store: S,
    probe: P,
    storage_key: String,
}

impl<S: PreferenceStore, P: ColorSchemeProbe> ThemeService<S, P> {
    pub fn new(store: S, probe: P, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            probe,
            storage_key: storage_key.into(),
        }
    }

    /// Stored preference. Absent, unknown, or unreadable values fall back to
    /// `system`.
    pub async fn load_preference(&self) -> ThemePreference {
        match self.store.get(&self.storage_key).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: String| {
                warn!(key = %self.storage_key, error = %e, "Ignoring stored theme");
                ThemePreference::System
            }),
            Ok(None) => ThemePreference::System,
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "Failed to read theme preference");
                ThemePreference::System
            }
        }
    }

    /// Theme to apply right now.
    pub async fn resolved(&self) -> ResolvedTheme {
        self.load_preference()
            .await
            .resolve(self.probe.prefers_dark())
    }

    /// Persist a new preference and return the theme it resolves to.
    pub async fn set_preference(
        &self,
        preference: ThemePreference,
    ) -> Result<ResolvedTheme, StorageError> {
        self.store
            .set(&self.storage_key, &preference.to_string())
            .await?;
        let resolved = preference.resolve(self.probe.prefers_dark());
        debug!(%preference, %resolved, "Theme preference saved");
        Ok(resolved)
    }

    pub fn host_prefers_dark(&self) -> bool {
        self.probe.prefers_dark()
    }
}
