//! Persisted light/dark theme preference.

use crate::store::{KeyValueStore, StorageError, THEME_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Display theme chosen by the user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Dark background.
    #[default]
    Dark,
    /// Light background.
    Light,
}

impl Theme {
    /// Maps the host's "prefers dark" signal to a theme.
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }

    /// Returns the other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Loads the stored theme, falling back to `system` when nothing usable is
    /// stored. The fallback is written back so later loads see it.
    #[instrument(skip(store))]
    pub fn load(store: &dyn KeyValueStore, system: Theme) -> Self {
        let stored = store.get(THEME_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read theme preference");
            None
        });

        if let Some(raw) = stored {
            match raw.parse::<Theme>() {
                Ok(theme) => return theme,
                Err(_) => warn!(raw = %raw, "Ignoring unknown theme preference"),
            }
        }

        debug!(theme = %system, "Using system theme");
        if let Err(e) = system.save(store) {
            warn!(error = %e, "Failed to persist theme preference");
        }
        system
    }

    /// Writes this theme to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    #[instrument(skip(store))]
    pub fn save(self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(THEME_KEY, &self.to_string())
    }
}
