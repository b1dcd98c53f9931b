//! Persisted UI preferences: display language and color theme.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::lang::Language;
use crate::storage::{KeyValueStore, PREFS_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn toggle(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: ThemeKind,
}

pub struct PrefsStore {
    current: Preferences,
    store: Arc<dyn KeyValueStore>,
}

impl PrefsStore {
    /// Load persisted preferences; absent or unreadable data falls back to
    /// the defaults.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let current = match store.get(PREFS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(prefs) => prefs,
                Err(err) => {
                    warn!(error = %err, "persisted preferences are corrupt, using defaults");
                    Preferences::default()
                }
            },
            Ok(None) => Preferences::default(),
            Err(err) => {
                warn!(error = %err, "could not read preferences, using defaults");
                Preferences::default()
            }
        };
        Self { current, store }
    }

    pub fn language(&self) -> Language {
        self.current.language
    }

    pub fn theme(&self) -> ThemeKind {
        self.current.theme
    }

    pub fn toggle_language(&mut self) -> Language {
        self.current.language = self.current.language.toggle();
        self.persist();
        self.current.language
    }

    pub fn toggle_theme(&mut self) -> ThemeKind {
        self.current.theme = self.current.theme.toggle();
        self.persist();
        self.current.theme
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.current) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "could not encode preferences");
                return;
            }
        };
        if let Err(err) = self.store.set(PREFS_KEY, &encoded) {
            warn!(error = %err, "could not persist preferences, keeping in-memory value");
        }
    }
}
