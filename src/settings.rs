//! Player preferences
//!
//! Persisted as JSON next to the scores.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `KeyboardEvent.code` that restarts the run
    pub restart_key: String,
    /// Draw the status line at the bottom of the canvas
    pub show_status: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            restart_key: "Space".to_string(),
            show_status: true,
        }
    }
}

impl Settings {
    pub fn is_restart_key(&self, code: &str) -> bool {
        self.restart_key == code
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring stored settings: {e}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Load settings and write defaults back when nothing usable is stored,
    /// so the stored JSON can be edited by hand
    pub fn load_or_init(store: &mut impl KeyValueStore) -> Self {
        let usable = matches!(
            store.get(SETTINGS_KEY),
            Ok(Some(json)) if serde_json::from_str::<Self>(&json).is_ok()
        );
        let settings = Self::load(store);
        if !usable {
            settings.save(store);
        }
        settings
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = store.set(SETTINGS_KEY, &json) {
                    log::warn!("Settings not saved: {e}");
                }
            }
            Err(e) => log::warn!("Settings not serialized: {e}"),
        }
    }
}
