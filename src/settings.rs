//! User preferences
//!
//! Persisted in LocalStorage, separately from saved palettes.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BLOB_COUNT, MAX_BLOB_COUNT, MIN_BLOB_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Blobs in the playground
    pub blob_count: usize,
    /// Dark background
    pub dark_mode: bool,
    /// The first-visit tutorial has been shown
    pub tutorial_seen: bool,
    /// Settings panel open (narrows the playground)
    pub panel_open: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blob_count: DEFAULT_BLOB_COUNT,
            dark_mode: false,
            tutorial_seen: false,
            panel_open: false,
        }
    }
}

impl Settings {
    /// Blob count forced into the slider range
    pub fn clamped_blob_count(&self) -> usize {
        self.blob_count.clamp(MIN_BLOB_COUNT, MAX_BLOB_COUNT)
    }

    /// Parse stored JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dropli_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No storage on native, using defaults for {}", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.blob_count, 5);
        assert!(!settings.dark_mode);
        assert!(!settings.tutorial_seen);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "dark_mode": true }"#).unwrap();
        assert!(settings.dark_mode);
        assert_eq!(settings.blob_count, DEFAULT_BLOB_COUNT);
    }

    #[test]
    fn test_clamped_blob_count() {
        let settings = Settings {
            blob_count: 99,
            ..Default::default()
        };
        assert_eq!(settings.clamped_blob_count(), MAX_BLOB_COUNT);
    }

    #[test]
    fn test_roundtrip() {
        let settings = Settings {
            blob_count: 8,
            dark_mode: true,
            tutorial_seen: true,
            panel_open: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
