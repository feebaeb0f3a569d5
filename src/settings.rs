//! Player preferences
//!
//! Persisted in LocalStorage; high scores are intentionally not stored.

use serde::{Deserialize, Serialize};

use crate::ui::Locale;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vibrate on catch (when the device supports it)
    pub haptics: bool,
    /// UI language
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            haptics: true,
            locale: Locale::ZhTw,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "heart_catch_settings";

    /// Parse stored settings, falling back to defaults on bad data
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        // First visit: follow the browser language
        let locale = web_sys::window()
            .and_then(|w| w.navigator().language())
            .and_then(|lang| Locale::from_str(&lang))
            .unwrap_or_default();
        log::info!("Using default settings ({})", locale.as_str());
        Self {
            locale,
            ..Self::default()
        }
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
        let s = Settings::default();
        assert!(s.haptics);
        assert_eq!(s.locale, Locale::ZhTw);
    }

    #[test]
    fn test_json_round_trip_fields() {
        let s = Settings::from_json_or_default(r#"{ "haptics": false, "locale": "En" }"#);
        assert!(!s.haptics);
        assert_eq!(s.locale, Locale::En);
    }

    #[test]
    fn test_partial_and_bad_json() {
        let s = Settings::from_json_or_default(r#"{ "haptics": false }"#);
        assert_eq!(s.locale, Locale::ZhTw);
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }
}
