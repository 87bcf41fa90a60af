//! Application settings
//!
//! Persisted separately from the planner snapshot. Every field has a
//! default, so a partial or missing settings value still loads.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND, EXPORT_FILE_NAME, RASTER_SCALE, SNAPSHOT_STORAGE_KEY,
};
use crate::platform::KeyValueStore;

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the planner snapshot is stored under
    pub storage_key: String,
    /// Download name of the exported PDF
    pub export_file_name: String,
    /// Rasterization supersampling factor
    pub raster_scale: f64,
    /// Page background when the host has no theme color
    pub fallback_background: String,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: SNAPSHOT_STORAGE_KEY.to_string(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            raster_scale: RASTER_SCALE,
            fallback_background: DEFAULT_BACKGROUND.to_string(),
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// Storage key for the settings themselves
    pub const STORAGE_KEY: &'static str = "weekly_planner_settings";

    /// Load settings, falling back to defaults on any problem
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings unavailable: {}", e),
        }
        log::info!("Using default settings");
        Self::default()
    }

    /// Replace unusable values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.storage_key.trim().is_empty() {
            self.storage_key = defaults.storage_key;
        }
        if self.export_file_name.trim().is_empty() {
            self.export_file_name = defaults.export_file_name;
        }
        if !(self.raster_scale.is_finite() && self.raster_scale > 0.0) {
            self.raster_scale = defaults.raster_scale;
        }
        if self.fallback_background.trim().is_empty() {
            self.fallback_background = defaults.fallback_background;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_defaults_when_absent() {
        let store = MemoryStore::new();
        let settings = Settings::load(&store);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.storage_key, "financialPlannerData");
        assert_eq!(settings.raster_scale, 2.0);
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"log_level":"debug","raster_scale":3.0}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.raster_scale, 3.0);
        assert_eq!(settings.export_file_name, EXPORT_FILE_NAME);
    }

    #[test]
    fn test_bad_values_sanitized() {
        let store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"storage_key":" ","raster_scale":-1.0}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.storage_key, SNAPSHOT_STORAGE_KEY);
        assert_eq!(settings.raster_scale, RASTER_SCALE);
    }

    #[test]
    fn test_malformed_settings() {
        let store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{{").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_stored_settings_load() {
        let store = MemoryStore::new();
        let settings = Settings {
            export_file_name: "week.pdf".into(),
            ..Settings::default()
        };
        store
            .set(Settings::STORAGE_KEY, &serde_json::to_string(&settings).unwrap())
            .unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(LogLevel::Error.to_level(), log::Level::Error);
        assert_eq!(LogLevel::default().to_level(), log::Level::Info);
    }
}
