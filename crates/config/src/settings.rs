// Client settings
// Loaded from ~/.config/agridoc/settings.json

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use agridoc_core::HeroConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Backend
    #[serde(rename = "api.baseUrl")]
    pub api_base_url: String,

    #[serde(rename = "api.timeoutSecs")]
    pub api_timeout_secs: u64,

    // Geocoding
    #[serde(rename = "geocoding.baseUrl")]
    pub geocoding_base_url: String,

    // Schemes
    #[serde(rename = "schemes.debounceMs")]
    pub schemes_debounce_ms: u64,

    // Landing hero
    #[serde(rename = "hero", default)]
    pub hero: HeroConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            api_timeout_secs: 60,
            geocoding_base_url: "https://geocoding-api.open-meteo.com".to_string(),
            schemes_debounce_ms: 500,
            hero: HeroConfig::default(),
        }
    }
}

const DEFAULT_FILE: &str = r#"{
    // Backend serving /api/* routes
    "api.baseUrl": "http://localhost:8000",
    "api.timeoutSecs": 60,

    // Place-name search
    "geocoding.baseUrl": "https://geocoding-api.open-meteo.com",

    // Quiet period before a scheme search is sent
    "schemes.debounceMs": 500,

    // Landing hero tuning (any field may be omitted)
    "hero": {
        "revealThreshold": 0.75
    }
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agridoc")
            .join("settings.json")
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn schemes_debounce(&self) -> Duration {
        Duration::from_millis(self.schemes_debounce_ms)
    }

    /// Load settings from disk, falling back to defaults. A missing file is
    /// created with commented defaults.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            if let Err(e) = Self::create_default_file(&path) {
                log::warn!("Error writing default settings.json: {}", e);
            }
            return Self::default();
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring lines that start with `//`.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    fn create_default_file(path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(path, DEFAULT_FILE).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_parses_to_defaults() {
        assert_eq!(Settings::parse(DEFAULT_FILE).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::parse(
            r#"{
                // point at staging
                "api.baseUrl": "https://staging.agridoc.in",
                "hero": { "wheelSensitivity": 0.002 }
            }"#,
        )
        .unwrap();
        assert_eq!(settings.api_base_url, "https://staging.agridoc.in");
        assert_eq!(settings.api_timeout(), Duration::from_secs(60));
        assert_eq!(settings.hero.wheel_sensitivity, 0.002);
        assert_eq!(settings.hero.reveal_threshold, 0.75);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ \"api.timeoutSecs\": \"soon\" }").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        assert_eq!(Settings::load_from(&dir.path().join("missing.json")), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings { schemes_debounce_ms: 250, ..Settings::default() };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.schemes_debounce(), Duration::from_millis(250));
        assert_eq!(loaded, settings);
    }
}
