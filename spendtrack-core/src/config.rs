//! Configuration management
//!
//! Reads `settings.json` from the app directory:
//! ```json
//! {
//!   "app": { "apiBaseUrl": "http://localhost:3001/api", ... }
//! }
//! ```
//! The base URL can be overridden with the `SPENDTRACK_API_URL` environment
//! variable (useful for CI and for pointing a dev build at a staging
//! backend).

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default backend location for local development
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Spendtrack configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the app directory
    ///
    /// Precedence: `SPENDTRACK_API_URL` env var, then settings.json, then
    /// the local-development default.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let settings_path = app_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let api_base_url = std::env::var("SPENDTRACK_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| raw.app.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            api_base_url,
            _raw_settings: raw,
        })
    }

    /// Save config to the app directory
    /// Preserves settings fields the library doesn't manage
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let settings_path = app_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.api_base_url = Some(self.api_base_url.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_default_url() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_settings_file_url_is_used() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"apiBaseUrl": "https://api.example.test/api"}}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.test/api");
    }

    #[test]
    fn test_save_preserves_unmanaged_fields() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"theme": "dark"}}"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.api_base_url = "http://localhost:9999/api".to_string();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["app"]["theme"], "dark");
        assert_eq!(value["app"]["apiBaseUrl"], "http://localhost:9999/api");
    }
}
