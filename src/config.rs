//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    /// Backend base URL; overridden by the MANAR_BACKEND_URL env var
    pub backend_url: Option<String>,
    /// Show soft-deleted programs on the admin screen by default
    pub show_deleted_programs: Option<bool>,
    /// Show soft-deleted stories on the admin screen by default
    pub show_deleted_stories: Option<bool>,
    /// Directory resource downloads are written to
    pub download_dir: Option<String>,
}

impl PortalConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "manar", "manar-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PortalConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortalConfig::default();
        assert!(config.backend_url.is_none());
        assert!(config.show_deleted_programs.is_none());
        assert!(config.show_deleted_stories.is_none());
        assert!(config.download_dir.is_none());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = PortalConfig {
            backend_url: Some("http://localhost:4000".to_string()),
            show_deleted_programs: Some(true),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = PortalConfig::load_from(&path).unwrap();
        assert_eq!(
            loaded.backend_url,
            Some("http://localhost:4000".to_string())
        );
        assert_eq!(loaded.show_deleted_programs, Some(true));
        assert!(loaded.show_deleted_stories.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: PortalConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.backend_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"backend_url": "http://x", "unknown_field": "value"}"#;
        let parsed: PortalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.backend_url, Some("http://x".to_string()));
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        let result = PortalConfig::load();
        assert!(result.is_ok());
    }
}
