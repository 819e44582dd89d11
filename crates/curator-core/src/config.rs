//! Curator configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CuratorError, Result};
use crate::profile::UseCaseProfile;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CuratorConfig {
    #[serde(default)]
    pub store: StoreConfig,
    /// Profiles layered over the built-ins (same name replaces, new name adds).
    #[serde(default)]
    pub profiles: Vec<UseCaseProfile>,
}

impl CuratorConfig {
    /// Load config from the default path (~/.curator/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CuratorError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CuratorError::Config(format!("Failed to parse config: {e}")))?;
        for profile in &config.profiles {
            profile.validate()?;
        }
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| CuratorError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Curator home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".curator")
    }
}

/// Where the document corpus lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "json" (corpus file) or "sqlite".
    #[serde(default = "default_store_backend")]
    pub backend: String,
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_backend() -> String { "json".into() }
fn default_store_path() -> String { "~/.curator/documents.json".into() }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: default_store_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: CuratorConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.backend, "json");
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [store]
            backend = "sqlite"
            path = "/tmp/curator.db"

            [[profiles]]
            name = "lesson-plan"
            output_bound = 8
            fallback_categories = ["examples"]
        "#;
        let config: CuratorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.profiles.len(), 1);
        assert_eq!(config.profiles[0].output_bound, 8);
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = std::env::temp_dir().join("curator-config-test");
        let path = dir.join("config.toml");
        let mut config = CuratorConfig::default();
        let mut profile = UseCaseProfile::named("newsletter");
        profile.fallback_categories = vec!["style".into()];
        config.profiles.push(profile);

        config.save_to(&path).unwrap();
        let loaded = CuratorConfig::load_from(&path).unwrap();
        assert_eq!(loaded.profiles[0].name, "newsletter");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_invalid_profile() {
        let dir = std::env::temp_dir().join("curator-config-invalid");
        std::fs::create_dir_all(&dir).ok();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[[profiles]]\nname = \"broken\"\n").unwrap();
        assert!(matches!(CuratorConfig::load_from(&path), Err(CuratorError::Config(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_home_dir() {
        assert!(CuratorConfig::home_dir().to_string_lossy().contains("curator"));
    }
}
