//! Editor configuration
//!
//! Defaults for new labels, the auto-replace placeholder prefix and the
//! location of dialog graphics. The configuration is handed to each editor
//! when it is constructed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{LabelCategory, Rgb};

/// Default name given to labels created with the "New" button
pub const DEFAULT_NEW_LABEL_NAME: &str = "New Item";

/// Default prefix for generated replacement keywords
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "keyword";

/// Name and colour used for a freshly added label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelDefaults {
    pub name: String,
    pub color: Rgb,
}

impl Default for LabelDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_NEW_LABEL_NAME.to_string(),
            color: Rgb::BLACK,
        }
    }
}

/// Configuration for the project settings editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Defaults for new status labels
    pub status_defaults: LabelDefaults,
    /// Defaults for new importance labels
    pub importance_defaults: LabelDefaults,
    /// Prefix of auto-generated replacement keywords (`keyword1`, `keyword2`, ...)
    pub placeholder_prefix: String,
    /// Directory holding the application's graphics
    pub asset_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            status_defaults: LabelDefaults::default(),
            importance_defaults: LabelDefaults::default(),
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            asset_dir: default_asset_dir(),
        }
    }
}

impl EditorConfig {
    /// Defaults for new labels of the given category
    pub fn label_defaults(&self, category: LabelCategory) -> &LabelDefaults {
        match category {
            LabelCategory::Status => &self.status_defaults,
            LabelCategory::Importance => &self.importance_defaults,
        }
    }

    /// Path to the banner graphic shown beside the settings tabs
    pub fn banner_graphic(&self) -> PathBuf {
        self.asset_dir.join("graphics").join("block.svg")
    }

    /// Parse a configuration from YAML; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EditorConfig =
            serde_yaml::from_str(yaml).context("Failed to parse editor configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read editor configuration: {:?}", path))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid editor configuration in {:?}", path))
    }

    /// Load a configuration file, or return defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No editor configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Serialize to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that generated keywords survive key sanitization unchanged
    pub fn validate(&self) -> Result<()> {
        if self.placeholder_prefix.is_empty() {
            anyhow::bail!("placeholder_prefix must not be empty");
        }
        if !self.placeholder_prefix.chars().all(char::is_alphanumeric) {
            anyhow::bail!(
                "placeholder_prefix must be alphanumeric, got {:?}",
                self.placeholder_prefix
            );
        }
        Ok(())
    }
}

/// Get the configuration directory, e.g. `~/.config/folio`
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio"))
}

/// Get the default editor configuration path
pub fn default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join("editor.yaml"))
}

fn default_asset_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("folio"))
        .unwrap_or_else(|| PathBuf::from("assets"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.placeholder_prefix, "keyword");
        assert_eq!(config.status_defaults.name, "New Item");
        assert_eq!(config.importance_defaults.color, Rgb::BLACK);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "importance_defaults:\n  name: Minor\nplaceholder_prefix: word\n";
        let config = EditorConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.importance_defaults.name, "Minor");
        assert_eq!(config.importance_defaults.color, Rgb::BLACK);
        assert_eq!(config.status_defaults, LabelDefaults::default());
        assert_eq!(config.placeholder_prefix, "word");
        assert_eq!(
            config.label_defaults(LabelCategory::Importance).name,
            "Minor"
        );
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let result = EditorConfig::from_yaml_str("placeholder_prefix: \"key-\"\n");
        assert!(result.is_err());
        let result = EditorConfig::from_yaml_str("placeholder_prefix: \"\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_banner_graphic_path() {
        let config = EditorConfig {
            asset_dir: PathBuf::from("/opt/folio"),
            ..Default::default()
        };
        assert_eq!(
            config.banner_graphic(),
            PathBuf::from("/opt/folio/graphics/block.svg")
        );
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("editor.yaml");

        let mut config = EditorConfig::default();
        config.status_defaults.color = Rgb::new(0, 255, 0);
        fs::write(&path, config.to_yaml_string()?)?;

        let loaded = EditorConfig::load(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_load_or_default_missing_file() -> Result<()> {
        let dir = tempdir()?;
        let config = EditorConfig::load_or_default(&dir.path().join("missing.yaml"))?;
        assert_eq!(config, EditorConfig::default());
        Ok(())
    }
}
