//! Configuration module for storedesk
//!
//! Holds list, export and tag generation defaults. Configuration is stored
//! as TOML in the user's config directory, or read from an explicit path.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::ExportFormat;
use crate::tags::TagSettings;

/// Default page size of list views
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Export defaults
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ExportSettings {
    /// Format used when none is given on the command line
    pub format: ExportFormat,

    /// Directory exports are written to; the working directory when unset
    pub dir: Option<PathBuf>,
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StoredeskConfig {
    /// Suppress informational output by default
    pub quiet: bool,

    /// Items per page in list views
    pub page_size: usize,

    pub export: ExportSettings,

    pub tags: TagSettings,
}

impl Default for StoredeskConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            page_size: DEFAULT_PAGE_SIZE,
            export: ExportSettings::default(),
            tags: TagSettings::default(),
        }
    }
}

impl StoredeskConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("storedesk").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "writing default config");
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// Fields missing from the file take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file does not exist or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config path cannot be determined or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Page size, never zero
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::HintRule;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StoredeskConfig::default();
        assert!(!config.quiet);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.export.format, ExportFormat::Csv);
        assert!(config.export.dir.is_none());
        assert_eq!(config.tags.max_tags, 20);
        assert_eq!(config.tags.placeholder_categories, vec!["cat"]);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = StoredeskConfig::default();
        config.quiet = true;
        config.page_size = 25;
        config.export.format = ExportFormat::Spreadsheet;
        config.export.dir = Some(PathBuf::from("/tmp/exports"));
        config.tags.max_tags = 12;
        config.tags.extra_hints.push(HintRule::new(&["velvet"], &["luxury"]));

        config.save_to(&path).unwrap();
        let loaded = StoredeskConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "page_size = 50\n\n[tags]\nmax_tags = 8\n").unwrap();

        let config = StoredeskConfig::load_from(&path).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.tags.max_tags, 8);
        assert_eq!(config.tags.min_len, 2);
        assert_eq!(config.tags.placeholder_categories, vec!["cat"]);
        assert_eq!(config.export, ExportSettings::default());
        assert!(!config.quiet);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(StoredeskConfig::load_from(&temp.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_zero_page_size_reads_as_one() {
        let config = StoredeskConfig {
            page_size: 0,
            ..StoredeskConfig::default()
        };
        assert_eq!(config.page_size(), 1);
    }
}
