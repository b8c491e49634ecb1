//! Config loading, path resolution and validation.
//!
//! Covers:
//! - `load` / `load_from` / `from_yaml_str` (YAML file I/O)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - Structural validation (names, behavior references)

use crate::error::ConfigError;
use crate::types::{BehaviorConfig, ElementConfig, LogLevel};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration: behaviors, the elements composing them, and
/// the diagnostic log level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub behaviors: Vec<BehaviorConfig>,
    pub elements: Vec<ElementConfig>,
}

impl Config {
    /// Load configuration from the default path, or return defaults when
    /// no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        log::debug!(
            "Config parsed: {} behaviors, {} elements",
            config.behaviors.len(),
            config.elements.len()
        );
        Ok(config)
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("a11y-keys")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/a11y-keys
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("a11y-keys")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Find a behavior by name.
    pub fn behavior(&self, name: &str) -> Option<&BehaviorConfig> {
        self.behaviors.iter().find(|b| b.name == name)
    }

    /// Find an element by name.
    pub fn element(&self, name: &str) -> Option<&ElementConfig> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Check names and behavior references.
    ///
    /// Composition cycles and malformed key strings are detected when
    /// binding tables are built, since that is where they are registered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut behavior_names = HashSet::new();
        for behavior in &self.behaviors {
            if behavior.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "behavior with empty name".to_string(),
                ));
            }
            if !behavior_names.insert(behavior.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate behavior '{}'",
                    behavior.name
                )));
            }
        }

        let mut element_names = HashSet::new();
        for element in &self.elements {
            if element.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "element with empty name".to_string(),
                ));
            }
            if !element_names.insert(element.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate element '{}'",
                    element.name
                )));
            }
        }

        let references = self
            .behaviors
            .iter()
            .map(|b| ("behavior", &b.name, &b.behaviors))
            .chain(
                self.elements
                    .iter()
                    .map(|e| ("element", &e.name, &e.behaviors)),
            );
        for (kind, owner, composed) in references {
            if let Some(missing) = composed
                .iter()
                .find(|name| !behavior_names.contains(name.as_str()))
            {
                return Err(ConfigError::Validation(format!(
                    "{kind} '{owner}' composes unknown behavior '{missing}'"
                )));
            }
        }

        Ok(())
    }
}
