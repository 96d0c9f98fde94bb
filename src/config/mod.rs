//! Tool configuration for typegen
//!
//! Tool configuration (backend location, timeouts, storage override) is a
//! YAML file edited by the user. It is distinct from the generator
//! settings aggregate, which the tool persists on its own.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Generation backend connection
    pub backend: BackendConfig,

    /// Override for the generator-settings storage directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_dir: Option<PathBuf>,
}

/// Generation backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the generation API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        if self.backend.base_url.trim().is_empty() {
            return Err(anyhow!("Backend base_url must not be empty"));
        }

        if self.backend.timeout_secs == 0 {
            return Err(anyhow!("Backend timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            backend: BackendConfig::default(),
            settings_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.version, parsed.version);
        assert_eq!(config.backend.base_url, parsed.backend.base_url);
    }

    #[test]
    fn test_config_from_file() {
        let mut config = Config::default();
        config.backend.base_url = "http://typegen.internal:9000".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();

        let loaded = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.backend.base_url, "http://typegen.internal:9000");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.backend.timeout_secs = 30;
        config.version = "2.0".to_string();
        assert!(config.validate().is_err());
    }
}
