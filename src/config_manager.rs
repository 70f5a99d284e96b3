use crate::cli::Cli;
use crate::config::DevServerConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

/// Configuration file format for the dev server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Dev-server configuration: plugins and proxy routes
    #[serde(default)]
    pub server: DevServerConfig,
}

/// Loads, merges, and saves dev-server configuration files.
///
/// The file format is chosen by extension: `.json`, `.yaml`/`.yml`, or TOML
/// for anything else. A missing file yields the default configuration.
pub struct ConfigManager {
    config_path: String,
    config: ConfigFile,
}

impl ConfigManager {
    pub fn new<P: AsRef<Path>>(config_path: P) -> Self {
        let config_path = config_path.as_ref().to_string_lossy().to_string();
        let config = Self::load_config(&config_path).unwrap_or_default();

        Self {
            config_path,
            config,
        }
    }

    /// Loads configuration from file, falling back to defaults when the file
    /// does not exist
    pub fn load_config(path: &str) -> Result<ConfigFile, ConfigError> {
        if !Path::new(path).exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(path)?;
        let config: ConfigFile = if path.ends_with(".json") {
            serde_json::from_str(&content)?
        } else if path.ends_with(".yaml") || path.ends_with(".yml") {
            serde_yaml::from_str(&content)?
        } else {
            // Default to TOML
            toml::from_str(&content)?
        };

        Ok(config)
    }

    /// Saves the current configuration to its file
    pub fn save_config(&self) -> Result<(), ConfigError> {
        let content = Self::render(&self.config_path, &self.config)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Creates a default configuration file at the specified path
    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let config = ConfigFile::default();
        let path_str = path.as_ref().to_string_lossy();
        let content = Self::render(&path_str, &config)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    fn render(path: &str, config: &ConfigFile) -> Result<String, ConfigError> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(config)?
        } else if path.ends_with(".yaml") || path.ends_with(".yml") {
            serde_yaml::to_string(config)?
        } else {
            // Default to TOML
            toml::to_string_pretty(config)?
        };
        Ok(content)
    }

    /// Gets the current configuration
    pub fn get_config(&self) -> &ConfigFile {
        &self.config
    }

    /// Merges CLI arguments into the loaded configuration
    pub fn merge_with_cli_args(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(backend) = &cli.backend {
            let target = Url::parse(backend)
                .map_err(|_| ConfigError::InvalidBackend(backend.clone()))?;
            self.config.server.set_backend(&target);
        }
        Ok(())
    }

    /// Validates the current configuration
    pub fn validate_config(&self) -> Result<(), Vec<String>> {
        self.config.server.validate()
    }

    /// Gets the effective dev-server configuration after merging
    pub fn get_effective_config(&self) -> DevServerConfig {
        self.config.server.clone()
    }
}
