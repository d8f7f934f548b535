// ABOUTME: Configuration management for the aiprompt application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::template::QualityChecker;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default = "default_output_format")]
    pub output_format: String,

    #[serde(default)]
    pub quality: QualityChecker,

    #[serde(default)]
    pub template_vars: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("aiprompt-store.json")
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            output_format: default_output_format(),
            quality: QualityChecker::default(),
            template_vars: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("aiprompt.yaml"),
            PathBuf::from("aiprompt.yml"),
            PathBuf::from(".aiprompt.yaml"),
            PathBuf::from(".aiprompt.yml"),
        ];

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".aiprompt").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("aiprompt.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(store_path) = std::env::var("AIPROMPT_STORE_PATH") {
            self.store_path = PathBuf::from(store_path);
        }
        if let Ok(format) = std::env::var("AIPROMPT_OUTPUT_FORMAT") {
            self.output_format = format;
        }
        if let Ok(level) = std::env::var("AIPROMPT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("AIPROMPT_LOG_FORMAT") {
            self.logging.format = format;
        }

        if self.quality.min_length > self.quality.max_length {
            return Err(anyhow::anyhow!(
                "quality.min_length ({}) must not exceed quality.max_length ({})",
                self.quality.min_length,
                self.quality.max_length
            ));
        }

        Ok(())
    }

    /// Merge additional variables into template variables
    pub fn merge_variables(&mut self, vars: HashMap<String, String>) {
        self.template_vars.extend(vars);
    }
}
