//! Configuration file support for filequeue.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/filequeue/config.toml`.

use crate::select::SelectionOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub selection: SelectionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_message_file")]
    pub message_file: String,

    #[serde(default = "default_history_file")]
    pub history_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            message_file: default_message_file(),
            history_file: default_history_file(),
        }
    }
}

impl DataConfig {
    /// Path of the message store file
    pub fn message_path(&self) -> PathBuf {
        self.data_dir.join(&self.message_file)
    }

    /// Path of the selection history side file
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }
}

/// Random selection parameters configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_history")]
    pub history: usize,

    #[serde(default = "default_warn_after_tries")]
    pub warn_after_tries: u32,

    #[serde(default = "default_max_tries")]
    pub max_tries: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            history: default_history(),
            warn_after_tries: default_warn_after_tries(),
            max_tries: default_max_tries(),
        }
    }
}

impl SelectionConfig {
    /// Convert to validated selection options
    pub fn options(&self) -> Result<SelectionOptions> {
        let opts = SelectionOptions {
            history: self.history,
            warn_after_tries: self.warn_after_tries,
            max_tries: self.max_tries,
        };
        opts.validate()?;
        Ok(opts)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("filequeue")
}

fn default_message_file() -> String {
    "messages.txt".into()
}

fn default_history_file() -> String {
    "history.json".into()
}

fn default_history() -> usize {
    10
}

fn default_warn_after_tries() -> u32 {
    10
}

fn default_max_tries() -> u32 {
    1000
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("filequeue").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
