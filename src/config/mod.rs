//! Configuration management for sshkey-normalize
//!
//! The tool works with no configuration at all. An optional TOML file can
//! move the output files and tune the generated client settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "SSHKEY_NORMALIZE_CONFIG";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Validation error
    #[error("Config validation failed: {0}")]
    Validation(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where files get written
    #[serde(default)]
    pub output: OutputConfig,

    /// Settings rendered into the SSH client config
    #[serde(default)]
    pub client: ClientSettings,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Private key destination
    #[serde(default = "default_key_path")]
    pub key_path: PathBuf,

    /// SSH client config destination
    #[serde(default = "default_ssh_config_path")]
    pub ssh_config_path: PathBuf,

    /// Copy existing files to `<path>.bak` before overwriting
    #[serde(default)]
    pub backup_existing: bool,
}

/// Connection defaults for the generated client config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// `ConnectTimeout`, seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u32,

    /// `ServerAliveInterval`, seconds
    #[serde(default = "default_server_alive_interval")]
    pub server_alive_interval: u32,

    /// `TCPKeepAlive`
    #[serde(default = "default_tcp_keepalive")]
    pub tcp_keepalive: bool,
}

// Default value functions
fn default_key_path() -> PathBuf {
    PathBuf::from("~/.ssh/id_rsa")
}

fn default_ssh_config_path() -> PathBuf {
    PathBuf::from("~/.ssh/config")
}

fn default_connect_timeout() -> u32 {
    10
}

fn default_server_alive_interval() -> u32 {
    60
}

fn default_tcp_keepalive() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            key_path: default_key_path(),
            ssh_config_path: default_ssh_config_path(),
            backup_existing: false,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            server_alive_interval: default_server_alive_interval(),
            tcp_keepalive: default_tcp_keepalive(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            client: ClientSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Checks in order:
    /// 1. Path from SSHKEY_NORMALIZE_CONFIG environment variable
    /// 2. ~/.config/sshkey-normalize/config.toml
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                let mut config = Self::default();
                config.expand_paths();
                Ok(config)
            }
        }
    }

    /// Load configuration with optional explicit path
    pub fn load_config(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml_str)?;
        config.expand_paths();
        config.validate_config()?;
        Ok(config)
    }

    /// Default config file location
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sshkey-normalize").join("config.toml"))
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        Self::default_config_path().filter(|p| p.exists())
    }

    /// Expand tilde in paths
    fn expand_paths(&mut self) {
        self.output.key_path = expand_path(&self.output.key_path);
        self.output.ssh_config_path = expand_path(&self.output.ssh_config_path);
    }

    /// Validate configuration values
    fn validate_config(&self) -> Result<(), ConfigError> {
        check_seconds("connect_timeout", self.client.connect_timeout)?;
        check_seconds("server_alive_interval", self.client.server_alive_interval)?;

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        if self.output.key_path == self.output.ssh_config_path {
            return Err(ConfigError::Validation(
                "key_path and ssh_config_path must differ".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_seconds(name: &str, value: u32) -> Result<(), ConfigError> {
    if !(1..=3600).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and 3600 seconds, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Expand tilde in path
fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(path_str.as_ref());
    PathBuf::from(expanded.into_owned())
}
