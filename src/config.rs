use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{AtlasError, Result};

const CONFIG_PATH: &str = "atlas.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Overlay file holding user-submitted places when no hosted
    /// database is configured.
    pub overlay_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            overlay_path: PathBuf::from("data/user-places.json"),
        }
    }
}

impl Config {
    /// Loads `atlas.toml` from the working directory, falling back to
    /// defaults when the file is absent.
    pub fn load() -> Result<Self> {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(content) => {
                let config: Config = toml::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(AtlasError::Config(format!(
                "Failed to read config file '{CONFIG_PATH}': {e}"
            ))),
        }
    }
}
