//! CLI configuration

use std::path::PathBuf;

use antenna_core::NetworkConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "ANTENNA_CONFIG";

/// Path of the config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("antenna")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Map file used when --map is not given
    pub map: Option<PathBuf>,

    /// Largest accepted column
    pub max_x: Option<i32>,

    /// Treat lowercase map symbols as antennas
    pub accept_lowercase: Option<bool>,

    /// Default output format
    pub format: Option<String>,
}

impl Config {
    /// Load the config file, falling back to defaults
    pub fn load() -> Self {
        let path = config_file_path();
        let Ok(text) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(&path, text)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["map", "max_x", "accept_lowercase", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "map" => self.map.as_ref().map(|p| p.display().to_string()),
            "max_x" => self.max_x.map(|v| v.to_string()),
            "accept_lowercase" => self.accept_lowercase.map(|v| v.to_string()),
            "format" => self.format.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "map" => self.map = Some(PathBuf::from(value)),
            "max_x" => {
                let max_x: i32 = value
                    .parse()
                    .with_context(|| format!("Invalid max_x: {}", value))?;
                if max_x < 0 {
                    anyhow::bail!("max_x must not be negative");
                }
                self.max_x = Some(max_x);
            }
            "accept_lowercase" => {
                let accept: bool = value
                    .parse()
                    .with_context(|| format!("Invalid accept_lowercase: {}", value))?;
                self.accept_lowercase = Some(accept);
            }
            "format" => match value.to_lowercase().as_str() {
                "table" | "json" | "csv" => self.format = Some(value.to_lowercase()),
                _ => anyhow::bail!("Unknown format: {} (expected table, json or csv)", value),
            },
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    /// Network settings derived from this config
    pub fn network_config(&self) -> NetworkConfig {
        let mut config = NetworkConfig::default();
        if let Some(max_x) = self.max_x {
            config = config.with_max_x(max_x);
        }
        config.accept_lowercase(self.accept_lowercase.unwrap_or(false))
    }
}
