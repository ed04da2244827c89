//! Configuration Management
//!
//! Handles persistent configuration storage for azenv.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default output path for the env file
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    /// Override for the az binary
    #[serde(default)]
    pub az_binary: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("azenv").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Get effective output path (CLI > config > ./.env)
    pub fn effective_output(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.output_path.clone())
            .unwrap_or_else(|| PathBuf::from(".env"))
    }

    /// Get effective az binary (CLI > config > az)
    pub fn effective_az_binary(&self, cli_override: Option<String>) -> String {
        cli_override
            .or_else(|| self.az_binary.clone())
            .unwrap_or_else(|| "az".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_output_precedence() {
        let config = Config {
            output_path: Some(PathBuf::from("/tmp/from-config.env")),
            az_binary: None,
        };

        assert_eq!(
            config.effective_output(Some(PathBuf::from("cli.env"))),
            PathBuf::from("cli.env")
        );
        assert_eq!(
            config.effective_output(None),
            PathBuf::from("/tmp/from-config.env")
        );
        assert_eq!(Config::default().effective_output(None), PathBuf::from(".env"));
    }

    #[test]
    fn test_effective_az_binary_defaults_to_az() {
        assert_eq!(Config::default().effective_az_binary(None), "az");
        assert_eq!(
            Config::default().effective_az_binary(Some("/usr/local/bin/az".to_string())),
            "/usr/local/bin/az"
        );
    }
}
