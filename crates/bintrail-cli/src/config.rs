//! CLI configuration.

use std::{fs, path::{Path, PathBuf}};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file, looked up in the working directory.
pub const CONFIG_PATH: &str = "bintrail.toml";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(
        code(bintrail_cli::config_io),
        help("Check the file path and permissions")
    )]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(bintrail_cli::config_parse), help("Check your configuration syntax"))]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend serving payloads and patch-info documents.
    pub backend_url: String,

    /// Path of the SQLite database file.
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5352".to_string(),
            db_path: PathBuf::from("bintrail.db"),
        }
    }
}

impl Config {
    /// Loads the configuration, falling back to defaults when no file
    /// exists.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or(CONFIG_PATH);
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_string(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_when_file_is_missing() {
        let config = Config::load(Some("/nonexistent/bintrail.toml")).unwrap();
        assert_eq!(config.backend_url, "http://localhost:5352");
        assert_eq!(config.db_path, PathBuf::from("bintrail.db"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"backend_url = "http://backend:5352""#).unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.backend_url, "http://backend:5352");
        assert_eq!(config.db_path, PathBuf::from("bintrail.db"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend_url = [1, 2]").unwrap();

        assert!(matches!(
            Config::load(file.path().to_str()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
