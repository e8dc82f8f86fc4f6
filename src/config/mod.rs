//! Configuration management module.
//!
//! This module handles loading, saving, and managing application
//! configuration: the Console API endpoint and token, the operator
//! identity used for reporter defaults, the theme, and the board shown on
//! startup.

mod error;

pub use error::ConfigError;

use crate::board::BoardKind;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/triage-tui";

/// Oversees management of configuration file.
///
#[derive(Clone)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub access_token: Option<String>,
    pub operator_name: String,
    pub operator_email: String,
    pub theme_name: String,
    pub default_board: BoardKind,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_operator_name")]
    pub operator_name: String,
    #[serde(default)]
    pub operator_email: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_board_key")]
    pub default_board: String,
}

fn default_operator_name() -> String {
    "Console Operator".to_string()
}

fn default_theme_name() -> String {
    "slate".to_string()
}

fn default_board_key() -> String {
    "moderation".to_string()
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            file_path: None,
            api_base_url: None,
            access_token: None,
            operator_name: default_operator_name(),
            operator_email: String::new(),
            theme_name: default_theme_name(),
            default_board: BoardKind::Moderation,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// path if provided. A missing file leaves the defaults in place — the
    /// application then runs offline until an endpoint is configured.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        // Try to create dir path if it doesn't exist
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.api_base_url = data.api_base_url;
            self.access_token = data.access_token;
            self.operator_name = data.operator_name;
            self.operator_email = data.operator_email;
            self.theme_name = data.theme_name;
            self.default_board =
                BoardKind::from_key(&data.default_board).unwrap_or(BoardKind::Moderation);
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            api_base_url: self.api_base_url.clone(),
            access_token: self.access_token.clone(),
            operator_name: self.operator_name.clone(),
            operator_email: self.operator_email.clone(),
            theme_name: self.theme_name.clone(),
            default_board: self.default_board.key().to_string(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Return the default configuration directory path.
    ///
    fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirectoryNotFound)?;
        Ok(home.join(DEFAULT_DIRECTORY_PATH))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_keeps_defaults() {
        let dir = std::env::temp_dir().join(format!("triage-tui-test-{}", std::process::id()));
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        assert!(config.api_base_url.is_none());
        assert_eq!(config.default_board, BoardKind::Moderation);
        assert_eq!(config.theme_name, "slate");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = std::env::temp_dir().join(format!(
            "triage-tui-test-rt-{}",
            std::process::id()
        ));
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        config.api_base_url = Some("https://console.example.com/api".to_string());
        config.operator_name = "Robin".to_string();
        config.default_board = BoardKind::Support;
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(
            reloaded.api_base_url.as_deref(),
            Some("https://console.example.com/api")
        );
        assert_eq!(reloaded.operator_name, "Robin");
        assert_eq!(reloaded.default_board, BoardKind::Support);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unknown_board_key_falls_back_to_moderation() {
        let dir = std::env::temp_dir().join(format!(
            "triage-tui-test-key-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(FILE_NAME),
            "default_board: analytics\noperator_email: ops@example.com\n",
        )
        .unwrap();
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(config.default_board, BoardKind::Moderation);
        assert_eq!(config.operator_email, "ops@example.com");
        fs::remove_dir_all(&dir).ok();
    }
}
