//! Locally persisted client preferences (`preferences.toml`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::client::DEFAULT_SERVER_URL;
use crate::error::CliError;

pub const SUPPORTED_LANGUAGES: [&str; 3] = ["en", "id", "zh"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub language: String,
    pub server_url: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            language: "en".to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl Preferences {
    /// `<config dir>/truthdare/preferences.toml`
    pub fn default_path() -> Result<PathBuf, CliError> {
        dirs::config_dir()
            .map(|dir| dir.join("truthdare").join("preferences.toml"))
            .ok_or_else(|| CliError::Preferences("No user config directory".to_string()))
    }

    /// Reads preferences, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            debug!("No preferences at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CliError::Preferences(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Preferences(format!("Failed to serialize preferences: {e}")))?;
        fs::write(path, content)?;
        debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), CliError> {
        let language = language.trim().to_lowercase();
        if !SUPPORTED_LANGUAGES.contains(&language.as_str()) {
            return Err(CliError::InvalidInput(format!(
                "Unsupported language '{language}', expected one of: {}",
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }
        self.language = language;
        Ok(())
    }
}
