use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::moderation::DEFAULT_BANNED_WORDS;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://…` for the hosted store, `sqlite:…` for local runs
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    pub banned_words: Vec<String>,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            banned_words: DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub moderation: ModerationConfig,
}

impl Config {
    /// Loads configuration from defaults, config files and `TRUTHDARE_*` env vars.
    ///
    /// An explicit `path` replaces the file lookup and must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = ConfigBuilder::builder()
            // Set defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite:truthdare.db")?
            .set_default("database.max_connections", 10)?
            .set_default("logging.level", "info")?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("moderation.banned_words", DEFAULT_BANNED_WORDS.to_vec())?;

        let settings = match path {
            Some(path) => settings.add_source(File::from(path).required(true)),
            None => {
                // Try to load from truthdare.toml in current directory
                let settings = if let Ok(current_dir) = env::current_dir() {
                    let config_path = current_dir.join("truthdare.toml");
                    if config_path.exists() {
                        settings.add_source(File::from(config_path))
                    } else {
                        settings
                    }
                } else {
                    settings
                };

                // Try to load from ~/.config/truthdare/server.toml
                if let Some(config_dir) = dirs_config_path() {
                    settings.add_source(File::with_name(&config_dir).required(false))
                } else {
                    settings
                }
            }
        };

        // Override with environment variables, e.g. TRUTHDARE_DATABASE__URL
        let settings = settings.add_source(
            Environment::with_prefix("TRUTHDARE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .with_list_parse_key("moderation.banned_words"),
        );

        settings.build()?.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn dirs_config_path() -> Option<String> {
    env::var("HOME")
        .ok()
        .map(|home| format!("{}/.config/truthdare/server.toml", home))
}
