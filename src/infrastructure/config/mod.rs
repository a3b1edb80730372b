//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::domain::entities::channel_name;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub server: ServerConfig,
    pub bot: BotConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub ssl: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub nick: String,
    /// NickServ IDENTIFY password
    pub password: Option<String>,
    pub prefix: String,
    /// Space separated, `#` optional
    pub channels: String,
    /// Space separated nicks trusted from startup
    pub admins: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StorageConfig {
    pub cache_dir: PathBuf,
    pub scoreboard: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "irc.rizon.net".to_string(),
            port: 6697,
            ssl: true,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            nick: "tsobot".to_string(),
            password: None,
            prefix: "!".to_string(),
            channels: "tso".to_string(),
            admins: "tso".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".cache"),
            scoreboard: PathBuf::from("scoreboard.json"),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Override fields from `TSOBOT_*` variables
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("TSOBOT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("TSOBOT_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(ssl) = var("TSOBOT_SSL").and_then(|s| s.parse().ok()) {
            self.server.ssl = ssl;
        }
        if let Some(nick) = var("TSOBOT_NICK") {
            self.bot.nick = nick;
        }
        if let Some(password) = var("TSOBOT_PASS") {
            self.bot.password = Some(password);
        }
        if let Some(prefix) = var("TSOBOT_PREFIX") {
            self.bot.prefix = prefix;
        }
        if let Some(channels) = var("TSOBOT_JOIN") {
            self.bot.channels = channels;
        }
        if let Some(admins) = var("TSOBOT_ADMIN") {
            self.bot.admins = admins;
        }
        if let Some(dir) = var("TSOBOT_CACHE_DIR") {
            self.storage.cache_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.nick.trim().is_empty() {
            return Err(ConfigError::MissingField("bot.nick".to_string()));
        }
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::MissingField("bot.prefix".to_string()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue("server.port must not be 0".to_string()));
        }
        Ok(())
    }

    /// Channel names to join, with `#` added where missing
    pub fn channels(&self) -> Vec<String> {
        self.bot.channels.split_whitespace().map(channel_name).collect()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
