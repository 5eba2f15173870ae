//! Bot configuration
//!
//! Values come from an optional TOML file and are then overridden by the
//! command line. Every section has defaults, so an empty file is valid.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{BotError, Result};
use crate::protocol::messages::LoginRequest;

/// Game server address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "wgforge-srv.wargaming.net".to_string(),
            port: 443,
        }
    }
}

/// Credentials and game selection sent with LOGIN
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub name: String,
    pub password: Option<String>,
    /// Game to join; the server picks one when absent
    pub game: Option<String>,
    pub num_turns: Option<u32>,
    pub num_players: Option<u32>,
    pub is_observer: bool,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            name: "Sorcerer".to_string(),
            password: Some("42".to_string()),
            game: None,
            num_turns: Some(45),
            num_players: Some(1),
            is_observer: false,
        }
    }
}

impl LoginConfig {
    /// Build the LOGIN payload, appending `suffix` to the player name
    ///
    /// Several bots started from one config need distinct names.
    pub fn to_request(&self, suffix: Option<usize>) -> LoginRequest {
        let name = match suffix {
            Some(n) => format!("{}{}", self.name, n),
            None => self.name.clone(),
        };
        LoginRequest {
            name,
            password: self.password.clone(),
            game: self.game.clone(),
            num_turns: self.num_turns,
            num_players: self.num_players,
            is_observer: self.is_observer,
        }
    }
}

/// Tuning for the decision engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// How many own units should hold the base before the rest roam
    pub base_squad_size: usize,
    /// Seed for the roaming choice; entropy when absent
    pub seed: Option<u64>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            base_squad_size: 2,
            seed: None,
        }
    }
}

/// Complete bot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub server: ServerConfig,
    pub login: LoginConfig,
    pub strategy: StrategyConfig,
}

impl BotConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: BotConfig =
            toml::from_str(content).map_err(|e| BotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BotError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(BotError::Config("server.host must not be empty".into()));
        }
        if self.login.name.trim().is_empty() {
            return Err(BotError::Config("login.name must not be empty".into()));
        }
        if self.login.num_players == Some(0) {
            return Err(BotError::Config("login.num_players must be at least 1".into()));
        }
        if self.login.num_turns == Some(0) {
            return Err(BotError::Config("login.num_turns must be at least 1".into()));
        }
        Ok(())
    }
}
