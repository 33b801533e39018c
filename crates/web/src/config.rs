//! Server settings

use serde::Deserialize;

use chess_duel_core::{GameConfig, Result};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV: &str = "CHESS_DUEL_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub static_dir: String,
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            static_dir: "crates/web/static".to_string(),
            game: GameConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the file named by `CHESS_DUEL_CONFIG`, or falls back to defaults.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(path)?;
                Self::from_json(&raw)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
