//! Game settings

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::board::Color;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side the human plays; the engine plays the other one
    pub human: Color,
    /// Pause before the automated reply
    pub thinking_delay_ms: u64,
    /// How long a check notice stays up
    pub notice_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human: Color::White,
            thinking_delay_ms: 500,
            notice_ms: 3000,
        }
    }
}

impl GameConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn computer(&self) -> Color {
        self.human.opponent()
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}
