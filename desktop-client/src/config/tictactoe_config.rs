use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use tictactoe_common::config::Validate;
use tictactoe_common::games::tictactoe::{
    DEFAULT_AI_DELAY, Difficulty, Symbol, TicTacToeSessionSettings,
};

const MAX_AI_DELAY_MS: u64 = 10_000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct TicTacToeConfig {
    #[serde(default, deserialize_with = "deserialize_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default = "default_user_symbol")]
    pub user_symbol: Symbol,
    #[serde(default = "default_ai_delay_ms")]
    pub ai_delay_ms: u64,
    /// Fixed RNG seed for reproducible AI play; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_user_symbol() -> Symbol {
    Symbol::X
}

fn default_ai_delay_ms() -> u64 {
    DEFAULT_AI_DELAY.as_millis() as u64
}

/// Unknown difficulty names fall back to medium instead of failing the
/// whole config.
fn deserialize_difficulty<'de, D>(deserializer: D) -> Result<Difficulty, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(Difficulty::from_setting(&value))
}

impl Validate for TicTacToeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.ai_delay_ms > MAX_AI_DELAY_MS {
            return Err(format!(
                "AI delay must be at most {} ms, got {}",
                MAX_AI_DELAY_MS, self.ai_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            user_symbol: default_user_symbol(),
            ai_delay_ms: default_ai_delay_ms(),
            seed: None,
        }
    }
}

impl From<&TicTacToeConfig> for TicTacToeSessionSettings {
    fn from(config: &TicTacToeConfig) -> Self {
        Self {
            difficulty: config.difficulty,
            user_symbol: config.user_symbol,
            ai_delay: Duration::from_millis(config.ai_delay_ms),
        }
    }
}
