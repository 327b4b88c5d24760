use std::time::Duration;

use super::types::{Difficulty, Symbol};

pub const DEFAULT_AI_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub difficulty: Difficulty,
    pub user_symbol: Symbol,
    /// Pause before an AI move is applied, for pacing only.
    pub ai_delay: Duration,
}

impl TicTacToeSessionSettings {
    pub fn ai_symbol(&self) -> Symbol {
        self.user_symbol.opponent()
    }

    pub fn is_ai_turn(&self, current_player: Symbol) -> bool {
        self.difficulty.has_ai() && current_player == self.ai_symbol()
    }
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            user_symbol: Symbol::X,
            ai_delay: DEFAULT_AI_DELAY,
        }
    }
}
