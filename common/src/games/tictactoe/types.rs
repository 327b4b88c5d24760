use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Contents of a single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Mark::X => Some(Symbol::X),
            Mark::O => Some(Symbol::O),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }
}

impl From<Symbol> for Mark {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Mark::X,
            Symbol::O => Mark::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => symbol.fmt(f),
            None => f.write_str(" "),
        }
    }
}

/// A side in the game. Unlike [`Mark`] there is no empty variant, so the
/// opponent of a symbol always exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(alias = "x")]
    X,
    #[serde(alias = "o")]
    O,
}

impl Symbol {
    pub fn opponent(&self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => f.write_str("X"),
            Symbol::O => f.write_str("O"),
        }
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Symbol::X),
            "o" | "O" => Ok(Symbol::O),
            other => Err(format!("Unknown symbol '{}', expected X or O", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    /// Two humans share the board, no AI moves are made.
    #[serde(alias = "multi")]
    Multiplayer,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Multiplayer,
    ];

    pub fn has_ai(&self) -> bool {
        *self != Difficulty::Multiplayer
    }

    /// Lenient parsing for free-form settings: anything unrecognised plays
    /// as [`Difficulty::Medium`].
    pub fn from_setting(value: &str) -> Difficulty {
        value.parse().unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Multiplayer => "Multiplayer",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "multi" | "multiplayer" => Ok(Difficulty::Multiplayer),
            other => Err(format!("Unknown difficulty '{}'", other)),
        }
    }
}

/// Three cell indices forming a row, column or diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WinningLine(pub [usize; 3]);

impl WinningLine {
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win { symbol: Symbol, line: WinningLine },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Symbol> {
        match self {
            Outcome::Win { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_never_the_same_symbol() {
        assert_eq!(Symbol::X.opponent(), Symbol::O);
        assert_eq!(Symbol::O.opponent(), Symbol::X);
    }

    #[test]
    fn test_difficulty_parses_multi_alias() {
        assert_eq!("multi".parse::<Difficulty>(), Ok(Difficulty::Multiplayer));
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
    }

    #[test]
    fn test_unknown_difficulty_setting_falls_back_to_medium() {
        assert_eq!(Difficulty::from_setting("impossible"), Difficulty::Medium);
        assert_eq!(Difficulty::from_setting("easy"), Difficulty::Easy);
    }

    #[test]
    fn test_mark_from_symbol() {
        assert_eq!(Mark::from(Symbol::O), Mark::O);
        assert_eq!(Mark::X.symbol(), Some(Symbol::X));
        assert_eq!(Mark::Empty.symbol(), None);
    }
}
