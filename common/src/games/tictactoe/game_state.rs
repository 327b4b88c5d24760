use derive_more::{Display, Error};

use super::board::{Board, BoardError};
use super::types::{Outcome, Symbol};
use super::win_detector::evaluate;

/// Reasons a move is refused. None of them change the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    #[display("Cell index {index} is out of range")]
    InvalidIndex { index: usize },
    #[display("Cell {index} is already marked")]
    CellOccupied { index: usize },
    #[display("Game is already over")]
    GameOver,
    #[display("It is {current}'s turn")]
    NotYourTurn { current: Symbol },
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfRange { index } => MoveError::InvalidIndex { index },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_player: Symbol,
    pub game_active: bool,
    pub outcome: Outcome,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    /// X always opens.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Symbol::X,
            game_active: true,
            outcome: Outcome::InProgress,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Places the current player's symbol at `index` and returns the
    /// resulting outcome. The turn passes to the other side only while the
    /// game is still running.
    pub fn place_mark(&mut self, index: usize) -> Result<Outcome, MoveError> {
        if !self.game_active {
            return Err(MoveError::GameOver);
        }

        if !self.board.is_empty(index)? {
            return Err(MoveError::CellOccupied { index });
        }

        self.board.place(index, self.current_player);
        self.outcome = evaluate(&self.board);

        if self.outcome.is_terminal() {
            self.game_active = false;
        } else {
            self.current_player = self.current_player.opponent();
        }

        Ok(self.outcome)
    }

    pub fn winner(&self) -> Option<Symbol> {
        self.outcome.winner()
    }

    /// Text shown to players for the current position.
    pub fn status_message(&self) -> String {
        match self.outcome {
            Outcome::InProgress => format!("{}'s turn", self.current_player),
            Outcome::Win { symbol, .. } => format!("{} Wins!", symbol),
            Outcome::Draw => "It's a Draw!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::{Mark, WinningLine};

    #[test]
    fn test_new_game_starts_with_x() {
        let state = TicTacToeGameState::new();

        assert_eq!(state.current_player, Symbol::X);
        assert!(state.game_active);
        assert_eq!(state.board, Board::new());
        assert_eq!(state.status_message(), "X's turn");
    }

    #[test]
    fn test_place_mark_alternates_turns() {
        let mut state = TicTacToeGameState::new();

        state.place_mark(4).unwrap();
        assert_eq!(state.current_player, Symbol::O);
        state.place_mark(0).unwrap();
        assert_eq!(state.current_player, Symbol::X);

        assert_eq!(state.board.get(4), Ok(Mark::X));
        assert_eq!(state.board.get(0), Ok(Mark::O));
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_changes() {
        let mut state = TicTacToeGameState::new();
        state.place_mark(4).unwrap();
        let before = state;

        assert_eq!(state.place_mark(4), Err(MoveError::CellOccupied { index: 4 }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut state = TicTacToeGameState::new();

        assert_eq!(state.place_mark(9), Err(MoveError::InvalidIndex { index: 9 }));
        assert_eq!(state, TicTacToeGameState::new());
    }

    #[test]
    fn test_win_ends_game_and_keeps_winner_as_current() {
        let mut state = TicTacToeGameState::new();
        for index in [0, 3, 1, 4] {
            state.place_mark(index).unwrap();
        }

        let outcome = state.place_mark(2).unwrap();

        assert_eq!(
            outcome,
            Outcome::Win {
                symbol: Symbol::X,
                line: WinningLine([0, 1, 2])
            }
        );
        assert!(!state.game_active);
        assert_eq!(state.current_player, Symbol::X);
        assert_eq!(state.winner(), Some(Symbol::X));
        assert_eq!(state.status_message(), "X Wins!");
        assert_eq!(state.place_mark(8), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw_ends_game() {
        let mut state = TicTacToeGameState::new();
        // X O X / X O O / O X X
        for index in [0, 1, 2, 4, 3, 5, 7, 6] {
            state.place_mark(index).unwrap();
        }

        assert_eq!(state.place_mark(8), Ok(Outcome::Draw));
        assert!(!state.game_active);
        assert_eq!(state.status_message(), "It's a Draw!");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = TicTacToeGameState::new();
        state.place_mark(0).unwrap();
        state.place_mark(1).unwrap();

        state.reset();

        assert_eq!(state, TicTacToeGameState::new());
    }
}
