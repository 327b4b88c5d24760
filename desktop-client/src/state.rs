use tictactoe_common::games::tictactoe::{
    CELL_COUNT, Difficulty, Mark, Outcome, Symbol, TicTacToeSessionSettings, WinningLine,
};
use tictactoe_common::games::{GameEvent, GameStateUpdate};

/// Requests from the UI thread to the game task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    PlaceMark { index: usize },
    SetDifficulty(Difficulty),
    ChooseSymbol(Symbol),
    Restart,
    Quit,
}

/// What the window shows, rebuilt purely from session events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub cells: [Mark; CELL_COUNT],
    pub status: String,
    pub winning_line: Option<WinningLine>,
    pub difficulty: Difficulty,
    pub user_symbol: Symbol,
}

impl BoardView {
    pub fn new(settings: &TicTacToeSessionSettings) -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
            status: String::new(),
            winning_line: None,
            difficulty: settings.difficulty,
            user_symbol: settings.user_symbol,
        }
    }

    pub fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::State(GameStateUpdate::BoardChanged { index, mark }) => {
                if let Some(cell) = self.cells.get_mut(index) {
                    *cell = mark;
                }
                // Cells are only ever cleared by a restart.
                if mark.is_empty() {
                    self.winning_line = None;
                }
            }
            GameEvent::State(GameStateUpdate::StatusChanged(status)) => self.status = status,
            GameEvent::GameOver(notification) => {
                self.winning_line = match notification.outcome {
                    Outcome::Win { line, .. } => Some(line),
                    Outcome::InProgress | Outcome::Draw => None,
                };
            }
        }
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.winning_line.is_some_and(|line| line.contains(index))
    }
}
