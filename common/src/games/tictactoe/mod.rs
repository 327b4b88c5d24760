mod board;
mod bot_controller;
mod game_state;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, BoardError};
pub use bot_controller::{
    BotInput, HARD_SEARCH_DEPTH, MEDIUM_SEARCH_DEPTH, MEDIUM_SMART_CHANCE, calculate_move,
    calculate_random_move, calculate_smart_move, find_best_move, find_winning_move,
};
pub use game_state::{MoveError, TicTacToeGameState};
pub use session::{TicTacToeSession, TicTacToeSessionState};
pub use settings::{DEFAULT_AI_DELAY, TicTacToeSessionSettings};
pub use types::{BOARD_SIZE, CELL_COUNT, Difficulty, Mark, Outcome, Symbol, WinningLine};
pub use win_detector::{WIN_LINES, check_win, check_win_with_line, evaluate};
