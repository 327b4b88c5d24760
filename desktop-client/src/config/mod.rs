mod main_config;
mod tictactoe_config;

pub use main_config::{ClientConfigManager, get_config_manager};
pub use tictactoe_config::TicTacToeConfig;
