mod app;

pub use app::TicTacToeApp;
