mod config;
mod offline;
mod state;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;

use tictactoe_common::config::ConfigManager;
use tictactoe_common::games::ChannelBroadcaster;
use tictactoe_common::games::tictactoe::{
    Difficulty, Symbol, TicTacToeSession, TicTacToeSessionSettings,
};
use tictactoe_common::log;
use tictactoe_common::logger;

use config::{ClientConfigManager, get_config_manager};
use offline::run_tictactoe_game;
use ui::TicTacToeApp;

#[derive(Parser, Debug)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a minimax AI")]
struct Args {
    /// Path to the YAML config, defaults to tictactoe_config.yaml next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// easy, medium, hard or multi
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Symbol played by the human, X or O
    #[arg(long)]
    symbol: Option<Symbol>,

    /// Seed for the AI random source
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    use_log_prefix: bool,

    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager: ClientConfigManager = match &args.config {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => get_config_manager(),
    };
    let config = config_manager.get_config()?;

    logger::init_logger(
        args.use_log_prefix.then(|| "Client".to_string()),
        args.debug || config.debug_log,
    );

    let mut settings = TicTacToeSessionSettings::from(&config.tictactoe);
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(symbol) = args.symbol {
        settings.user_symbol = symbol;
    }
    let seed = args
        .seed
        .or(config.tictactoe.seed)
        .unwrap_or_else(rand::random);

    log!(
        "Starting {} game, human plays {}, seed {}",
        settings.difficulty,
        settings.user_symbol,
        seed
    );

    let (broadcaster, events) = ChannelBroadcaster::channel();
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    let session = TicTacToeSession::create("local", settings, seed, broadcaster);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.spawn(async move {
        run_tictactoe_game(session, &mut command_rx, Some(&config_manager)).await;
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 520.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |_cc| Ok(Box::new(TicTacToeApp::new(settings, events, command_tx)))),
    )?;

    runtime.shutdown_timeout(Duration::from_millis(200));
    Ok(())
}
