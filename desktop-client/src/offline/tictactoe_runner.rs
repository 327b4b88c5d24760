use tokio::sync::mpsc;

use tictactoe_common::games::GameBroadcaster;
use tictactoe_common::games::tictactoe::TicTacToeSession;
use tictactoe_common::{debug_log, log};

use crate::config::ClientConfigManager;
use crate::state::ClientCommand;

/// Drives one local session until the UI quits or drops its sender.
/// Commands are applied strictly in arrival order.
pub async fn run_tictactoe_game<B: GameBroadcaster>(
    session: TicTacToeSession<B>,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    config_manager: Option<&ClientConfigManager>,
) {
    session.reset().await;

    while let Some(command) = command_rx.recv().await {
        match command {
            ClientCommand::PlaceMark { index } => {
                if let Err(e) = session.submit_move(index).await {
                    debug_log!("Ignoring click on cell {}: {}", index, e);
                }
            }
            ClientCommand::SetDifficulty(difficulty) => {
                session.set_difficulty(difficulty).await;
                remember_settings(&session, config_manager).await;
            }
            ClientCommand::ChooseSymbol(symbol) => {
                session.choose_symbol(symbol).await;
                remember_settings(&session, config_manager).await;
            }
            ClientCommand::Restart => session.reset().await,
            ClientCommand::Quit => break,
        }
    }

    log!("Local game finished");
}

async fn remember_settings<B: GameBroadcaster>(
    session: &TicTacToeSession<B>,
    config_manager: Option<&ClientConfigManager>,
) {
    let Some(config_manager) = config_manager else {
        return;
    };
    let settings = session.settings().await;

    let result = config_manager.get_config().and_then(|mut config| {
        config.tictactoe.difficulty = settings.difficulty;
        config.tictactoe.user_symbol = settings.user_symbol;
        config_manager.set_config(&config)
    });
    if let Err(e) = result {
        log!("Failed to save settings: {}", e);
    }
}
