use std::future::Future;

use tokio::sync::mpsc;

use crate::games::tictactoe::{Mark, Outcome};

/// Incremental update for whoever draws the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStateUpdate {
    BoardChanged { index: usize, mark: Mark },
    StatusChanged(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverNotification {
    pub outcome: Outcome,
}

/// Everything a session emits, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    State(GameStateUpdate),
    GameOver(GameOverNotification),
}

pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, update: GameStateUpdate) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(
        &self,
        notification: GameOverNotification,
    ) -> impl Future<Output = ()> + Send;
}

/// Forwards events into an unbounded channel. A closed receiver is not an
/// error: the game keeps running without an audience.
#[derive(Clone)]
pub struct ChannelBroadcaster {
    sender: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelBroadcaster {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl GameBroadcaster for ChannelBroadcaster {
    async fn broadcast_state(&self, update: GameStateUpdate) {
        let _ = self.sender.send(GameEvent::State(update));
    }

    async fn broadcast_game_over(&self, notification: GameOverNotification) {
        let _ = self.sender.send(GameEvent::GameOver(notification));
    }
}
