use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::{debug_log, log};
use crate::games::{GameBroadcaster, GameOverNotification, GameStateUpdate, SessionRng};
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::{MoveError, TicTacToeGameState};
use super::settings::TicTacToeSessionSettings;
use super::types::{CELL_COUNT, Difficulty, Mark, Outcome, Symbol};

pub struct TicTacToeSessionState {
    pub session_id: String,
    pub game_state: TicTacToeGameState,
    pub settings: TicTacToeSessionSettings,
    pub rng: SessionRng,
    /// Bumped on every reset. A scheduled AI move only lands if the
    /// generation it captured is still current.
    pub generation: u64,
    pub pending_ai_move: Option<JoinHandle<()>>,
}

/// Controller for one game: owns the board and turn state, forwards
/// accepted moves to the broadcaster and drives the AI opponent.
///
/// Cloning yields another handle to the same game.
#[derive(Clone)]
pub struct TicTacToeSession<B: GameBroadcaster> {
    state: Arc<Mutex<TicTacToeSessionState>>,
    broadcaster: B,
}

impl<B: GameBroadcaster> TicTacToeSession<B> {
    /// Builds an idle session; call [`Self::reset`] to start the first game.
    pub fn create(
        session_id: impl Into<String>,
        settings: TicTacToeSessionSettings,
        seed: u64,
        broadcaster: B,
    ) -> Self {
        let state = TicTacToeSessionState {
            session_id: session_id.into(),
            game_state: TicTacToeGameState::new(),
            settings,
            rng: SessionRng::new(seed),
            generation: 0,
            pending_ai_move: None,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            broadcaster,
        }
    }

    pub async fn snapshot(&self) -> TicTacToeGameState {
        self.state.lock().await.game_state
    }

    pub async fn settings(&self) -> TicTacToeSessionSettings {
        self.state.lock().await.settings
    }

    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        self.restart(&mut state).await;
    }

    pub async fn configure(&self, difficulty: Difficulty, user_symbol: Symbol) {
        self.update_settings(|settings| {
            settings.difficulty = difficulty;
            settings.user_symbol = user_symbol;
        })
        .await;
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) {
        self.update_settings(|settings| settings.difficulty = difficulty)
            .await;
    }

    pub async fn choose_symbol(&self, user_symbol: Symbol) {
        self.update_settings(|settings| settings.user_symbol = user_symbol)
            .await;
    }

    /// Changes the settings and restarts under a single lock, so concurrent
    /// changes to the other field are never lost.
    async fn update_settings<F>(&self, update: F)
    where
        F: FnOnce(&mut TicTacToeSessionSettings),
    {
        let mut state = self.state.lock().await;
        update(&mut state.settings);
        log!(
            "[session:{}] Configured difficulty={} user={}",
            state.session_id, state.settings.difficulty, state.settings.user_symbol
        );
        self.restart(&mut state).await;
    }

    /// Human move. Refused moves leave the game untouched; callers are free
    /// to ignore the error.
    pub async fn submit_move(&self, index: usize) -> Result<(), MoveError> {
        let mut state = self.state.lock().await;

        let current = state.game_state.current_player;
        if state.game_state.game_active && state.settings.is_ai_turn(current) {
            debug_log!("[session:{}] Ignored move {} during AI turn", state.session_id, index);
            return Err(MoveError::NotYourTurn { current });
        }

        match self.apply_move(&mut state, index).await {
            Ok(_) => Ok(()),
            Err(e) => {
                debug_log!("[session:{}] Ignored move {}: {}", state.session_id, index, e);
                Err(e)
            }
        }
    }

    async fn restart(&self, state: &mut TicTacToeSessionState) {
        state.generation += 1;
        if let Some(pending) = state.pending_ai_move.take() {
            pending.abort();
        }

        state.game_state.reset();

        for index in 0..CELL_COUNT {
            self.broadcaster
                .broadcast_state(GameStateUpdate::BoardChanged {
                    index,
                    mark: Mark::Empty,
                })
                .await;
        }
        self.broadcaster
            .broadcast_state(GameStateUpdate::StatusChanged(
                state.game_state.status_message(),
            ))
            .await;

        log!(
            "[session:{}] New game #{} ({}, user plays {})",
            state.session_id, state.generation, state.settings.difficulty, state.settings.user_symbol
        );

        self.schedule_ai_move(state);
    }

    /// Shared by human and AI moves.
    async fn apply_move(
        &self,
        state: &mut TicTacToeSessionState,
        index: usize,
    ) -> Result<Outcome, MoveError> {
        let symbol = state.game_state.current_player;
        let outcome = state.game_state.place_mark(index)?;

        self.broadcaster
            .broadcast_state(GameStateUpdate::BoardChanged {
                index,
                mark: symbol.into(),
            })
            .await;
        self.broadcaster
            .broadcast_state(GameStateUpdate::StatusChanged(
                state.game_state.status_message(),
            ))
            .await;

        if outcome.is_terminal() {
            log!("[session:{}] {}", state.session_id, state.game_state.status_message());
            self.broadcaster
                .broadcast_game_over(GameOverNotification { outcome })
                .await;
        } else {
            self.schedule_ai_move(state);
        }

        Ok(outcome)
    }

    fn schedule_ai_move(&self, state: &mut TicTacToeSessionState) {
        if !state.game_state.game_active
            || !state.settings.is_ai_turn(state.game_state.current_player)
        {
            return;
        }

        let session = self.clone();
        let generation = state.generation;
        let delay = state.settings.ai_delay;

        state.pending_ai_move = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.play_ai_turn(generation).await;
        }));
    }

    async fn play_ai_turn(&self, generation: u64) {
        let (input, difficulty, mut rng, session_id) = {
            let mut state = self.state.lock().await;

            if state.generation != generation {
                debug_log!("[session:{}] Dropped AI move from game #{}", state.session_id, generation);
                return;
            }
            let current = state.game_state.current_player;
            if !state.game_state.game_active || !state.settings.is_ai_turn(current) {
                return;
            }

            let ai_symbol = state.settings.ai_symbol();
            (
                BotInput::from_game_state(&state.game_state, ai_symbol),
                state.settings.difficulty,
                state.rng.fork(),
                state.session_id.clone(),
            )
        };

        let calculated_move =
            tokio::task::spawn_blocking(move || calculate_move(difficulty, &input, &mut rng)).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug_log!("[session:{}] Dropped AI move from game #{}", session_id, generation);
            return;
        }
        state.pending_ai_move = None;

        match calculated_move {
            Ok(Some(index)) => {
                debug_log!("[session:{}] AI ({}) plays {}", session_id, difficulty, index);
                if let Err(e) = self.apply_move(&mut state, index).await {
                    log!("[session:{}] AI failed to place mark at {}: {}", session_id, index, e);
                }
            }
            Ok(None) => {
                log!("[session:{}] AI found no move on an active board", session_id);
                debug_assert!(
                    state.game_state.board.is_full(),
                    "AI returned no move while empty cells remain"
                );
            }
            Err(e) => {
                log!("[session:{}] AI search task failed: {}", session_id, e);
            }
        }
    }
}
