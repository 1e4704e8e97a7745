//! GameSynchronizer - the client-side view of one tic-tac-toe area.
//!
//! This module provides [`GameSynchronizer`], which holds the latest
//! authoritative snapshot, re-derives the local view on every update,
//! notifies subscribers of meaningful changes and forwards player commands.
//!
//! # Architecture
//!
//! GameSynchronizer uses pure functions (from sync-core) for all derivation
//! and only performs I/O through the [`CommandChannel`] trait.
//!
//! ```text
//! Authority → ingest() → sync-core (derive, diff, phase) → listeners
//! Player    → make_move() → CommandChannel → Authority
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tictactoe_sync_client::{GameSynchronizer, MockChannel, SyncConfig};
//!
//! let sync = GameSynchronizer::new(SyncConfig::new("p1", "area-1"), MockChannel::new());
//! sync.subscribe(|event| println!("{:?}", event));
//!
//! sync.ingest(area_from_server).await;
//! if sync.is_our_turn().await {
//!     sync.make_move(row, col).await?;
//! }
//! ```

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tictactoe_sync_core::{diff, Board, Change, DerivedView, GamePhase, PhaseEvent, ViewError};
use tictactoe_sync_types::{
    Command, CommandResponse, GameArea, GamePiece, GameStatus, GridPosition, InstanceId,
    TicTacToeMove,
};

use crate::channel::{ChannelError, CommandChannel};
use crate::config::SyncConfig;
use crate::events::{EventListeners, GameEvent, SubscriptionId};

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No instance is bound or the game is not in progress.
    #[error("no game in progress")]
    NoGameInProgress,

    /// The local participant holds neither slot.
    #[error("player is not in game")]
    PlayerNotInGame,

    /// The authority refused the command.
    #[error("command rejected: {0}")]
    RemoteRejection(String),

    /// Channel error.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Protocol error.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<ViewError> for ClientError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::PlayerNotInGame => ClientError::PlayerNotInGame,
        }
    }
}

/// Everything replaced together on ingest.
#[derive(Debug, Default)]
struct SyncState {
    area: Option<GameArea>,
    instance_id: Option<InstanceId>,
    view: Option<Arc<DerivedView>>,
    phase: GamePhase,
}

/// The main synchronizer.
///
/// One writer (`ingest`), any number of readers. Readers get immutable
/// `Arc<DerivedView>` snapshots that never mix two ingestions.
pub struct GameSynchronizer<C: CommandChannel> {
    config: SyncConfig,
    channel: C,
    state: Arc<Mutex<SyncState>>,
    listeners: EventListeners,
}

impl<C: CommandChannel> GameSynchronizer<C> {
    /// Create a new GameSynchronizer with no snapshot yet.
    pub fn new(config: SyncConfig, channel: C) -> Self {
        Self {
            config,
            channel,
            state: Arc::new(Mutex::new(SyncState::default())),
            listeners: EventListeners::new(),
        }
    }

    // ===========================================
    // Subscriptions
    // ===========================================

    /// Register a listener for [`GameEvent`]s.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener. Takes effect before the next notification.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ===========================================
    // Ingestion
    // ===========================================

    /// Replace the held model with `area` and notify subscribers of changes.
    ///
    /// Never fails. Events are emitted after the new state is in place, in
    /// the order: `GameUpdated`, `GameEnd`, `BoardChanged`, `TurnChanged`.
    pub async fn ingest(&self, area: GameArea) {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().await;

            let previous_view = state.view.clone();
            let model_changed = state.area.as_ref() != Some(&area);

            if let Some(game) = &area.game {
                if state.instance_id != Some(game.id) {
                    tracing::info!("Bound to game instance {}", game.id);
                }
                state.instance_id = Some(game.id);
            }

            let next_view = Arc::new(DerivedView::derive(
                area.state(),
                &self.config.local_player,
            ));

            let (phase, phase_events) = state.phase.on_status(area.state().map(|s| s.status));
            if phase != state.phase {
                tracing::info!("Game phase {:?} -> {:?}", state.phase, phase);
            }

            let changes = diff(previous_view.as_deref(), &next_view);
            tracing::debug!(
                "Ingested snapshot: moves={}, status={:?}, changes={:?}",
                next_view.move_count,
                next_view.status,
                changes
            );

            if model_changed {
                events.push(GameEvent::GameUpdated);
            }
            for event in phase_events {
                match event {
                    PhaseEvent::GameEnded => events.push(GameEvent::GameEnd(next_view.outcome)),
                    PhaseEvent::GameStarted => {
                        tracing::debug!("Game started: moves={}", next_view.move_count)
                    }
                }
            }
            for change in changes {
                events.push(match change {
                    Change::BoardChanged => GameEvent::BoardChanged(next_view.board),
                    Change::TurnChanged => GameEvent::TurnChanged(next_view.is_local_turn),
                });
            }

            state.area = Some(area);
            state.view = Some(next_view);
            state.phase = phase;
        }

        for event in &events {
            self.listeners.emit(event);
        }
    }

    /// Decode a MessagePack-encoded [`GameArea`] and ingest it.
    ///
    /// Only decoding can fail; nothing is changed if it does.
    pub async fn ingest_bytes(&self, bytes: &[u8]) -> Result<(), ClientError> {
        let area =
            GameArea::from_bytes(bytes).map_err(|e| ClientError::Serialization(e.to_string()))?;
        self.ingest(area).await;
        Ok(())
    }

    // ===========================================
    // Derived Views
    // ===========================================

    /// The current derived view (the empty view before any snapshot).
    pub async fn view(&self) -> Arc<DerivedView> {
        let state = self.state.lock().await;
        state
            .view
            .clone()
            .unwrap_or_else(|| Arc::new(DerivedView::empty()))
    }

    /// Current board.
    pub async fn board(&self) -> Board {
        self.view().await.board
    }

    /// Number of moves played.
    pub async fn move_count(&self) -> usize {
        self.view().await.move_count
    }

    /// Game status; `WaitingToStart` when no game exists.
    pub async fn status(&self) -> GameStatus {
        self.view().await.status
    }

    /// True if it is the local participant's turn.
    pub async fn is_our_turn(&self) -> bool {
        self.view().await.is_local_turn
    }

    /// The local participant's piece.
    pub async fn game_piece(&self) -> Result<GamePiece, ClientError> {
        Ok(self.view().await.local_piece()?)
    }

    /// The bound instance, if any.
    pub async fn instance_id(&self) -> Option<InstanceId> {
        self.state.lock().await.instance_id
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> GamePhase {
        self.state.lock().await.phase
    }

    /// The last ingested model.
    pub async fn area(&self) -> Option<GameArea> {
        self.state.lock().await.area.clone()
    }

    /// Configuration this synchronizer was built with.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Get a reference to the underlying channel (for testing).
    pub fn channel(&self) -> &C {
        &self.channel
    }

    // ===========================================
    // Commands
    // ===========================================

    /// Ask the authority to place our piece at (`row`, `col`).
    ///
    /// Fails with `NoGameInProgress` if no instance is bound or the game is
    /// not in progress, and with `PlayerNotInGame` if we hold no piece. Cell
    /// occupancy is not checked locally; a refusal from the authority comes
    /// back as `RemoteRejection`. The held snapshot is never modified here.
    ///
    /// Concurrent calls are not serialized; callers should disable input
    /// until the pending call settles.
    pub async fn make_move(&self, row: GridPosition, col: GridPosition) -> Result<(), ClientError> {
        let command = {
            let state = self.state.lock().await;
            let game_id = state.instance_id.ok_or(ClientError::NoGameInProgress)?;
            let view = match &state.view {
                Some(view) if view.status == GameStatus::InProgress => view,
                _ => return Err(ClientError::NoGameInProgress),
            };
            Command::GameMove {
                game_id,
                game_move: TicTacToeMove::new(row, col, view.local_piece()?),
            }
        };

        self.send(&command).await?;
        Ok(())
    }

    /// Join the area's game and bind to the instance the authority returns.
    pub async fn join_game(&self) -> Result<InstanceId, ClientError> {
        let game_id = self
            .send(&Command::JoinGame)
            .await?
            .ok_or_else(|| ClientError::Protocol("JoinGame reply carried no game id".into()))?;

        let mut state = self.state.lock().await;
        state.instance_id = Some(game_id);
        tracing::info!("Joined game instance {}", game_id);
        Ok(game_id)
    }

    /// Leave the bound game.
    pub async fn leave_game(&self) -> Result<(), ClientError> {
        let game_id = self
            .state
            .lock()
            .await
            .instance_id
            .ok_or(ClientError::NoGameInProgress)?;

        self.send(&Command::LeaveGame { game_id }).await?;
        Ok(())
    }

    /// Encode, send, and decode the reply to one command.
    async fn send(&self, command: &Command) -> Result<Option<InstanceId>, ClientError> {
        let bytes = command
            .to_bytes()
            .map_err(|e| ClientError::Serialization(e.to_string()))?;

        tracing::debug!(
            "Sending {} to area {}",
            command.kind(),
            self.config.area_id
        );
        let reply = self
            .channel
            .send_command(&self.config.area_id, &bytes)
            .await
            .map_err(|e| {
                tracing::warn!("{} failed to send: {}", command.kind(), e);
                e
            })?;

        let response = CommandResponse::from_bytes(&reply)
            .map_err(|e| ClientError::Serialization(e.to_string()))?;

        match response {
            CommandResponse::Accepted { game_id } => Ok(game_id),
            CommandResponse::Rejected { reason } => {
                tracing::warn!("{} rejected: {}", command.kind(), reason);
                Err(ClientError::RemoteRejection(reason))
            }
        }
    }
}
