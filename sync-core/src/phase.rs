//! Game lifecycle state machine.
//!
//! The synchronizer never decides transitions itself: the phase is a pure
//! function of the last observed status. This module only reports which
//! lifecycle edges were crossed so the client can emit events for them.

use tictactoe_sync_types::GameStatus;

/// Lifecycle phase of the area's game, as observed from snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// No snapshot with a game has arrived.
    #[default]
    NoGame,
    /// A game exists but has not started.
    WaitingToStart,
    /// Both players seated, moves being played.
    InProgress,
    /// Game over. Terminal for this instance.
    Finished,
}

/// Lifecycle edges reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Entered `InProgress` from any other phase.
    GameStarted,
    /// Moved from `InProgress` to `Finished`.
    GameEnded,
}

impl GamePhase {
    /// Create a machine in the `NoGame` phase.
    pub fn new() -> Self {
        Self::NoGame
    }

    /// The phase implied by a status; `None` means no game exists.
    pub fn from_status(status: Option<GameStatus>) -> Self {
        match status {
            None => Self::NoGame,
            Some(GameStatus::WaitingToStart) => Self::WaitingToStart,
            Some(GameStatus::InProgress) => Self::InProgress,
            Some(GameStatus::Over) => Self::Finished,
        }
    }

    /// Observe a new status and return the new phase plus the edges crossed.
    ///
    /// Pure: the caller acts on the returned events.
    pub fn on_status(self, status: Option<GameStatus>) -> (Self, Vec<PhaseEvent>) {
        let next = Self::from_status(status);
        let events = match (self, next) {
            (Self::InProgress, Self::InProgress) => vec![],
            (_, Self::InProgress) => vec![PhaseEvent::GameStarted],
            (Self::InProgress, Self::Finished) => vec![PhaseEvent::GameEnded],
            _ => vec![],
        };
        (next, events)
    }

    /// True while moves can be played.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}
