//! Derived views over an authoritative snapshot.
//!
//! A [`DerivedView`] is recomputed from scratch on every snapshot. It is
//! never patched incrementally, so it can always be checked against a
//! fresh derivation of the same input.

use thiserror::Error;
use tictactoe_sync_types::{GamePiece, GameStatus, PlayerId, TicTacToeState};

use crate::board::{board_from, Board};

/// Errors from querying a derived view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The local participant holds neither the X nor the O slot.
    #[error("player is not in game")]
    PlayerNotInGame,
}

/// Result of a finished game, relative to the local participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No winner.
    Tie,
    /// The local participant won.
    Win,
    /// Someone other than the local participant won.
    Loss,
}

/// Everything the presentation layer reads, derived from one snapshot plus
/// the local participant's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    /// Board replayed from the move log.
    pub board: Board,
    /// Number of moves played.
    pub move_count: usize,
    /// Game status; `WaitingToStart` when no game exists.
    pub status: GameStatus,
    /// Piece expected to move next, only while in progress.
    pub turn_piece: Option<GamePiece>,
    /// Participant expected to move next, if the slot resolves.
    pub turn_owner: Option<PlayerId>,
    /// True iff in progress and the turn owner is the local participant.
    pub is_local_turn: bool,
    /// Result relative to the local participant, only once over.
    pub outcome: Option<Outcome>,
    local_piece: Option<GamePiece>,
    x: Option<PlayerId>,
    o: Option<PlayerId>,
    winner: Option<PlayerId>,
}

impl DerivedView {
    /// Derive the view for `local` from an optional snapshot.
    ///
    /// `None` means no game has been created yet.
    pub fn derive(state: Option<&TicTacToeState>, local: &PlayerId) -> Self {
        let Some(state) = state else {
            return Self::empty();
        };

        let move_count = state.moves.len();
        let status = state.status;

        let turn_piece = match status {
            GameStatus::InProgress if move_count % 2 == 0 => Some(GamePiece::X),
            GameStatus::InProgress => Some(GamePiece::O),
            _ => None,
        };
        let turn_owner = turn_piece.and_then(|piece| slot(state, piece).cloned());
        let is_local_turn = turn_owner.as_ref() == Some(local);

        let local_piece = if state.x.as_ref() == Some(local) {
            Some(GamePiece::X)
        } else if state.o.as_ref() == Some(local) {
            Some(GamePiece::O)
        } else {
            None
        };

        let outcome = match (status, &state.winner) {
            (GameStatus::Over, None) => Some(Outcome::Tie),
            (GameStatus::Over, Some(w)) if w == local => Some(Outcome::Win),
            (GameStatus::Over, Some(_)) => Some(Outcome::Loss),
            _ => None,
        };

        Self {
            board: board_from(&state.moves),
            move_count,
            status,
            turn_piece,
            turn_owner,
            is_local_turn,
            outcome,
            local_piece,
            x: state.x.clone(),
            o: state.o.clone(),
            winner: state.winner.clone(),
        }
    }

    /// The view before any game exists: empty board, nobody's turn.
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
            move_count: 0,
            status: GameStatus::WaitingToStart,
            turn_piece: None,
            turn_owner: None,
            is_local_turn: false,
            outcome: None,
            local_piece: None,
            x: None,
            o: None,
            winner: None,
        }
    }

    /// The local participant's piece.
    ///
    /// Fails with [`ViewError::PlayerNotInGame`] if they hold neither slot.
    pub fn local_piece(&self) -> Result<GamePiece, ViewError> {
        self.local_piece.ok_or(ViewError::PlayerNotInGame)
    }

    /// True if the local participant holds a slot.
    pub fn is_player(&self) -> bool {
        self.local_piece.is_some()
    }

    /// True while the game is in progress.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Player holding X.
    pub fn x(&self) -> Option<&PlayerId> {
        self.x.as_ref()
    }

    /// Player holding O.
    pub fn o(&self) -> Option<&PlayerId> {
        self.o.as_ref()
    }

    /// Declared winner, if any.
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }
}

impl Default for DerivedView {
    fn default() -> Self {
        Self::empty()
    }
}

fn slot(state: &TicTacToeState, piece: GamePiece) -> Option<&PlayerId> {
    match piece {
        GamePiece::X => state.x.as_ref(),
        GamePiece::O => state.o.as_ref(),
    }
}
