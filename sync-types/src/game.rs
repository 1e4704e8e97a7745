//! Game state as delivered by the authority.
//!
//! A [`GameArea`] is replaced wholesale on every update; nothing in this
//! crate mutates one in place.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AreaId, InstanceId, PlayerId, TypesError};

/// The two game pieces. `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePiece {
    /// First-player marker
    X,
    /// Second-player marker
    O,
}

impl GamePiece {
    /// The opposing piece.
    pub fn other(self) -> Self {
        match self {
            GamePiece::X => GamePiece::O,
            GamePiece::O => GamePiece::X,
        }
    }
}

impl fmt::Display for GamePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePiece::X => f.write_str("X"),
            GamePiece::O => f.write_str("O"),
        }
    }
}

/// A row or column index on the 3×3 grid.
///
/// Only 0, 1 and 2 are representable; decoding rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridPosition(u8);

impl GridPosition {
    /// Grid side length.
    pub const SIZE: usize = 3;

    /// All positions in ascending order.
    pub const ALL: [GridPosition; 3] = [GridPosition(0), GridPosition(1), GridPosition(2)];

    /// The position as an array index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for GridPosition {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (value as usize) < Self::SIZE {
            Ok(Self(value))
        } else {
            Err(TypesError::InvalidPosition(value))
        }
    }
}

impl From<GridPosition> for u8 {
    fn from(pos: GridPosition) -> Self {
        pos.0
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One placed piece. Immutable once accepted by the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicTacToeMove {
    /// Row of the placed piece
    pub row: GridPosition,
    /// Column of the placed piece
    pub col: GridPosition,
    /// The piece placed
    pub game_piece: GamePiece,
}

impl TicTacToeMove {
    /// Create a move.
    pub fn new(row: GridPosition, col: GridPosition, game_piece: GamePiece) -> Self {
        Self {
            row,
            col,
            game_piece,
        }
    }
}

/// Lifecycle status of a game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Waiting for both slots to fill
    #[default]
    WaitingToStart,
    /// Both players seated, moves being played
    InProgress,
    /// Won or tied
    Over,
}

/// Authoritative snapshot of one game.
///
/// `moves` is in play order. The authority guarantees alternation starting
/// with X, unique cells, and both slots filled while in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TicTacToeState {
    /// Accepted moves in play order
    pub moves: Vec<TicTacToeMove>,
    /// Player holding X, if seated
    #[serde(default)]
    pub x: Option<PlayerId>,
    /// Player holding O, if seated
    #[serde(default)]
    pub o: Option<PlayerId>,
    /// Winning player, set only once the game is over and not tied
    #[serde(default)]
    pub winner: Option<PlayerId>,
    /// Lifecycle status
    pub status: GameStatus,
}

/// A game instance bound to an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInstance {
    /// Instance identifier used when issuing commands
    pub id: InstanceId,
    /// Current authoritative state
    pub state: TicTacToeState,
}

/// Model of a game area as pushed by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameArea {
    /// Area identifier
    pub id: AreaId,
    /// Active game, or `None` if no game has been created in this area
    #[serde(default)]
    pub game: Option<GameInstance>,
}

impl GameArea {
    /// An area with no game created yet.
    pub fn empty(id: AreaId) -> Self {
        Self { id, game: None }
    }

    /// Serialize to MessagePack bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypesError> {
        rmp_serde::to_vec_named(self).map_err(TypesError::Serialization)
    }

    /// Deserialize from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        rmp_serde::from_slice(bytes).map_err(TypesError::Deserialization)
    }

    /// The game state, if a game exists.
    pub fn state(&self) -> Option<&TicTacToeState> {
        self.game.as_ref().map(|g| &g.state)
    }
}
