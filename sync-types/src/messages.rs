//! Commands sent to the authority and its replies.

use serde::{Deserialize, Serialize};

use crate::{InstanceId, TicTacToeMove, TypesError};

/// Commands a client can address to a game area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Place a piece in the bound game
    GameMove {
        /// Target game instance
        #[serde(rename = "gameID")]
        game_id: InstanceId,
        /// The requested move
        #[serde(rename = "move")]
        game_move: TicTacToeMove,
    },
    /// Join (or create) the area's game
    JoinGame,
    /// Leave the bound game
    LeaveGame {
        /// Game instance being left
        #[serde(rename = "gameID")]
        game_id: InstanceId,
    },
}

impl Command {
    /// Serialize to MessagePack bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypesError> {
        rmp_serde::to_vec_named(self).map_err(TypesError::Serialization)
    }

    /// Deserialize from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        rmp_serde::from_slice(bytes).map_err(TypesError::Deserialization)
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::GameMove { .. } => "GameMove",
            Command::JoinGame => "JoinGame",
            Command::LeaveGame { .. } => "LeaveGame",
        }
    }
}

/// The authority's reply to a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandResponse {
    /// Command applied
    Accepted {
        /// Instance the command was applied to (always set for `JoinGame`)
        #[serde(rename = "gameID", default)]
        game_id: Option<InstanceId>,
    },
    /// Command refused (stale turn, occupied cell, bad request)
    Rejected {
        /// Human-readable reason from the authority
        reason: String,
    },
}

impl CommandResponse {
    /// Serialize to MessagePack bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypesError> {
        rmp_serde::to_vec_named(self).map_err(TypesError::Serialization)
    }

    /// Deserialize from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        rmp_serde::from_slice(bytes).map_err(TypesError::Deserialization)
    }
}
