//! # sync-types
//!
//! Wire format types for tic-tac-toe state sync.
//!
//! This crate provides the foundational types used across all sync crates:
//! - [`PlayerId`], [`AreaId`], [`InstanceId`] - Identity types
//! - [`GameArea`], [`TicTacToeState`], [`TicTacToeMove`] - Authoritative state
//! - [`Command`], [`CommandResponse`] - Outbound requests and their replies
//! - [`TypesError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod game;
mod ids;
mod messages;

pub use error::TypesError;
pub use game::{
    GameArea, GameInstance, GamePiece, GameStatus, GridPosition, TicTacToeMove, TicTacToeState,
};
pub use ids::{AreaId, InstanceId, PlayerId};
pub use messages::{Command, CommandResponse};
