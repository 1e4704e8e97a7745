//! Command channel abstraction.
//!
//! This module provides a pluggable request/response channel to the game
//! authority (socket connection to the town server, mock for testing).
//!
//! # Design
//!
//! The channel is async and request-oriented:
//! - `send_command()` transmits an encoded command addressed to an area
//! - the returned bytes are the authority's encoded reply
//!
//! Snapshots travel the other way and are pushed into the synchronizer by
//! whatever owns the connection; they do not pass through this trait.
//!
//! # Example
//!
//! ```ignore
//! let channel = MockChannel::new();
//! channel.queue_response(CommandResponse::Accepted { game_id: None }.to_bytes()?);
//! let reply = channel.send_command(&area_id, &command_bytes).await?;
//! ```

mod mock;

pub use mock::MockChannel;

use async_trait::async_trait;
use thiserror::Error;
use tictactoe_sync_types::AreaId;

/// Channel errors.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Connection closed before a reply arrived.
    #[error("connection closed")]
    Closed,

    /// No reply within the channel's deadline.
    #[error("command timed out")]
    Timeout,
}

/// Channel trait for delivering commands to the authority.
///
/// Implementations handle the underlying connection mechanism
/// (town socket, mock, etc).
#[async_trait]
pub trait CommandChannel: Send + Sync {
    /// Send an encoded command to the given area and wait for the reply.
    ///
    /// The payload is a MessagePack-encoded `Command`; the reply is a
    /// MessagePack-encoded `CommandResponse`.
    async fn send_command(&self, area: &AreaId, payload: &[u8]) -> Result<Vec<u8>, ChannelError>;
}
