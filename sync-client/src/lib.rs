//! # sync-client
//!
//! Client library for tic-tac-toe state sync.
//!
//! This is the main library that presentation code uses to follow a game
//! owned by a remote authority and to send moves to it.
//!
//! ## Features
//!
//! - **Snapshot Ingestion**: Derived board/turn/outcome views recomputed per update
//! - **Change Notifications**: Each changed value is reported exactly once
//! - **Command Dispatch**: Move, join and leave requests gated on game status
//! - **Channel Abstraction**: Pluggable command channel (town socket, mock)
//!
//! ## Example
//!
//! ```ignore
//! use tictactoe_sync_client::{GameEvent, GameSynchronizer, MockChannel, SyncConfig};
//!
//! let sync = GameSynchronizer::new(SyncConfig::new("p1", "area-1"), MockChannel::new());
//! sync.subscribe(|event| {
//!     if let GameEvent::TurnChanged(ours) = event {
//!         // enable or disable the board
//!     }
//! });
//!
//! sync.ingest(area).await;
//! sync.make_move(row, col).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod config;
pub mod events;
pub mod synchronizer;

pub use channel::{ChannelError, CommandChannel, MockChannel};
pub use config::{ConfigError, SyncConfig};
pub use events::{EventListeners, GameEvent, SubscriptionId};
pub use synchronizer::{ClientError, GameSynchronizer};
