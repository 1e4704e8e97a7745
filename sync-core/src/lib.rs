//! # sync-core
//!
//! Pure logic for tic-tac-toe state sync (no I/O, instant tests).
//!
//! This crate turns authoritative snapshots into the values a client
//! presents, without any network access or async runtime.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects:
//! - [`board`] replays the move log into a grid
//! - [`view`] derives turn, piece and outcome for the local participant
//! - [`diff`] reports which derived values changed between snapshots
//! - [`phase`] tracks the game lifecycle and the edges crossed
//!
//! Notification and command dispatch are performed by `sync-client`, which
//! interprets the output of these functions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod board;
pub mod diff;
pub mod phase;
pub mod view;

pub use board::{board_from, Board, Cell};
pub use diff::{diff, Change};
pub use phase::{GamePhase, PhaseEvent};
pub use view::{DerivedView, Outcome, ViewError};
