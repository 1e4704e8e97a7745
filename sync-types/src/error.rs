//! Error types for the wire format.

use thiserror::Error;

/// Errors that can occur encoding, decoding or constructing wire types.
#[derive(Debug, Error)]
pub enum TypesError {
    /// MessagePack serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] rmp_serde::encode::Error),

    /// MessagePack deserialization failed
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] rmp_serde::decode::Error),

    /// Grid coordinate outside 0..=2
    #[error("invalid grid position: {0}")]
    InvalidPosition(u8),
}
