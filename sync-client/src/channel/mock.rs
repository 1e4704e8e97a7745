//! Mock command channel for testing.
//!
//! Allows queueing replies and capturing sent commands for verification.

use super::{ChannelError, CommandChannel};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tictactoe_sync_types::{AreaId, Command, CommandResponse, TypesError};

/// Mock command channel for testing.
///
/// Replies are returned in the order they were queued. With nothing queued
/// a send fails with [`ChannelError::Closed`].
#[derive(Debug, Default)]
pub struct MockChannel {
    inner: Arc<Mutex<MockChannelInner>>,
}

#[derive(Debug, Default)]
struct MockChannelInner {
    sent: Vec<(AreaId, Vec<u8>)>,
    reply_queue: VecDeque<Vec<u8>>,
    fail_next_send: Option<String>,
}

impl MockChannel {
    /// Create a new mock channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw bytes to be returned by the next `send_command()` call.
    pub fn queue_response(&self, data: Vec<u8>) {
        let mut inner = self.inner.lock().unwrap();
        inner.reply_queue.push_back(data);
    }

    /// Encode and queue a reply.
    pub fn queue_reply(&self, reply: &CommandResponse) -> Result<(), TypesError> {
        self.queue_response(reply.to_bytes()?);
        Ok(())
    }

    /// Get all payloads that were sent, with their target area.
    pub fn sent_payloads(&self) -> Vec<(AreaId, Vec<u8>)> {
        let inner = self.inner.lock().unwrap();
        inner.sent.clone()
    }

    /// Decode every sent payload into a command, skipping undecodable ones.
    pub fn sent_commands(&self) -> Vec<Command> {
        let inner = self.inner.lock().unwrap();
        inner
            .sent
            .iter()
            .filter_map(|(_, bytes)| Command::from_bytes(bytes).ok())
            .collect()
    }

    /// Get the last command that was sent.
    pub fn last_command(&self) -> Option<Command> {
        self.sent_commands().pop()
    }

    /// Cause the next send_command() to fail with the given error.
    pub fn fail_next_send(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_send = Some(error.to_string());
    }

    /// Clear all state (sent payloads, reply queue, forced failures).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockChannelInner::default();
    }
}

impl Clone for MockChannel {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl CommandChannel for MockChannel {
    async fn send_command(&self, area: &AreaId, payload: &[u8]) -> Result<Vec<u8>, ChannelError> {
        let mut inner = self.inner.lock().unwrap();

        // Check for forced failure
        if let Some(error) = inner.fail_next_send.take() {
            return Err(ChannelError::SendFailed(error));
        }

        inner.sent.push((area.clone(), payload.to_vec()));
        inner.reply_queue.pop_front().ok_or(ChannelError::Closed)
    }
}
