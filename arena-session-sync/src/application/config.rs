use arena_session_core::ParticipantId;
use std::time::Duration;

/// Configuration for the polling loop
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,

    /// Pending local actions before senders wait
    pub action_channel_capacity: usize,

    /// Buffered updates before the loop waits on the consumer
    pub update_channel_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            action_channel_capacity: 16,
            update_channel_capacity: 64,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn with_action_capacity(mut self, capacity: usize) -> Self {
        self.action_channel_capacity = capacity;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// What the client remembers about its user, passed in explicitly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncContext {
    /// Verified identity, if the user is signed in
    pub identity: Option<ParticipantId>,
}

impl SyncContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: ParticipantId) -> Self {
        Self {
            identity: Some(identity),
        }
    }
}
