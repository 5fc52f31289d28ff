use arena_session_core::{RoomCode, RoomError};

/// Failures reported by a [`RoomApi`](crate::RoomApi) call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The room rejected the request; retrying without a state change fails again
    #[error("Rejected: {0}")]
    Rejected(RoomError),

    #[error("Room not found: {0}")]
    NotFound(RoomCode),

    /// Network-level failure, worth retrying on the next tick
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<RoomError> for ApiError {
    fn from(error: RoomError) -> Self {
        match error {
            RoomError::NotFound(code) => ApiError::NotFound(code),
            other => ApiError::Rejected(other),
        }
    }
}

/// Failures surfaced to the holder of a [`SyncHandle`](crate::SyncHandle)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("Sync loop has stopped")]
    ChannelClosed,

    #[error("No participant identity configured")]
    MissingIdentity,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
