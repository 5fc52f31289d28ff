use crate::domain::{ParticipantId, RoomCode, SessionStatus};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Errors raised by room operations
///
/// Every variant is local and non-retryable without a state change: a failed
/// operation leaves the session exactly as it was.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RoomError {
    #[error("Room not found: {0}")]
    NotFound(RoomCode),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Room is full or already joined: {0}")]
    Conflict(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: u8, col: u8 },

    #[error("Game is over (status: {0})")]
    GameOver(SessionStatus),

    #[error("Game is not over yet (status: {0})")]
    GameNotOver(SessionStatus),

    #[error("{0} is not a player in this room")]
    NotParticipant(ParticipantId),

    #[error("Invalid room code: {0:?}")]
    InvalidRoomCode(String),
}

impl RoomError {
    pub(crate) fn not_your_turn(participant: ParticipantId) -> Self {
        RoomError::InvalidMove(format!("not {participant}'s turn"))
    }

    pub(crate) fn out_of_range(row: u8, col: u8) -> Self {
        RoomError::InvalidMove(format!("coordinates ({row}, {col}) are outside the 3x3 grid"))
    }

    /// True when the room no longer exists (terminal for a poller)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RoomError::NotFound(_))
    }
}
