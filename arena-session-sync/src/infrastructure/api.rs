use crate::error::ApiError;
use arena_session_core::{ActiveRoom, Move, ParticipantId, RoomCode, RoomEvent, RoomSnapshot};
use async_trait::async_trait;

/// Room endpoints as seen from a client (allows mocking in tests)
///
/// The caller's identity is passed explicitly; the API treats it as opaque.
#[async_trait]
pub trait RoomApi: Send + Sync {
    /// Current state of a room
    async fn fetch_room(&self, code: &RoomCode) -> Result<RoomSnapshot, ApiError>;

    /// Full ordered ledger of a room
    async fn fetch_moves(&self, code: &RoomCode) -> Result<Vec<Move>, ApiError>;

    /// Room the participant can reconnect to, if any
    async fn active_room(&self, participant: ParticipantId) -> Result<ActiveRoom, ApiError>;

    async fn create_room(&self, creator: ParticipantId) -> Result<RoomCode, ApiError>;

    async fn join_room(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError>;

    async fn make_move(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
        row: u8,
        col: u8,
    ) -> Result<RoomEvent, ApiError>;

    async fn leave_room(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError>;

    async fn request_rematch(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError>;

    /// Cancel a WAITING room (creator only)
    async fn destroy_room(&self, code: &RoomCode, participant: ParticipantId)
    -> Result<(), ApiError>;
}
