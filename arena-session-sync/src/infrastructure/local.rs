use crate::error::ApiError;
use crate::infrastructure::api::RoomApi;
use arena_session_core::{
    ActiveRoom, Move, ParticipantId, RoomCode, RoomEvent, RoomService, RoomSnapshot,
};
use async_trait::async_trait;

/// In-process adapter: every call goes straight to a [`RoomService`]
#[derive(Debug, Clone, Default)]
pub struct LocalRoomApi {
    service: RoomService,
}

impl LocalRoomApi {
    pub fn new(service: RoomService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &RoomService {
        &self.service
    }
}

#[async_trait]
impl RoomApi for LocalRoomApi {
    async fn fetch_room(&self, code: &RoomCode) -> Result<RoomSnapshot, ApiError> {
        Ok(self.service.snapshot(code)?)
    }

    async fn fetch_moves(&self, code: &RoomCode) -> Result<Vec<Move>, ApiError> {
        Ok(self.service.moves(code)?)
    }

    async fn active_room(&self, participant: ParticipantId) -> Result<ActiveRoom, ApiError> {
        Ok(self.service.active_room_for(participant))
    }

    async fn create_room(&self, creator: ParticipantId) -> Result<RoomCode, ApiError> {
        Ok(self.service.create_room(creator))
    }

    async fn join_room(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError> {
        Ok(self.service.join(code, participant)?)
    }

    async fn make_move(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
        row: u8,
        col: u8,
    ) -> Result<RoomEvent, ApiError> {
        Ok(self.service.make_move(code, participant, row, col)?)
    }

    async fn leave_room(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError> {
        Ok(self.service.leave(code, participant)?)
    }

    async fn request_rematch(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError> {
        Ok(self.service.request_rematch(code, participant)?)
    }

    async fn destroy_room(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<(), ApiError> {
        Ok(self.service.destroy(code, participant)?)
    }
}
