use arena_session_core::{
    ActiveRoom, Move, ParticipantId, RoomCode, RoomEvent, RoomService, RoomSnapshot,
};
use arena_session_sync::{ApiError, LocalRoomApi, RoomApi};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// [`LocalRoomApi`] with injectable transport failures and canned replies
pub struct FlakyApi {
    inner: LocalRoomApi,
    fetches: AtomicUsize,
    failing_fetches: AtomicUsize,
    canned: Mutex<VecDeque<RoomSnapshot>>,
}

impl FlakyApi {
    pub fn new(service: RoomService) -> Self {
        Self {
            inner: LocalRoomApi::new(service),
            fetches: AtomicUsize::new(0),
            failing_fetches: AtomicUsize::new(0),
            canned: Mutex::new(VecDeque::new()),
        }
    }

    /// Number of `fetch_room` calls so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Make the next `n` fetches fail with a transport error
    pub fn fail_next_fetches(&self, n: usize) {
        self.failing_fetches.store(n, Ordering::SeqCst);
    }

    /// Answer the next fetch with `snapshot` instead of live state
    pub fn push_canned(&self, snapshot: RoomSnapshot) {
        self.canned.lock().unwrap().push_back(snapshot);
    }
}

#[async_trait]
impl RoomApi for FlakyApi {
    async fn fetch_room(&self, code: &RoomCode) -> Result<RoomSnapshot, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let failing = self.failing_fetches.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_fetches.store(failing - 1, Ordering::SeqCst);
            return Err(ApiError::Transport("connection reset".to_string()));
        }

        if let Some(snapshot) = self.canned.lock().unwrap().pop_front() {
            return Ok(snapshot);
        }

        self.inner.fetch_room(code).await
    }

    async fn fetch_moves(&self, code: &RoomCode) -> Result<Vec<Move>, ApiError> {
        self.inner.fetch_moves(code).await
    }

    async fn active_room(&self, participant: ParticipantId) -> Result<ActiveRoom, ApiError> {
        self.inner.active_room(participant).await
    }

    async fn create_room(&self, creator: ParticipantId) -> Result<RoomCode, ApiError> {
        self.inner.create_room(creator).await
    }

    async fn join_room(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError> {
        self.inner.join_room(code, participant).await
    }

    async fn make_move(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
        row: u8,
        col: u8,
    ) -> Result<RoomEvent, ApiError> {
        self.inner.make_move(code, participant, row, col).await
    }

    async fn leave_room(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError> {
        self.inner.leave_room(code, participant).await
    }

    async fn request_rematch(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, ApiError> {
        self.inner.request_rematch(code, participant).await
    }

    async fn destroy_room(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<(), ApiError> {
        self.inner.destroy_room(code, participant).await
    }
}
