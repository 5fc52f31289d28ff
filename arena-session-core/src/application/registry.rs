use crate::domain::{ParticipantId, RoomCode, RoomError, Session, SessionStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// A session behind its per-room lock
pub type SharedSession = Arc<Mutex<Session>>;

/// Lock a room.
///
/// A panic in another holder does not leave the session half-written (every
/// transition validates before mutating), so a poisoned lock is recovered.
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Maps room codes to live sessions
///
/// Lock order is always room lock first, then the map lock; the map lock is
/// never held while waiting for a room.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomCode, SharedSession>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new WAITING room for `creator` under a fresh code
    pub fn create_session(&self, creator: ParticipantId) -> RoomCode {
        self.insert_fresh(|code| Session::new(code, creator))
    }

    /// Open a room under a caller-chosen code
    pub fn create_session_with_code(
        &self,
        code: RoomCode,
        creator: ParticipantId,
    ) -> Result<RoomCode, RoomError> {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        if rooms.contains_key(&code) {
            return Err(RoomError::Conflict(format!("room code {code} is taken")));
        }

        rooms.insert(
            code.clone(),
            Arc::new(Mutex::new(Session::new(code.clone(), creator))),
        );
        tracing::info!("Room {} created by {}", code, creator);
        Ok(code)
    }

    /// Open an IN_PROGRESS successor room with both seats taken
    pub(crate) fn create_rematch(
        &self,
        player1: ParticipantId,
        player2: ParticipantId,
    ) -> RoomCode {
        self.insert_fresh(|code| Session::with_players(code, player1, player2))
    }

    fn insert_fresh(&self, build: impl FnOnce(RoomCode) -> Session) -> RoomCode {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);

        let code = loop {
            let candidate = RoomCode::generate();
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!("Room code {} collided, drawing again", candidate);
        };

        let session = build(code.clone());
        tracing::info!(
            "Room {} created for {} ({})",
            code,
            session.player1(),
            session.status()
        );
        rooms.insert(code.clone(), Arc::new(Mutex::new(session)));
        code
    }

    pub fn lookup(&self, code: &RoomCode) -> Result<SharedSession, RoomError> {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(code.clone()))
    }

    /// Cancel a WAITING room; only the creator may do so
    pub fn destroy(&self, code: &RoomCode, requester: ParticipantId) -> Result<(), RoomError> {
        let shared = self.lookup(code)?;
        let mut session = lock_session(&shared);

        if session.is_closed() {
            return Err(RoomError::NotFound(code.clone()));
        }
        if session.status() != SessionStatus::Waiting || session.player1() != requester {
            tracing::warn!(
                "{} may not destroy room {} (status {})",
                requester,
                code,
                session.status()
            );
            return Err(RoomError::PermissionDenied);
        }

        self.retire(&mut session, &shared);
        Ok(())
    }

    /// Close a locked session and drop its mapping
    pub(crate) fn retire(&self, session: &mut Session, shared: &SharedSession) {
        session.close();

        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let same_room = rooms
            .get(session.code())
            .is_some_and(|current| Arc::ptr_eq(current, shared));
        if same_room {
            rooms.remove(session.code());
        }

        tracing::info!("Room {} destroyed", session.code());
    }

    /// Every live session (cloned handles; the map lock is released on return)
    pub fn sessions(&self) -> Vec<SharedSession> {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn contains(&self, code: &RoomCode) -> bool {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rooms.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
