use crate::application::registry::{RoomRegistry, lock_session};
use crate::application::{
    ActiveRoom, RematchCoordinator, RematchOutcome, RoomCommand, RoomEvent, RoomSnapshot,
};
use crate::domain::{
    JoinOutcome, LeaveOutcome, Move, ParticipantId, RoomCode, RoomError, Session, Timestamp,
};
use std::sync::Arc;

/// Entry point for every room endpoint
///
/// Each call serialises on the target room's lock; calls on different rooms
/// never contend beyond the brief registry lookup.
#[derive(Debug, Clone)]
pub struct RoomService {
    registry: Arc<RoomRegistry>,
    rematch: RematchCoordinator,
}

impl Default for RoomService {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomService {
    pub fn new() -> Self {
        Self::with_registry(Arc::new(RoomRegistry::new()))
    }

    pub fn with_registry(registry: Arc<RoomRegistry>) -> Self {
        Self {
            rematch: RematchCoordinator::new(registry.clone()),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Process a single command and return the resulting event
    pub fn handle_command(&self, command: RoomCommand) -> Result<RoomEvent, RoomError> {
        let name = command.name();
        let target = command.room_code().cloned();
        let result = match command {
            RoomCommand::CreateRoom { room_code, creator } => {
                let room_code = match room_code {
                    Some(code) => self.registry.create_session_with_code(code, creator)?,
                    None => self.registry.create_session(creator),
                };
                Ok(RoomEvent::RoomCreated { room_code, creator })
            }

            RoomCommand::JoinRoom {
                room_code,
                participant,
            } => self.join(&room_code, participant),

            RoomCommand::MakeMove {
                room_code,
                participant,
                row,
                col,
            } => self.make_move(&room_code, participant, row, col),

            RoomCommand::LeaveRoom {
                room_code,
                participant,
            } => self.leave(&room_code, participant),

            RoomCommand::RequestRematch {
                room_code,
                participant,
            } => self.request_rematch(&room_code, participant),

            RoomCommand::DestroyRoom {
                room_code,
                participant,
            } => self
                .registry
                .destroy(&room_code, participant)
                .map(|_| RoomEvent::RoomDestroyed { room_code }),
        };

        if let Err(e) = &result {
            match &target {
                Some(code) => tracing::warn!("{} in {} rejected: {}", name, code, e),
                None => tracing::warn!("{} rejected: {}", name, e),
            }
        }
        result
    }

    // ===== Mutations =====

    pub fn create_room(&self, creator: ParticipantId) -> RoomCode {
        self.registry.create_session(creator)
    }

    pub fn create_room_with_code(
        &self,
        code: RoomCode,
        creator: ParticipantId,
    ) -> Result<RoomCode, RoomError> {
        self.registry.create_session_with_code(code, creator)
    }

    pub fn join(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, RoomError> {
        self.with_session(code, |session| {
            let room_code = code.clone();
            Ok(match session.join(participant)? {
                JoinOutcome::Joined => RoomEvent::ParticipantJoined {
                    room_code,
                    participant,
                },
                JoinOutcome::AlreadyJoined => RoomEvent::AlreadyJoined {
                    room_code,
                    participant,
                },
            })
        })
    }

    pub fn make_move(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
        row: u8,
        col: u8,
    ) -> Result<RoomEvent, RoomError> {
        self.with_session(code, |session| {
            let (mv, result) = session.make_move(participant, row, col)?;
            Ok(RoomEvent::MovePlayed {
                room_code: code.clone(),
                mv,
                result,
            })
        })
    }

    pub fn leave(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, RoomError> {
        let shared = self.registry.lookup(code)?;
        let mut session = lock_session(&shared);
        if session.is_closed() {
            return Err(RoomError::NotFound(code.clone()));
        }

        let room_code = code.clone();
        Ok(match session.leave(participant) {
            LeaveOutcome::Abandoned { winner } => RoomEvent::RoomAbandoned {
                room_code,
                participant,
                winner,
            },
            LeaveOutcome::DestroyRoom => {
                self.registry.retire(&mut session, &shared);
                RoomEvent::RoomDestroyed { room_code }
            }
            LeaveOutcome::Ignored => RoomEvent::LeaveIgnored {
                room_code,
                participant,
            },
        })
    }

    pub fn request_rematch(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RoomEvent, RoomError> {
        let room_code = code.clone();
        Ok(match self.rematch.request_rematch(code, participant)? {
            RematchOutcome::Pending { votes } => RoomEvent::RematchPending {
                room_code,
                participant,
                votes,
            },
            RematchOutcome::Agreed { next_room } => RoomEvent::RematchAgreed {
                room_code,
                next_room_code: next_room,
            },
        })
    }

    pub fn destroy(&self, code: &RoomCode, participant: ParticipantId) -> Result<(), RoomError> {
        self.registry.destroy(code, participant)
    }

    // ===== Queries =====

    pub fn snapshot(&self, code: &RoomCode) -> Result<RoomSnapshot, RoomError> {
        self.with_session(code, |session| Ok(RoomSnapshot::from(&*session)))
    }

    /// Full ordered ledger, for replay
    pub fn moves(&self, code: &RoomCode) -> Result<Vec<Move>, RoomError> {
        self.with_session(code, |session| Ok(session.moves().to_vec()))
    }

    /// Room a participant can reconnect to (WAITING or IN_PROGRESS)
    pub fn active_room_for(&self, participant: ParticipantId) -> ActiveRoom {
        let mut candidates: Vec<(Timestamp, RoomCode)> = self
            .registry
            .sessions()
            .iter()
            .filter_map(|shared| {
                let session = lock_session(shared);
                session
                    .is_active_for(participant)
                    .then(|| (session.created_at(), session.code().clone()))
            })
            .collect();

        // Most recent room first
        candidates.sort_by(|a, b| b.cmp(a));

        match candidates.into_iter().next() {
            Some((_, code)) => {
                tracing::debug!("{} has an active room: {}", participant, code);
                ActiveRoom::found(code)
            }
            None => ActiveRoom::none(),
        }
    }

    /// Run `f` on a live room under its lock
    fn with_session<T>(
        &self,
        code: &RoomCode,
        f: impl FnOnce(&mut Session) -> Result<T, RoomError>,
    ) -> Result<T, RoomError> {
        let shared = self.registry.lookup(code)?;
        let mut session = lock_session(&shared);
        if session.is_closed() {
            return Err(RoomError::NotFound(code.clone()));
        }
        f(&mut session)
    }
}
