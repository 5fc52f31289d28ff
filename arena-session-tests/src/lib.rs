use arena_session_core::{
    ParticipantId, ReplayPlayer, RoomCode, RoomCommand, RoomError, RoomEvent, RoomService,
    RoomSnapshot,
};
use cucumber::World;

#[derive(Debug, World, Default)]
pub struct RoomWorld {
    /// Room service (the system under test)
    pub service: RoomService,

    /// Last event emitted (for assertions)
    pub last_event: Option<RoomEvent>,

    /// Last rejection
    pub last_error: Option<RoomError>,

    /// Playback controller under test
    pub replay: Option<ReplayPlayer>,
}

impl RoomWorld {
    /// Execute a command and store the result
    pub fn execute(&mut self, command: RoomCommand) {
        match self.service.handle_command(command) {
            Ok(event) => {
                self.last_event = Some(event);
                self.last_error = None;
            }
            Err(error) => {
                self.last_event = None;
                self.last_error = Some(error);
            }
        }
    }

    pub fn snapshot(&self, code: &str) -> RoomSnapshot {
        self.service
            .snapshot(&room(code))
            .unwrap_or_else(|e| panic!("Room {code} not readable: {e}"))
    }

    pub fn replay(&mut self) -> &mut ReplayPlayer {
        self.replay.as_mut().expect("No replay started")
    }
}

/// `user7` → participant 7
pub fn participant(name: &str) -> ParticipantId {
    let id = name
        .strip_prefix("user")
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("Participant names look like user<N>, got '{name}'"));
    ParticipantId::new(id)
}

pub fn room(code: &str) -> RoomCode {
    RoomCode::parse(code).unwrap_or_else(|e| panic!("Bad room code '{code}': {e}"))
}

/// Stable name of an error kind, as used in feature files
pub fn error_kind(error: &RoomError) -> &'static str {
    match error {
        RoomError::NotFound(_) => "not_found",
        RoomError::PermissionDenied => "permission_denied",
        RoomError::Conflict(_) => "conflict",
        RoomError::InvalidMove(_) => "invalid_move",
        RoomError::OccupiedCell { .. } => "occupied_cell",
        RoomError::GameOver(_) => "game_over",
        RoomError::GameNotOver(_) => "game_not_over",
        RoomError::NotParticipant(_) => "not_participant",
        RoomError::InvalidRoomCode(_) => "invalid_room_code",
    }
}
