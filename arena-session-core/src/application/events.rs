use crate::domain::{Move, MoveResult, ParticipantId, RematchVotes, RoomCode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a successful command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum RoomEvent {
    RoomCreated {
        room_code: RoomCode,
        creator: ParticipantId,
    },

    /// Seat 2 filled, game started
    ParticipantJoined {
        room_code: RoomCode,
        participant: ParticipantId,
    },

    /// Join by an already-seated participant (no-op)
    AlreadyJoined {
        room_code: RoomCode,
        participant: ParticipantId,
    },

    MovePlayed {
        room_code: RoomCode,
        #[serde(rename = "move")]
        mv: Move,
        result: MoveResult,
    },

    /// Mid-game walkout
    RoomAbandoned {
        room_code: RoomCode,
        participant: ParticipantId,
        winner: Option<ParticipantId>,
    },

    /// Leave by a spectator or on a finished room (no-op)
    LeaveIgnored {
        room_code: RoomCode,
        participant: ParticipantId,
    },

    RoomDestroyed { room_code: RoomCode },

    /// Vote recorded, waiting for the counterpart
    RematchPending {
        room_code: RoomCode,
        participant: ParticipantId,
        votes: RematchVotes,
    },

    /// Both voted; the old room now forwards to `next_room_code`
    RematchAgreed {
        room_code: RoomCode,
        next_room_code: RoomCode,
    },
}

impl RoomEvent {
    pub fn room_code(&self) -> &RoomCode {
        match self {
            RoomEvent::RoomCreated { room_code, .. }
            | RoomEvent::ParticipantJoined { room_code, .. }
            | RoomEvent::AlreadyJoined { room_code, .. }
            | RoomEvent::MovePlayed { room_code, .. }
            | RoomEvent::RoomAbandoned { room_code, .. }
            | RoomEvent::LeaveIgnored { room_code, .. }
            | RoomEvent::RoomDestroyed { room_code }
            | RoomEvent::RematchPending { room_code, .. }
            | RoomEvent::RematchAgreed { room_code, .. } => room_code,
        }
    }
}
