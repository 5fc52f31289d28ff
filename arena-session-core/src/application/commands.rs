use crate::domain::{ParticipantId, RoomCode};

/// Mutations accepted by the room service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomCommand {
    /// Open a room; `room_code` None draws a fresh code
    CreateRoom {
        room_code: Option<RoomCode>,
        creator: ParticipantId,
    },

    /// Take the second seat
    JoinRoom {
        room_code: RoomCode,
        participant: ParticipantId,
    },

    /// Place a mark
    MakeMove {
        room_code: RoomCode,
        participant: ParticipantId,
        row: u8,
        col: u8,
    },

    /// Walk away (forfeits a running game)
    LeaveRoom {
        room_code: RoomCode,
        participant: ParticipantId,
    },

    /// Vote for a rematch after the game ended
    RequestRematch {
        room_code: RoomCode,
        participant: ParticipantId,
    },

    /// Cancel a WAITING room (creator only)
    DestroyRoom {
        room_code: RoomCode,
        participant: ParticipantId,
    },
}

impl RoomCommand {
    /// Command name for logs
    pub fn name(&self) -> &'static str {
        match self {
            RoomCommand::CreateRoom { .. } => "CreateRoom",
            RoomCommand::JoinRoom { .. } => "JoinRoom",
            RoomCommand::MakeMove { .. } => "MakeMove",
            RoomCommand::LeaveRoom { .. } => "LeaveRoom",
            RoomCommand::RequestRematch { .. } => "RequestRematch",
            RoomCommand::DestroyRoom { .. } => "DestroyRoom",
        }
    }

    /// Target room, if the command addresses an existing one
    pub fn room_code(&self) -> Option<&RoomCode> {
        match self {
            RoomCommand::CreateRoom { .. } => None,
            RoomCommand::JoinRoom { room_code, .. }
            | RoomCommand::MakeMove { room_code, .. }
            | RoomCommand::LeaveRoom { room_code, .. }
            | RoomCommand::RequestRematch { room_code, .. }
            | RoomCommand::DestroyRoom { room_code, .. } => Some(room_code),
        }
    }
}
