use crate::domain::{
    Board, Outcome, ParticipantId, RematchVotes, RoomCode, Session, SessionStatus, ViewerRole,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Read-only view of a room, as returned by the session query endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoomSnapshot {
    pub room_code: RoomCode,
    pub player1: ParticipantId,
    pub player2: Option<ParticipantId>,
    pub current_turn: ParticipantId,
    pub board: Board,
    pub status: SessionStatus,
    pub winner: Option<ParticipantId>,

    /// Successor room once a rematch was agreed
    pub next_room_code: Option<RoomCode>,

    pub rematch: RematchVotes,

    /// Number of ledger entries folded into `board`
    pub move_count: u64,
}

impl RoomSnapshot {
    pub fn role_of(&self, participant: ParticipantId) -> ViewerRole {
        ViewerRole::of(participant, self.player1, self.player2)
    }

    pub fn is_turn_of(&self, participant: ParticipantId) -> bool {
        self.status == SessionStatus::InProgress && self.current_turn == participant
    }

    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::of(self.status, self.winner)
    }

    /// One-line human summary of the room state for `viewer`
    pub fn headline(&self, viewer: Option<ParticipantId>) -> String {
        let role = viewer.map(|v| self.role_of(v));
        match (self.status, self.outcome()) {
            (SessionStatus::Waiting, _) => {
                format!("Waiting for a challenger in {}", self.room_code)
            }
            (SessionStatus::InProgress, _) => match viewer {
                Some(v) if self.is_turn_of(v) => "Your turn".to_string(),
                Some(v) if self.role_of(v).is_player() => "Opponent's turn".to_string(),
                _ => format!("{} to move", self.current_turn),
            },
            (_, Some(Outcome::Win(winner))) => match (viewer, role) {
                (Some(v), Some(r)) if r.is_player() && v == winner => "You win".to_string(),
                (_, Some(r)) if r.is_player() => "You lose".to_string(),
                _ => format!("{winner} wins"),
            },
            _ => "It's a draw".to_string(),
        }
    }
}

impl From<&Session> for RoomSnapshot {
    fn from(session: &Session) -> Self {
        RoomSnapshot {
            room_code: session.code().clone(),
            player1: session.player1(),
            player2: session.player2(),
            current_turn: session.current_turn(),
            board: *session.board(),
            status: session.status(),
            winner: session.winner(),
            next_room_code: session.next_room().cloned(),
            rematch: session.rematch_votes(),
            move_count: session.ledger().len() as u64,
        }
    }
}

/// Answer of the "active session for identity" query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ActiveRoom {
    pub has_active_game: bool,
    pub room_code: Option<RoomCode>,
}

impl ActiveRoom {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn found(room_code: RoomCode) -> Self {
        ActiveRoom {
            has_active_game: true,
            room_code: Some(room_code),
        }
    }
}
