use instant::Instant;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier of a registered participant.
///
/// Issued by the identity collaborator; the room core never validates it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ParticipantId(u64);

impl ParticipantId {
    pub const fn new(raw: u64) -> Self {
        ParticipantId(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ParticipantId {
    fn from(raw: u64) -> Self {
        ParticipantId(raw)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user{}", self.0)
    }
}

/// How a given identity relates to a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    /// Occupies slot 1 (plays X, moves first)
    Player1,
    /// Occupies slot 2 (plays O)
    Player2,
    /// Watches without a seat
    Spectator,
}

impl ViewerRole {
    /// Seat held by `participant` in a room seating `player1` and `player2`
    pub fn of(
        participant: ParticipantId,
        player1: ParticipantId,
        player2: Option<ParticipantId>,
    ) -> Self {
        if participant == player1 {
            ViewerRole::Player1
        } else if Some(participant) == player2 {
            ViewerRole::Player2
        } else {
            ViewerRole::Spectator
        }
    }

    pub fn is_player(&self) -> bool {
        !matches!(self, ViewerRole::Spectator)
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerRole::Player1 => write!(f, "Player 1"),
            ViewerRole::Player2 => write!(f, "Player 2"),
            ViewerRole::Spectator => write!(f, "Spectator"),
        }
    }
}

/// Timestamp in milliseconds since process start (monotonic)
///
/// Serializable and comparable, suitable for ordering ledger entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp representing the current moment
    pub fn now() -> Self {
        static ANCHOR: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
        let anchor = ANCHOR.get_or_init(Instant::now);

        let elapsed = Instant::now().duration_since(*anchor);
        Timestamp(elapsed.as_millis() as u64)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
