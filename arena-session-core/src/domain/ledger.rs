use crate::domain::{ParticipantId, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One accepted move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Move {
    /// Position in the ledger (contiguous, starting at 0)
    pub sequence: u64,

    /// Who moved
    pub participant: ParticipantId,

    pub row: u8,
    pub col: u8,

    pub created_at: Timestamp,
}

/// Append-only record of the moves accepted by one session
///
/// Entries are never edited or removed; the board of the owning session is
/// always the fold of these entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MoveLedger {
    entries: Vec<Move>,
}

impl MoveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move and return its sequence index.
    ///
    /// Only the owning session calls this, while holding its room lock.
    pub(crate) fn append(&mut self, participant: ParticipantId, row: u8, col: u8) -> u64 {
        let sequence = self.entries.len() as u64;
        self.entries.push(Move {
            sequence,
            participant,
            row,
            col,
            created_at: Timestamp::now(),
        });
        sequence
    }

    /// The first `n` entries (all of them when `n` exceeds the length)
    pub fn entries_up_to(&self, n: usize) -> &[Move] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn all(&self) -> &[Move] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Move> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
