use crate::application::registry::{RoomRegistry, lock_session};
use crate::domain::{ParticipantId, RematchVotes, RoomCode, RoomError, SessionStatus};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Answer to a rematch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RematchOutcome {
    /// Vote recorded; the counterpart has not agreed (or never can)
    Pending { votes: RematchVotes },
    /// Both agreed; play continues in `next_room`
    Agreed { next_room: RoomCode },
}

impl RematchOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, RematchOutcome::Pending { .. })
    }

    pub fn next_room(&self) -> Option<&RoomCode> {
        match self {
            RematchOutcome::Agreed { next_room } => Some(next_room),
            RematchOutcome::Pending { .. } => None,
        }
    }
}

/// Two-vote agreement that spawns a successor room
///
/// The old room is retired, not reused: its votes stay set and it only gains
/// a forwarding pointer.
#[derive(Debug, Clone)]
pub struct RematchCoordinator {
    registry: Arc<RoomRegistry>,
}

impl RematchCoordinator {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    pub fn request_rematch(
        &self,
        code: &RoomCode,
        participant: ParticipantId,
    ) -> Result<RematchOutcome, RoomError> {
        let shared = self.registry.lookup(code)?;
        let mut session = lock_session(&shared);

        if session.is_closed() {
            return Err(RoomError::NotFound(code.clone()));
        }

        let changed = session.record_rematch_vote(participant)?;

        if let Some(next_room) = session.next_room() {
            tracing::debug!(
                "Rematch for {} already agreed, forwarding to {}",
                code,
                next_room
            );
            return Ok(RematchOutcome::Agreed {
                next_room: next_room.clone(),
            });
        }

        if !session.rematch_agreed() {
            let votes = session.rematch_votes();
            if changed {
                tracing::info!(
                    "{} wants a rematch in room {} ({}/2)",
                    participant,
                    code,
                    votes.count()
                );
            }
            if session.status() == SessionStatus::Abandoned {
                tracing::debug!("Room {} was abandoned, rematch stays pending", code);
            }
            return Ok(RematchOutcome::Pending { votes });
        }

        // rematch_agreed() implies both seats are filled
        let Some(player2) = session.player2() else {
            return Ok(RematchOutcome::Pending {
                votes: session.rematch_votes(),
            });
        };

        let next_room = self.registry.create_rematch(session.player1(), player2);
        session.set_forwarding(next_room.clone());

        tracing::info!("Rematch agreed: room {} forwards to {}", code, next_room);

        Ok(RematchOutcome::Agreed { next_room })
    }
}
