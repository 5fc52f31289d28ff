use crate::application::config::SyncContext;
use arena_session_core::{ParticipantId, RoomCode, RoomSnapshot, SessionStatus};
use std::collections::HashSet;

/// What the loop should do with one poll result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Show this snapshot
    Render(RoomSnapshot),

    /// Show this snapshot and claim the open seat
    AutoJoin {
        snapshot: RoomSnapshot,
        participant: ParticipantId,
    },

    /// The room was replaced by a rematch; poll `to` from now on
    Forward { from: RoomCode, to: RoomCode },

    /// Out-of-date or foreign response, dropped
    Stale,

    /// The polled room no longer exists; stop polling
    RoomGone(RoomCode),
}

/// Decides what a poll result means for the consumer
///
/// Pure state machine with no I/O; the async loop in
/// [`SyncClient`](crate::SyncClient) feeds it every response.
#[derive(Debug, Clone)]
pub struct RoomReconciler {
    /// Room currently polled
    target: RoomCode,

    /// Remembered identity of the local user
    identity: Option<ParticipantId>,

    /// Ledger length of the last rendered snapshot (per target)
    rendered_moves: Option<u64>,

    /// Last snapshot handed to the consumer
    last_rendered: Option<RoomSnapshot>,

    /// Rooms already left through a forwarding link
    visited: HashSet<RoomCode>,

    stopped: bool,
}

impl RoomReconciler {
    pub fn new(target: RoomCode, context: &SyncContext) -> Self {
        Self {
            target,
            identity: context.identity,
            rendered_moves: None,
            last_rendered: None,
            visited: HashSet::new(),
            stopped: false,
        }
    }

    pub fn target(&self) -> &RoomCode {
        &self.target
    }

    pub fn identity(&self) -> Option<ParticipantId> {
        self.identity
    }

    pub fn last_rendered(&self) -> Option<&RoomSnapshot> {
        self.last_rendered.as_ref()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Handle a successful fetch
    pub fn on_snapshot(&mut self, snapshot: RoomSnapshot) -> Reaction {
        if self.stopped {
            return Reaction::Stale;
        }

        if snapshot.room_code != self.target {
            tracing::debug!(
                "Dropping snapshot of {} (now polling {})",
                snapshot.room_code,
                self.target
            );
            return Reaction::Stale;
        }

        if let Some(rendered) = self.rendered_moves
            && snapshot.move_count < rendered
        {
            tracing::debug!(
                "Dropping stale snapshot of {}: {} moves < {} rendered",
                self.target,
                snapshot.move_count,
                rendered
            );
            return Reaction::Stale;
        }

        if let Some(next) = snapshot.next_room_code.clone()
            && next != self.target
            && !self.visited.contains(&next)
        {
            let from = std::mem::replace(&mut self.target, next.clone());
            self.visited.insert(from.clone());
            self.rendered_moves = None;
            tracing::info!("Room {} forwarded to rematch room {}", from, next);
            return Reaction::Forward { from, to: next };
        }

        self.rendered_moves = Some(snapshot.move_count);
        self.last_rendered = Some(snapshot.clone());

        match self.seat_to_claim(&snapshot) {
            Some(participant) => {
                tracing::debug!(
                    "Seat 2 of {} is open, auto-joining as {}",
                    self.target,
                    participant
                );
                Reaction::AutoJoin {
                    snapshot,
                    participant,
                }
            }
            None => Reaction::Render(snapshot),
        }
    }

    /// Handle a NotFound answer for `code`
    pub fn on_not_found(&mut self, code: &RoomCode) -> Reaction {
        if self.stopped || *code != self.target {
            return Reaction::Stale;
        }

        self.stopped = true;
        tracing::info!("Room {} is gone, polling stops", code);
        Reaction::RoomGone(code.clone())
    }

    fn seat_to_claim(&self, snapshot: &RoomSnapshot) -> Option<ParticipantId> {
        let identity = self.identity?;
        let open = snapshot.status == SessionStatus::Waiting
            && snapshot.player2.is_none()
            && snapshot.player1 != identity;
        open.then_some(identity)
    }
}
