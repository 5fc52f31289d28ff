use crate::domain::{
    Board, Cell, Move, MoveLedger, ParticipantId, RoomCode, RoomError, Timestamp, ViewerRole,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Created, waiting for a second participant
    Waiting,
    /// Both seats filled, moves being played
    InProgress,
    /// A line was completed; `winner` is set
    Finished,
    /// Board filled without a line
    Draw,
    /// A participant walked out mid-game; the other one wins
    Abandoned,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Finished | SessionStatus::Draw | SessionStatus::Abandoned
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Waiting => "WAITING",
            SessionStatus::InProgress => "IN_PROGRESS",
            SessionStatus::Finished => "FINISHED",
            SessionStatus::Draw => "DRAW",
            SessionStatus::Abandoned => "ABANDONED",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final result as shown to players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "winner", rename_all = "snake_case")]
pub enum Outcome {
    Win(ParticipantId),
    Draw,
}

impl Outcome {
    /// Result shown for a room in `status`; `None` until the game is over
    pub fn of(status: SessionStatus, winner: Option<ParticipantId>) -> Option<Self> {
        match (status, winner) {
            (SessionStatus::Finished | SessionStatus::Abandoned, Some(winner)) => {
                Some(Outcome::Win(winner))
            }
            (SessionStatus::Draw | SessionStatus::Abandoned, None) => Some(Outcome::Draw),
            _ => None,
        }
    }
}

/// Post-game rematch intent, one flag per original seat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RematchVotes {
    pub player1: bool,
    pub player2: bool,
}

impl RematchVotes {
    pub fn count(&self) -> u8 {
        u8::from(self.player1) + u8::from(self.player2)
    }

    pub fn both(&self) -> bool {
        self.player1 && self.player2
    }
}

/// Result of a successful join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Seat 2 was filled by this call; the game started
    Joined,
    /// Caller already held a seat; nothing changed
    AlreadyJoined,
}

/// What an accepted move did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveResult {
    /// Game goes on; the other participant moves next
    Continue { next_turn: ParticipantId },
    /// The mover completed a line
    Won { winner: ParticipantId },
    /// Last cell filled without a line
    Draw,
}

/// Result of a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Mid-game walkout; the remaining participant wins
    Abandoned { winner: Option<ParticipantId> },
    /// The creator left before anybody joined; the room must be destroyed
    DestroyRoom,
    /// Terminal session or spectator: nothing to do
    Ignored,
}

/// Authoritative state of one room
///
/// All mutation goes through `join`, `make_move`, `leave` and the rematch
/// hooks. A failed call never modifies the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    code: RoomCode,
    player1: ParticipantId,
    player2: Option<ParticipantId>,
    current_turn: ParticipantId,
    board: Board,
    ledger: MoveLedger,
    status: SessionStatus,
    winner: Option<ParticipantId>,
    next_room: Option<RoomCode>,
    rematch: RematchVotes,
    created_at: Timestamp,

    /// Set once the room has been removed from the registry
    #[serde(skip)]
    closed: bool,
}

impl Session {
    /// Create a fresh room waiting for an opponent
    pub fn new(code: RoomCode, creator: ParticipantId) -> Self {
        Session {
            code,
            player1: creator,
            player2: None,
            current_turn: creator,
            board: Board::new(),
            ledger: MoveLedger::new(),
            status: SessionStatus::Waiting,
            winner: None,
            next_room: None,
            rematch: RematchVotes::default(),
            created_at: Timestamp::now(),
            closed: false,
        }
    }

    /// Create a room that starts with both seats taken (rematch successor)
    pub fn with_players(code: RoomCode, player1: ParticipantId, player2: ParticipantId) -> Self {
        let mut session = Session::new(code, player1);
        session.player2 = Some(player2);
        session.status = SessionStatus::InProgress;
        session
    }

    // ===== Getters =====

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn player1(&self) -> ParticipantId {
        self.player1
    }

    pub fn player2(&self) -> Option<ParticipantId> {
        self.player2
    }

    pub fn current_turn(&self) -> ParticipantId {
        self.current_turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> &MoveLedger {
        &self.ledger
    }

    pub fn moves(&self) -> &[Move] {
        self.ledger.all()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn winner(&self) -> Option<ParticipantId> {
        self.winner
    }

    pub fn next_room(&self) -> Option<&RoomCode> {
        self.next_room.as_ref()
    }

    pub fn rematch_votes(&self) -> RematchVotes {
        self.rematch
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// True when `participant` holds either seat
    pub fn is_player(&self, participant: ParticipantId) -> bool {
        participant == self.player1 || Some(participant) == self.player2
    }

    pub fn role_of(&self, participant: ParticipantId) -> ViewerRole {
        ViewerRole::of(participant, self.player1, self.player2)
    }

    /// Mark placed by a seated participant
    pub fn mark_of(&self, participant: ParticipantId) -> Option<Cell> {
        match self.role_of(participant) {
            ViewerRole::Player1 => Some(Cell::X),
            ViewerRole::Player2 => Some(Cell::O),
            ViewerRole::Spectator => None,
        }
    }

    fn opponent_of(&self, participant: ParticipantId) -> Option<ParticipantId> {
        if participant == self.player1 {
            self.player2
        } else if Some(participant) == self.player2 {
            Some(self.player1)
        } else {
            None
        }
    }

    /// Final result, once the session is terminal
    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::of(self.status, self.winner)
    }

    /// Non-terminal session in which `participant` holds a seat
    pub fn is_active_for(&self, participant: ParticipantId) -> bool {
        !self.closed && !self.status.is_terminal() && self.is_player(participant)
    }

    // ===== Transitions =====

    /// Take seat 2 and start the game.
    ///
    /// Repeated joins by a seated participant are a no-op success so that a
    /// polling client can auto-join at least once without tracking state.
    pub fn join(&mut self, participant: ParticipantId) -> Result<JoinOutcome, RoomError> {
        if let Some(player2) = self.player2 {
            if self.is_player(participant) {
                tracing::debug!(
                    "{} already seated in room {}, join is a no-op",
                    participant,
                    self.code
                );
                return Ok(JoinOutcome::AlreadyJoined);
            }
            return Err(RoomError::Conflict(format!(
                "room {} is full ({} vs {})",
                self.code, self.player1, player2
            )));
        }

        if participant == self.player1 {
            return Err(RoomError::Conflict(format!(
                "{} is already the host of room {}",
                participant, self.code
            )));
        }

        if self.status != SessionStatus::Waiting {
            return Err(RoomError::GameOver(self.status));
        }

        self.player2 = Some(participant);
        self.current_turn = self.player1;
        self.status = SessionStatus::InProgress;

        tracing::info!(
            "{} joined room {}, game started ({} moves first)",
            participant,
            self.code,
            self.player1
        );

        Ok(JoinOutcome::Joined)
    }

    /// Place the caller's mark at (`row`, `col`).
    ///
    /// Checks, in order: the game is running, the coordinates are on the grid,
    /// the caller holds the turn, the cell is empty. Terminal conditions are
    /// evaluated as: completed line, full board, otherwise flip the turn.
    pub fn make_move(
        &mut self,
        participant: ParticipantId,
        row: u8,
        col: u8,
    ) -> Result<(Move, MoveResult), RoomError> {
        match self.status {
            SessionStatus::InProgress => {}
            SessionStatus::Waiting => {
                return Err(RoomError::InvalidMove(
                    "game has not started yet".to_string(),
                ));
            }
            terminal => return Err(RoomError::GameOver(terminal)),
        }

        if Board::index(row, col).is_none() {
            return Err(RoomError::out_of_range(row, col));
        }

        if participant != self.current_turn {
            return Err(RoomError::not_your_turn(participant));
        }

        if self.board.get(row, col) != Some(Cell::Empty) {
            return Err(RoomError::OccupiedCell { row, col });
        }

        let Some(mark) = self.mark_of(participant) else {
            return Err(RoomError::not_your_turn(participant));
        };

        let sequence = self.ledger.append(participant, row, col);
        self.board.set(row, col, mark);

        let result = if self.board.winning_mark().is_some() {
            self.status = SessionStatus::Finished;
            self.winner = Some(participant);
            MoveResult::Won {
                winner: participant,
            }
        } else if self.board.is_full() {
            self.status = SessionStatus::Draw;
            MoveResult::Draw
        } else {
            let next_turn = self.opponent_of(participant).unwrap_or(self.player1);
            self.current_turn = next_turn;
            MoveResult::Continue { next_turn }
        };

        tracing::debug!(
            "Room {} move #{} by {} at ({}, {}) -> {:?}",
            self.code,
            sequence,
            participant,
            row,
            col,
            result
        );

        let applied = self.ledger.all()[sequence as usize].clone();
        Ok((applied, result))
    }

    /// Handle a participant walking away
    pub fn leave(&mut self, participant: ParticipantId) -> LeaveOutcome {
        match self.status {
            SessionStatus::InProgress if self.is_player(participant) => {
                let winner = self.opponent_of(participant);
                self.status = SessionStatus::Abandoned;
                self.winner = winner;

                tracing::info!(
                    "{} left room {} mid-game, winner: {:?}",
                    participant,
                    self.code,
                    winner
                );

                LeaveOutcome::Abandoned { winner }
            }
            SessionStatus::Waiting if participant == self.player1 => LeaveOutcome::DestroyRoom,
            _ => {
                tracing::debug!(
                    "Leave by {} ignored in room {} (status {})",
                    participant,
                    self.code,
                    self.status
                );
                LeaveOutcome::Ignored
            }
        }
    }

    // ===== Rematch hooks (driven by RematchCoordinator) =====

    /// Record a participant's wish to play again.
    ///
    /// Returns `true` when the flag changed.
    pub(crate) fn record_rematch_vote(
        &mut self,
        participant: ParticipantId,
    ) -> Result<bool, RoomError> {
        if !self.status.is_terminal() {
            return Err(RoomError::GameNotOver(self.status));
        }

        let flag = match self.role_of(participant) {
            ViewerRole::Player1 => &mut self.rematch.player1,
            ViewerRole::Player2 => &mut self.rematch.player2,
            ViewerRole::Spectator => return Err(RoomError::NotParticipant(participant)),
        };

        let changed = !*flag;
        *flag = true;
        Ok(changed)
    }

    /// Both seats voted and the game ended without a walkout
    pub fn rematch_agreed(&self) -> bool {
        self.rematch.both()
            && self.player2.is_some()
            && matches!(
                self.status,
                SessionStatus::Finished | SessionStatus::Draw
            )
    }

    /// Point this retired session at its successor; only the first call wins
    pub(crate) fn set_forwarding(&mut self, next: RoomCode) -> bool {
        if self.next_room.is_some() {
            return false;
        }
        self.next_room = Some(next);
        true
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }
}
