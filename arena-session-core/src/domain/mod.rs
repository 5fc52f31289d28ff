pub mod board;
pub mod error;
pub mod ledger;
pub mod participant;
pub mod replay;
pub mod room_code;
pub mod session;

pub use board::{Board, CELL_COUNT, Cell, GRID_SIZE, WIN_LINES};
pub use error::RoomError;
pub use ledger::{Move, MoveLedger};
pub use participant::{ParticipantId, Timestamp, ViewerRole};
pub use replay::{PlaybackState, ReplayPlayer, board_at_step};
pub use room_code::RoomCode;
pub use session::{
    JoinOutcome, LeaveOutcome, MoveResult, Outcome, RematchVotes, Session, SessionStatus,
};
