pub mod application;
pub mod domain;

pub use application::{
    ActiveRoom, RematchCoordinator, RematchOutcome, RoomCommand, RoomEvent, RoomRegistry,
    RoomService, RoomSnapshot,
};
pub use domain::{
    Board, Cell, Move, MoveLedger, MoveResult, Outcome, ParticipantId, PlaybackState,
    ReplayPlayer, RoomCode, RoomError, Session, SessionStatus, Timestamp, ViewerRole,
    board_at_step,
};
