mod commands;
mod events;
mod registry;
mod rematch;
mod service;
mod snapshot;

pub use commands::RoomCommand;
pub use events::RoomEvent;
pub use registry::{RoomRegistry, SharedSession, lock_session};
pub use rematch::{RematchCoordinator, RematchOutcome};
pub use service::RoomService;
pub use snapshot::{ActiveRoom, RoomSnapshot};
