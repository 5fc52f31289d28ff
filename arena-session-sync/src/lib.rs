// Application layer (reconciliation loop)
pub mod application;

// Infrastructure layer (room API adapters)
pub mod infrastructure;

pub mod error;

// Re-exports for convenience
pub use application::{
    LocalAction, Reaction, RoomReconciler, SyncClient, SyncConfig, SyncContext, SyncHandle,
    SyncUpdate,
};
pub use error::{ApiError, SyncError};
pub use infrastructure::{LocalRoomApi, RoomApi};
