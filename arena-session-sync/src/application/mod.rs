mod client;
mod config;
mod reconciler;

pub use client::{LocalAction, SyncClient, SyncHandle, SyncUpdate};
pub use config::{SyncConfig, SyncContext};
pub use reconciler::{Reaction, RoomReconciler};
