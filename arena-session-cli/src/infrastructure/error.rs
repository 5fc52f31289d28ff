use arena_session_core::RoomError;
use arena_session_sync::{ApiError, SyncError};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    #[error("Invalid schema directory: {path}")]
    InvalidSchemaDirectory { path: PathBuf },

    #[error("Room error: {0}")]
    Room(#[from] RoomError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Demo stalled: {0}")]
    DemoStalled(String),

    #[error("Failed to initialize logging: {0}")]
    LogInit(String),
}

impl CliError {
    pub fn invalid_directory(path: PathBuf) -> Self {
        CliError::InvalidSchemaDirectory { path }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
