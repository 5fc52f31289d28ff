use crate::application::replay::ReplayFile;
use crate::infrastructure::error::{CliError, Result};
use arena_session_core::{ActiveRoom, Move, RematchOutcome, RoomError, RoomEvent, RoomSnapshot};
use schemars::schema::RootSchema;
use schemars::schema_for;
use std::path::{Path, PathBuf};

/// Names accepted by `arena-cli schema --name`
pub const SCHEMA_NAMES: [&str; 7] = [
    "room_snapshot",
    "room_event",
    "move",
    "active_room",
    "rematch_outcome",
    "room_error",
    "replay_file",
];

pub fn schema_by_name(name: &str) -> Result<RootSchema> {
    let schema = match name {
        "room_snapshot" => schema_for!(RoomSnapshot),
        "room_event" => schema_for!(RoomEvent),
        "move" => schema_for!(Move),
        "active_room" => schema_for!(ActiveRoom),
        "rematch_outcome" => schema_for!(RematchOutcome),
        "room_error" => schema_for!(RoomError),
        "replay_file" => schema_for!(ReplayFile),
        other => return Err(CliError::UnknownSchema(other.to_string())),
    };
    Ok(schema)
}

/// Write every schema as `<name>.schema.json` into `dir`
pub fn write_all(dir: &Path) -> Result<Vec<PathBuf>> {
    if dir.exists() && !dir.is_dir() {
        return Err(CliError::invalid_directory(dir.to_path_buf()));
    }
    std::fs::create_dir_all(dir)?;

    SCHEMA_NAMES
        .iter()
        .map(|name| {
            let path = dir.join(format!("{name}.schema.json"));
            let schema = schema_by_name(name)?;
            std::fs::write(&path, serde_json::to_string_pretty(&schema)?)?;
            tracing::debug!("Wrote {}", path.display());
            Ok(path)
        })
        .collect()
}
