use crate::infrastructure::error::Result;
use arena_session_core::{Board, Move, ParticipantId, PlaybackState, ReplayPlayer, board_at_step};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Configuration for timed playback
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Delay between two replayed moves in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
        }
    }
}

impl ReplayConfig {
    pub fn with_tick_interval(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// A finished game as exported by `arena-cli demo --export`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReplayFile {
    pub player1: ParticipantId,
    pub moves: Vec<Move>,
}

impl ReplayFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Board after the first `step` moves
    pub fn board_at(&self, step: usize) -> Board {
        board_at_step(&self.moves, self.player1, step)
    }

    pub fn player(&self) -> ReplayPlayer {
        ReplayPlayer::new(self.moves.clone(), self.player1)
    }
}

/// One rendered frame of a replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub step: usize,
    pub last_move: Option<Move>,
    pub board: Board,
}

impl Frame {
    fn of(player: &ReplayPlayer) -> Self {
        Frame {
            step: player.step(),
            last_move: player.current_move().cloned(),
            board: player.board(),
        }
    }
}

/// Play `player` from the start, one move per tick, until it pauses at the end.
///
/// `on_frame` sees the empty board first, then every step.
pub async fn play(
    player: &mut ReplayPlayer,
    config: &ReplayConfig,
    mut on_frame: impl FnMut(&Frame),
) -> usize {
    player.stop();
    player.start();
    on_frame(&Frame::of(player));

    let mut interval = tokio::time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick fires immediately
    interval.tick().await;

    let mut frames = 1;
    while player.state() == PlaybackState::Playing {
        interval.tick().await;
        if player.tick() {
            on_frame(&Frame::of(player));
            frames += 1;
        }
    }

    tracing::debug!("Replay paused at step {}/{}", player.step(), player.len());
    frames
}
