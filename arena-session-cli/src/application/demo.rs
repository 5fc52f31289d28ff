use crate::application::replay::ReplayFile;
use crate::infrastructure::error::{CliError, Result};
use arena_session_core::{
    ParticipantId, RoomCode, RoomEvent, RoomService, RoomSnapshot, SessionStatus,
};
use arena_session_sync::{
    LocalRoomApi, RoomApi, SyncClient, SyncConfig, SyncContext, SyncHandle, SyncUpdate,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::Instrument;

/// Opening used by the demo: the host completes the middle row
pub const SCENARIO: [(Seat, u8, u8); 5] = [
    (Seat::Host, 1, 1),
    (Seat::Guest, 0, 0),
    (Seat::Host, 1, 0),
    (Seat::Guest, 2, 2),
    (Seat::Host, 1, 2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Host,
    Guest,
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub room_code: RoomCode,
    pub host: ParticipantId,
    pub guest: ParticipantId,
    pub poll_interval_ms: u64,

    /// Agree on a rematch after the game and follow both viewers into it
    pub rematch: bool,

    /// Give up when no update arrives for this long
    pub stall_timeout: Duration,
}

impl DemoConfig {
    pub fn new(room_code: RoomCode) -> Self {
        Self {
            room_code,
            host: ParticipantId::new(1),
            guest: ParticipantId::new(2),
            poll_interval_ms: 1000,
            rematch: false,
            stall_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_poll_interval(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn with_rematch(mut self, rematch: bool) -> Self {
        self.rematch = rematch;
        self
    }
}

/// What the demo observed
#[derive(Debug, Clone)]
pub struct DemoReport {
    /// Final state as rendered by the guest's viewer
    pub final_snapshot: RoomSnapshot,
    pub replay: ReplayFile,
    pub rematch_room: Option<RoomCode>,
}

type LoopResult = arena_session_sync::error::Result<()>;

struct Viewer {
    handle: SyncHandle,
    updates: mpsc::Receiver<SyncUpdate>,
    task: JoinHandle<LoopResult>,
}

impl Viewer {
    fn spawn(
        api: &Arc<LocalRoomApi>,
        code: &RoomCode,
        who: ParticipantId,
        config: SyncConfig,
    ) -> Self {
        let (client, handle, updates) = SyncClient::new(
            api.clone(),
            code.clone(),
            SyncContext::signed_in(who),
            config,
        );
        let span = tracing::info_span!("viewer", participant = %who);
        Viewer {
            handle,
            updates,
            task: tokio::spawn(client.run().instrument(span)),
        }
    }

    async fn wait_for(
        &mut self,
        timeout: Duration,
        what: &str,
        mut pred: impl FnMut(&SyncUpdate) -> bool,
    ) -> Result<SyncUpdate> {
        loop {
            let update = tokio::time::timeout(timeout, self.updates.recv())
                .await
                .map_err(|_| CliError::DemoStalled(format!("no update while waiting for {what}")))?
                .ok_or_else(|| CliError::DemoStalled(format!("viewer stopped before {what}")))?;

            if let SyncUpdate::Rendered(snapshot) = &update {
                tracing::debug!("{}: {}", snapshot.room_code, snapshot.board);
            }
            if pred(&update) {
                return Ok(update);
            }
        }
    }

    /// Drop the handle and the update stream, then wait for the loop to end
    async fn close(self) -> std::result::Result<LoopResult, JoinError> {
        let Viewer {
            handle,
            updates,
            task,
        } = self;
        drop(handle);
        drop(updates);
        task.await
    }
}

fn rendered(update: SyncUpdate) -> Option<RoomSnapshot> {
    match update {
        SyncUpdate::Rendered(snapshot) => Some(snapshot),
        _ => None,
    }
}

/// Play the scenario end to end through two polling viewers
pub async fn run_demo(config: &DemoConfig) -> Result<DemoReport> {
    let api = Arc::new(LocalRoomApi::new(RoomService::new()));
    let code = api
        .service()
        .create_room_with_code(config.room_code.clone(), config.host)?;
    tracing::info!("🎮 {} opened room {}", config.host, code);

    let sync = SyncConfig::new().with_poll_interval(config.poll_interval_ms);
    let mut host = Viewer::spawn(&api, &code, config.host, sync.clone());
    let mut guest = Viewer::spawn(&api, &code, config.guest, sync);

    // The guest only opens the room; its viewer takes the seat
    let started = |u: &SyncUpdate| {
        matches!(u, SyncUpdate::Rendered(s) if s.status == SessionStatus::InProgress)
    };
    guest.wait_for(config.stall_timeout, "the auto-join", started).await?;
    host.wait_for(config.stall_timeout, "the game to start", started).await?;

    for (seat, row, col) in SCENARIO {
        let viewer = match seat {
            Seat::Host => &host,
            Seat::Guest => &guest,
        };
        let event = viewer.handle.make_move(row, col).await?;
        if let RoomEvent::MovePlayed { mv, result, .. } = event {
            tracing::info!("{} played ({}, {}): {:?}", mv.participant, row, col, result);
        }
    }

    let finished = |u: &SyncUpdate| {
        matches!(u, SyncUpdate::Rendered(s) if s.status.is_terminal())
    };
    let final_snapshot = guest
        .wait_for(config.stall_timeout, "the result", finished)
        .await
        .map(rendered)?
        .ok_or_else(|| CliError::DemoStalled("no final render".to_string()))?;
    tracing::info!("🏁 {}", final_snapshot.headline(None));

    let replay = ReplayFile {
        player1: final_snapshot.player1,
        moves: api.fetch_moves(&code).await?,
    };

    let rematch_room = if config.rematch {
        Some(agree_rematch(&mut host, &mut guest, config.stall_timeout).await?)
    } else {
        None
    };

    let (host_result, guest_result) = futures::future::join(host.close(), guest.close()).await;
    for result in [host_result, guest_result] {
        match result {
            Ok(loop_result) => loop_result?,
            Err(e) => tracing::warn!("Viewer task failed: {}", e),
        }
    }

    Ok(DemoReport {
        final_snapshot,
        replay,
        rematch_room,
    })
}

async fn agree_rematch(
    host: &mut Viewer,
    guest: &mut Viewer,
    timeout: Duration,
) -> Result<RoomCode> {
    host.handle.request_rematch().await?;
    guest.handle.request_rematch().await?;

    let mut next = None;
    for viewer in [host, guest] {
        let update = viewer
            .wait_for(timeout, "the rematch", |u| matches!(u, SyncUpdate::Forwarded { .. }))
            .await?;
        if let SyncUpdate::Forwarded { from, to } = update {
            tracing::info!("🔁 {} → {}", from, to);
            next = Some(to);
        }
    }

    next.ok_or_else(|| CliError::DemoStalled("rematch never forwarded".to_string()))
}
