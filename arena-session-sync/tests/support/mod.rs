pub mod flaky_api;

use arena_session_core::{ParticipantId, RoomCode, RoomService};
use arena_session_sync::{SyncClient, SyncConfig, SyncContext, SyncHandle, SyncUpdate};
use flaky_api::FlakyApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub fn p(id: u64) -> ParticipantId {
    ParticipantId::new(id)
}

/// One viewer polling one room
pub struct Viewer {
    pub handle: SyncHandle,
    pub updates: mpsc::Receiver<SyncUpdate>,
    pub task: JoinHandle<arena_session_sync::error::Result<()>>,
}

impl Viewer {
    /// Wait for the next update (bounded, so a broken loop fails the test)
    pub async fn next(&mut self) -> SyncUpdate {
        tokio::time::timeout(Duration::from_secs(30), self.updates.recv())
            .await
            .expect("timed out waiting for an update")
            .expect("update stream closed")
    }

    /// Skip updates until one matches
    pub async fn wait_for(&mut self, mut pred: impl FnMut(&SyncUpdate) -> bool) -> SyncUpdate {
        loop {
            let update = self.next().await;
            if pred(&update) {
                return update;
            }
        }
    }
}

/// Shared service, API wrapper, and a way to spawn viewers
pub struct SyncFixture {
    pub service: RoomService,
    pub api: Arc<FlakyApi>,
}

impl SyncFixture {
    pub fn new() -> Self {
        init_tracing();
        let service = RoomService::new();
        let api = Arc::new(FlakyApi::new(service.clone()));
        Self { service, api }
    }

    pub fn room(&self, raw: &str, creator: u64) -> RoomCode {
        self.service
            .create_room_with_code(RoomCode::parse(raw).unwrap(), p(creator))
            .unwrap()
    }

    pub fn spawn_viewer(&self, code: &RoomCode, context: SyncContext) -> Viewer {
        let config = SyncConfig::new().with_poll_interval(1000);
        let (client, handle, updates) =
            SyncClient::new(self.api.clone(), code.clone(), context, config);
        Viewer {
            handle,
            updates,
            task: tokio::spawn(client.run()),
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arena_session_sync=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
