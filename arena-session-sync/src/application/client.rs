use crate::application::config::{SyncConfig, SyncContext};
use crate::application::reconciler::{Reaction, RoomReconciler};
use crate::error::{ApiError, Result, SyncError};
use crate::infrastructure::RoomApi;
use arena_session_core::{ParticipantId, RoomCode, RoomEvent, RoomSnapshot};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Interval, MissedTickBehavior};

/// Something the local user did in the room being viewed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalAction {
    Join,
    Move { row: u8, col: u8 },
    Leave,
    RequestRematch,
}

/// Updates delivered to the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncUpdate {
    /// Fresh state of the polled room
    Rendered(RoomSnapshot),

    /// Polling moved to the rematch room
    Forwarded { from: RoomCode, to: RoomCode },

    /// The room was destroyed; the loop has ended
    RoomGone(RoomCode),
}

struct ActionRequest {
    action: LocalAction,
    reply: oneshot::Sender<Result<RoomEvent>>,
}

/// Handle for issuing local actions into a running [`SyncClient`]
///
/// Dropping every handle ends the loop (the view navigated away).
#[derive(Clone)]
pub struct SyncHandle {
    actions: mpsc::Sender<ActionRequest>,
}

impl SyncHandle {
    pub async fn send(&self, action: LocalAction) -> Result<RoomEvent> {
        let (reply, response) = oneshot::channel();
        self.actions
            .send(ActionRequest { action, reply })
            .await
            .map_err(|_| SyncError::ChannelClosed)?;
        response.await.map_err(|_| SyncError::ChannelClosed)?
    }

    pub async fn join(&self) -> Result<RoomEvent> {
        self.send(LocalAction::Join).await
    }

    pub async fn make_move(&self, row: u8, col: u8) -> Result<RoomEvent> {
        self.send(LocalAction::Move { row, col }).await
    }

    pub async fn leave(&self) -> Result<RoomEvent> {
        self.send(LocalAction::Leave).await
    }

    pub async fn request_rematch(&self) -> Result<RoomEvent> {
        self.send(LocalAction::RequestRematch).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Retarget,
    Stop,
}

/// Polling loop for one viewed room
///
/// Fetches the room on a fixed cadence, one request at a time, and feeds
/// each answer to a [`RoomReconciler`].
pub struct SyncClient<A: RoomApi> {
    api: Arc<A>,
    config: SyncConfig,
    reconciler: RoomReconciler,
    actions: mpsc::Receiver<ActionRequest>,
    updates: mpsc::Sender<SyncUpdate>,
}

impl<A: RoomApi + 'static> SyncClient<A> {
    /// Build a loop for `room_code`; returns the loop, its action handle and
    /// the update stream for the view
    pub fn new(
        api: Arc<A>,
        room_code: RoomCode,
        context: SyncContext,
        config: SyncConfig,
    ) -> (Self, SyncHandle, mpsc::Receiver<SyncUpdate>) {
        let (action_tx, action_rx) = mpsc::channel(config.action_channel_capacity.max(1));
        let (update_tx, update_rx) = mpsc::channel(config.update_channel_capacity.max(1));

        let client = Self {
            api,
            reconciler: RoomReconciler::new(room_code, &context),
            config,
            actions: action_rx,
            updates: update_tx,
        };

        (client, SyncHandle { actions: action_tx }, update_rx)
    }

    pub fn target(&self) -> &RoomCode {
        self.reconciler.target()
    }

    /// Run until the room is gone, the view stops listening, or every handle
    /// is dropped
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(
            "🔄 Polling room {} every {}ms",
            self.reconciler.target(),
            self.config.poll_interval_ms
        );

        let mut interval = self.fresh_interval();

        loop {
            let flow = tokio::select! {
                _ = interval.tick() => self.poll_once().await,

                request = self.actions.recv() => match request {
                    Some(request) => {
                        self.perform(request).await;
                        // Out-of-cadence refresh; the interval keeps its schedule
                        self.poll_once().await
                    }
                    None => {
                        tracing::debug!(
                            "All handles dropped, leaving {}",
                            self.reconciler.target()
                        );
                        Flow::Stop
                    }
                },
            };

            match flow {
                Flow::Continue => {}
                Flow::Retarget => interval = self.fresh_interval(),
                Flow::Stop => break,
            }
        }

        tracing::info!("⏹️ Stopped polling {}", self.reconciler.target());
        Ok(())
    }

    fn fresh_interval(&self) -> Interval {
        let mut interval = tokio::time::interval(self.config.poll_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    async fn poll_once(&mut self) -> Flow {
        let target = self.reconciler.target().clone();

        let reaction = match self.api.fetch_room(&target).await {
            Ok(snapshot) => self.reconciler.on_snapshot(snapshot),
            Err(ApiError::NotFound(code)) => self.reconciler.on_not_found(&code),
            Err(e) => {
                tracing::warn!("⚠️ Poll of {} failed, retrying next tick: {}", target, e);
                return Flow::Continue;
            }
        };

        self.react(reaction).await
    }

    async fn react(&mut self, reaction: Reaction) -> Flow {
        match reaction {
            Reaction::Render(snapshot) => self.publish(SyncUpdate::Rendered(snapshot)).await,

            Reaction::AutoJoin {
                snapshot,
                participant,
            } => {
                let code = snapshot.room_code.clone();
                let flow = self.publish(SyncUpdate::Rendered(snapshot)).await;
                if flow == Flow::Stop {
                    return flow;
                }
                // Outcome is ignored; the next poll shows whether the seat was taken
                if let Err(e) = self.api.join_room(&code, participant).await {
                    tracing::debug!("Auto-join of {} as {} failed: {}", code, participant, e);
                }
                flow
            }

            Reaction::Forward { from, to } => {
                match self.publish(SyncUpdate::Forwarded { from, to }).await {
                    Flow::Stop => Flow::Stop,
                    _ => Flow::Retarget,
                }
            }

            Reaction::Stale => Flow::Continue,

            Reaction::RoomGone(code) => {
                let _ = self.publish(SyncUpdate::RoomGone(code)).await;
                Flow::Stop
            }
        }
    }

    async fn publish(&self, update: SyncUpdate) -> Flow {
        match self.updates.send(update).await {
            Ok(()) => Flow::Continue,
            Err(_) => {
                tracing::debug!("View dropped its update stream");
                Flow::Stop
            }
        }
    }

    async fn perform(&mut self, request: ActionRequest) {
        let ActionRequest { action, reply } = request;
        let result = self.dispatch(action).await;

        if let Err(e) = &result {
            tracing::warn!("❌ {:?} in {} failed: {}", action, self.reconciler.target(), e);
        }
        // The caller may have given up waiting
        let _ = reply.send(result);
    }

    async fn dispatch(&self, action: LocalAction) -> Result<RoomEvent> {
        let identity: ParticipantId = self.reconciler.identity().ok_or(SyncError::MissingIdentity)?;
        let code = self.reconciler.target();

        let event = match action {
            LocalAction::Join => self.api.join_room(code, identity).await?,
            LocalAction::Move { row, col } => self.api.make_move(code, identity, row, col).await?,
            LocalAction::Leave => self.api.leave_room(code, identity).await?,
            LocalAction::RequestRematch => self.api.request_rematch(code, identity).await?,
        };

        tracing::debug!("✅ {:?} in {} accepted", action, code);
        Ok(event)
    }
}
