//! Presence Broadcaster: pushes full registry / state snapshots.

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, SessionId, SessionRepository, SharedState},
    infrastructure::dto::websocket::{ServerMessage, SessionDto},
};

/// Fans full snapshots out to every registered session
///
/// Snapshots are never diffs: a late joiner converges from a single frame.
pub struct PresenceBroadcaster {
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl PresenceBroadcaster {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            sessions,
            message_pusher,
        }
    }

    /// Send the current presence snapshot to every session
    pub async fn broadcast_presence(&self) {
        let message = self.presence_message().await;
        self.broadcast(&message).await;
    }

    /// Send a shared-state snapshot to every session
    pub async fn broadcast_state(&self, state: SharedState) {
        self.broadcast(&ServerMessage::StateSnapshot(state.into()))
            .await;
    }

    pub async fn broadcast_chat_status(&self, enabled: bool) {
        self.broadcast(&ServerMessage::ChatStatus { enabled }).await;
    }

    /// Send `message` to every registered session
    pub async fn broadcast(&self, message: &ServerMessage) {
        let Some(json) = encode(message) else {
            return;
        };
        let targets: Vec<SessionId> = self
            .sessions
            .snapshot()
            .await
            .into_iter()
            .map(|s| s.id)
            .collect();
        if targets.is_empty() {
            return;
        }
        if let Err(e) = self.message_pusher.broadcast(targets, &json).await {
            tracing::warn!("Broadcast failed: {}", e);
        }
    }

    /// Send `message` to one session; an absent session is silently skipped
    pub async fn push_to(&self, session_id: &SessionId, message: &ServerMessage) -> bool {
        let Some(json) = encode(message) else {
            return false;
        };
        match self.message_pusher.push_to(session_id, &json).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Dropped message for '{}': {}", session_id, e);
                false
            }
        }
    }

    /// Send the shared state and presence snapshot to one session
    pub async fn push_snapshots(&self, session_id: &SessionId, state: SharedState) {
        self.push_to(session_id, &ServerMessage::StateSnapshot(state.into()))
            .await;
        let presence = self.presence_message().await;
        self.push_to(session_id, &presence).await;
    }

    async fn presence_message(&self) -> ServerMessage {
        let sessions: Vec<SessionDto> = self
            .sessions
            .snapshot()
            .await
            .into_iter()
            .map(SessionDto::from)
            .collect();
        ServerMessage::PresenceSnapshot { sessions }
    }
}

fn encode(message: &ServerMessage) -> Option<String> {
    match message.to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize server message: {}", e);
            None
        }
    }
}
