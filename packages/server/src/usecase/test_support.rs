//! Shared fixtures for use case tests.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{MessagePusher, SessionId},
    infrastructure::{
        dto::websocket::ServerMessage,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemorySessionRepository, InMemorySharedStateRepository},
    },
};

use super::{ConnectSessionUseCase, EventGate, PresenceBroadcaster};

pub struct Harness {
    pub sessions: Arc<InMemorySessionRepository>,
    pub state: Arc<InMemorySharedStateRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub broadcaster: Arc<PresenceBroadcaster>,
    pub gate: Arc<EventGate>,
}

impl Harness {
    pub fn new() -> Self {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let state = Arc::new(InMemorySharedStateRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let broadcaster = Arc::new(PresenceBroadcaster::new(sessions.clone(), pusher.clone()));
        Self {
            sessions,
            state,
            pusher,
            broadcaster,
            gate: Arc::new(EventGate::new()),
        }
    }

    pub fn connect_usecase(&self) -> ConnectSessionUseCase {
        ConnectSessionUseCase::new(
            self.sessions.clone(),
            self.state.clone(),
            self.pusher.clone(),
            self.broadcaster.clone(),
            self.gate.clone(),
        )
    }

    /// Connect a session through the real use case and drain its greeting frames
    pub async fn connect(&self, id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.connect_usecase().execute(session_id(id), tx).await;
        drain(&mut rx);
        rx
    }

    /// Attach a bare channel without registering a session
    pub async fn attach_channel(&self, id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(session_id(id), tx).await;
        rx
    }
}

pub fn session_id(value: &str) -> SessionId {
    SessionId::new(value.to_string()).unwrap()
}

/// Parse every frame currently queued on the channel
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut frames = Vec::new();
    while let Ok(json) = rx.try_recv() {
        frames.push(serde_json::from_str(&json).unwrap());
    }
    frames
}
