//! UseCase: チャット中継
//!
//! Chat lines are relayed to every session and never stored. While chat is
//! disabled only operator (admin) lines are relayed.

use std::sync::Arc;

use marionette_shared::time::Clock;

use crate::{
    domain::{
        ChatMessage, DisplayName, SessionId, SessionRepository, SharedStateRepository,
    },
    infrastructure::dto::websocket::ServerMessage,
};

use super::{EventGate, PresenceBroadcaster};

/// Raw chat frame as received from a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDraft {
    pub from: Option<String>,
    pub text: String,
    pub is_admin: bool,
}

/// チャット中継のユースケース
pub struct RelayChatUseCase {
    sessions: Arc<dyn SessionRepository>,
    shared_state: Arc<dyn SharedStateRepository>,
    broadcaster: Arc<PresenceBroadcaster>,
    gate: Arc<EventGate>,
    clock: Arc<dyn Clock>,
}

impl RelayChatUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        shared_state: Arc<dyn SharedStateRepository>,
        broadcaster: Arc<PresenceBroadcaster>,
        gate: Arc<EventGate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            shared_state,
            broadcaster,
            gate,
            clock,
        }
    }

    /// Relay a chat line to every session
    ///
    /// The sender name is the explicit `from`, else the sender's registered
    /// display name, else "Anonymous". Returns `None` when the line is dropped
    /// (blank text, or chat disabled for a non-admin sender).
    pub async fn execute(&self, sender_id: &SessionId, draft: ChatDraft) -> Option<ChatMessage> {
        let _gate = self.gate.enter().await;

        if draft.text.trim().is_empty() {
            return None;
        }
        if !draft.is_admin && !self.shared_state.snapshot().await.chat_enabled {
            tracing::debug!("Chat disabled, dropping line from '{}'", sender_id);
            return None;
        }

        let registered_name = self
            .sessions
            .snapshot()
            .await
            .into_iter()
            .find(|s| &s.id == sender_id)
            .map(|s| s.display_name.into_string());
        let sender_name = DisplayName::new(
            draft
                .from
                .filter(|name| !name.trim().is_empty())
                .or(registered_name),
        );

        let message = ChatMessage {
            sender_name,
            sender_id: sender_id.clone(),
            text: draft.text,
            is_admin: draft.is_admin,
            sent_at: self.clock.now_millis(),
        };
        tracing::info!("[CHAT] {}: {}", message.sender_name.as_str(), message.text);

        self.broadcaster
            .broadcast(&ServerMessage::ChatMessage(message.clone().into()))
            .await;
        Some(message)
    }
}
