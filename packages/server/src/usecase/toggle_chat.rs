//! UseCase: チャットの有効・無効切り替え（オペレーター操作）

use std::sync::Arc;

use crate::domain::{SharedState, SharedStateRepository};

use super::{EventGate, PresenceBroadcaster};

/// チャット切り替えのユースケース
pub struct ToggleChatUseCase {
    shared_state: Arc<dyn SharedStateRepository>,
    broadcaster: Arc<PresenceBroadcaster>,
    gate: Arc<EventGate>,
}

impl ToggleChatUseCase {
    pub fn new(
        shared_state: Arc<dyn SharedStateRepository>,
        broadcaster: Arc<PresenceBroadcaster>,
        gate: Arc<EventGate>,
    ) -> Self {
        Self {
            shared_state,
            broadcaster,
            gate,
        }
    }

    /// Set the chat flag, then broadcast `chat-status` and the full state
    pub async fn execute(&self, enabled: bool) -> SharedState {
        let _gate = self.gate.enter().await;

        let state = self.shared_state.set_chat_enabled(enabled).await;
        tracing::info!("Chat {}", if enabled { "enabled" } else { "disabled" });
        self.broadcaster.broadcast_chat_status(enabled).await;
        self.broadcaster.broadcast_state(state).await;
        state
    }
}
