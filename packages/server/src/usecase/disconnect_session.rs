//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - レジストリからの削除と残りのセッションへのプレゼンス再送
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中セッションの切断
//! - エッジケース：最後のセッションの切断、未登録 ID の切断

use std::sync::Arc;

use crate::domain::{MessagePusher, Session, SessionId, SessionRepository};

use super::{EventGate, PresenceBroadcaster};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    broadcaster: Arc<PresenceBroadcaster>,
    gate: Arc<EventGate>,
}

impl DisconnectSessionUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcaster: Arc<PresenceBroadcaster>,
        gate: Arc<EventGate>,
    ) -> Self {
        Self {
            sessions,
            message_pusher,
            broadcaster,
            gate,
        }
    }

    /// セッション切断を実行
    ///
    /// # Returns
    ///
    /// 削除されたセッション。未登録の ID なら `None`（何もしない）
    pub async fn execute(&self, session_id: &SessionId) -> Option<Session> {
        let _gate = self.gate.enter().await;

        self.message_pusher.unregister_client(session_id).await;
        let removed = self.sessions.remove(session_id).await;
        if removed.is_some() {
            tracing::info!("Session '{}' disconnected", session_id);
            self.broadcaster.broadcast_presence().await;
        }
        removed
    }
}
