//! UseCase: プレゼンス更新（識別・アクティビティ報告）

use std::sync::Arc;

use crate::domain::{Session, SessionId, SessionPatch, SessionRepository};

use super::{EventGate, PresenceBroadcaster};

/// プレゼンス更新のユースケース
pub struct UpdatePresenceUseCase {
    sessions: Arc<dyn SessionRepository>,
    broadcaster: Arc<PresenceBroadcaster>,
    gate: Arc<EventGate>,
}

impl UpdatePresenceUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        broadcaster: Arc<PresenceBroadcaster>,
        gate: Arc<EventGate>,
    ) -> Self {
        Self {
            sessions,
            broadcaster,
            gate,
        }
    }

    /// Merge `patch` into the session and rebroadcast presence
    ///
    /// An unknown session id is a silent no-op.
    pub async fn execute(&self, session_id: &SessionId, patch: SessionPatch) -> Option<Session> {
        let _gate = self.gate.enter().await;

        let updated = self.sessions.update(session_id, patch).await?;
        tracing::debug!(
            "Presence of '{}' updated: {} @ {} ({})",
            session_id,
            updated.display_name.as_str(),
            updated.current_page,
            updated.activity_label
        );
        self.broadcaster.broadcast_presence().await;
        Some(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::dto::websocket::ServerMessage,
        usecase::test_support::{Harness, drain, session_id},
    };

    fn usecase(harness: &Harness) -> UpdatePresenceUseCase {
        UpdatePresenceUseCase::new(
            harness.sessions.clone(),
            harness.broadcaster.clone(),
            harness.gate.clone(),
        )
    }

    #[tokio::test]
    async fn test_identity_report_updates_presence() {
        // テスト項目: 識別報告でプレゼンスの名前が更新され、全員に再送される
        // given (前提条件):
        let harness = Harness::new();
        let mut rx_a = harness.connect("a").await;
        let mut rx_b = harness.connect("b").await;
        drain(&mut rx_a);

        // when (操作):
        let updated = usecase(&harness)
            .execute(&session_id("a"), SessionPatch::identity(Some("Fox".into())))
            .await;

        // then (期待する結果):
        assert_eq!(updated.unwrap().display_name.as_str(), "Fox");
        for rx in [&mut rx_a, &mut rx_b] {
            let frames = drain(rx);
            let Some(ServerMessage::PresenceSnapshot { sessions }) = frames.last() else {
                panic!("expected presence snapshot");
            };
            assert_eq!(sessions[0].name, "Fox");
        }
    }

    #[tokio::test]
    async fn test_activity_report_merges_fields() {
        // テスト項目: アクティビティ報告は指定フィールドのみをマージする
        // given (前提条件):
        let harness = Harness::new();
        let _rx = harness.connect("a").await;
        let patch = SessionPatch {
            current_page: Some("/movie/603".to_string()),
            activity_label: Some("Watching".to_string()),
            ..SessionPatch::default()
        };

        // when (操作):
        let updated = usecase(&harness).execute(&session_id("a"), patch).await.unwrap();

        // then (期待する結果):
        assert_eq!(updated.current_page, "/movie/603");
        assert_eq!(updated.activity_label, "Watching");
        assert_eq!(updated.device_label, "Unknown");
    }

    #[tokio::test]
    async fn test_update_unknown_session_is_silent() {
        // テスト項目: 未登録 ID の更新は何もせず、ブロードキャストもしない
        // given (前提条件):
        let harness = Harness::new();
        let mut rx_a = harness.connect("a").await;

        // when (操作):
        let result = usecase(&harness)
            .execute(&session_id("ghost"), SessionPatch::identity(None))
            .await;

        // then (期待する結果):
        assert!(result.is_none());
        assert!(drain(&mut rx_a).is_empty());
    }
}
