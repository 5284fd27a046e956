//! UseCase: セッション接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - レジストリへの登録と、初回スナップショットの送信順序
//!
//! ### なぜこのテストが必要か
//! - 新規接続（再接続を含む）は履歴の再生ではなくスナップショットで収束する
//! - 既存の全セッションにプレゼンスが再送されることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初のセッション、2 人目のセッション
//! - エッジケース：同じ ID での再登録（冪等）

use std::sync::Arc;

use crate::{
    domain::{
        MessagePusher, PusherChannel, Session, SessionId, SessionRepository,
        SharedStateRepository,
    },
    infrastructure::dto::websocket::ServerMessage,
};

use super::{EventGate, PresenceBroadcaster};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    sessions: Arc<dyn SessionRepository>,
    shared_state: Arc<dyn SharedStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    broadcaster: Arc<PresenceBroadcaster>,
    gate: Arc<EventGate>,
}

impl ConnectSessionUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        shared_state: Arc<dyn SharedStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcaster: Arc<PresenceBroadcaster>,
        gate: Arc<EventGate>,
    ) -> Self {
        Self {
            sessions,
            shared_state,
            message_pusher,
            broadcaster,
            gate,
        }
    }

    /// セッション接続を実行
    ///
    /// 1. レジストリにデフォルトのレコードを作成
    /// 2. 送信チャンネルを MessagePusher に登録
    /// 3. 新規セッションに `connected`、チャット状態、共有状態を送信
    /// 4. 全セッションにプレゼンスをブロードキャスト（新規作成時のみ）
    pub async fn execute(&self, session_id: SessionId, sender: PusherChannel) -> Session {
        let _gate = self.gate.enter().await;

        let (session, created) = self.sessions.register(session_id.clone()).await;
        self.message_pusher
            .register_client(session_id.clone(), sender)
            .await;

        let state = self.shared_state.snapshot().await;
        self.broadcaster
            .push_to(
                &session_id,
                &ServerMessage::Connected {
                    session_id: session_id.to_string(),
                },
            )
            .await;
        self.broadcaster
            .push_to(
                &session_id,
                &ServerMessage::ChatStatus {
                    enabled: state.chat_enabled,
                },
            )
            .await;
        self.broadcaster
            .push_to(&session_id, &ServerMessage::StateSnapshot(state.into()))
            .await;

        if created {
            self.broadcaster.broadcast_presence().await;
        }

        tracing::info!("Session '{}' connected", session_id);
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::EffectName,
        infrastructure::dto::websocket::{EffectsDto, SharedStateDto},
        usecase::test_support::{Harness, drain, session_id},
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_first_session_receives_greeting_in_order() {
        // テスト項目: 新規セッションは connected → chat-status → state-snapshot → presence の順に受信する
        // given (前提条件):
        let harness = Harness::new();
        let usecase = harness.connect_usecase();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let session = usecase.execute(session_id("a"), tx).await;

        // then (期待する結果):
        assert_eq!(session.display_name.as_str(), "Anonymous");
        assert_eq!(harness.sessions.count().await, 1);

        let frames = drain(&mut rx);
        assert_eq!(frames.len(), 4);
        assert_eq!(
            frames[0],
            ServerMessage::Connected {
                session_id: "a".to_string()
            }
        );
        assert_eq!(frames[1], ServerMessage::ChatStatus { enabled: false });
        assert_eq!(
            frames[2],
            ServerMessage::StateSnapshot(SharedStateDto::default())
        );
        let ServerMessage::PresenceSnapshot { sessions } = &frames[3] else {
            panic!("expected presence snapshot, got {:?}", frames[3]);
        };
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].name, "Anonymous");
    }

    #[tokio::test]
    async fn test_late_joiner_receives_current_state() {
        // テスト項目: 後から接続したセッションは現在の共有状態をスナップショットで受け取る
        // given (前提条件):
        let harness = Harness::new();
        harness.state.set_effect(EffectName::Matrix, true).await;
        harness.state.set_chat_enabled(true).await;

        // when (操作):
        let (tx, mut rx) = mpsc::unbounded_channel();
        harness.connect_usecase().execute(session_id("late"), tx).await;

        // then (期待する結果):
        let frames = drain(&mut rx);
        assert_eq!(frames[1], ServerMessage::ChatStatus { enabled: true });
        assert_eq!(
            frames[2],
            ServerMessage::StateSnapshot(SharedStateDto {
                chat: true,
                effects: EffectsDto {
                    matrix: true,
                    ..EffectsDto::default()
                },
            })
        );
    }

    #[tokio::test]
    async fn test_existing_sessions_receive_presence_broadcast() {
        // テスト項目: 既存セッションに新しいプレゼンス一覧が接続順で届く
        // given (前提条件):
        let harness = Harness::new();
        let mut rx_a = harness.connect("a").await;

        // when (操作):
        let _rx_b = harness.connect("b").await;

        // then (期待する結果):
        let frames = drain(&mut rx_a);
        assert_eq!(frames.len(), 1);
        let ServerMessage::PresenceSnapshot { sessions } = &frames[0] else {
            panic!("expected presence snapshot");
        };
        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_reregister_does_not_rebroadcast_presence() {
        // テスト項目: 同じ ID の再登録は既存レコードを返し、プレゼンスを再送しない
        // given (前提条件):
        let harness = Harness::new();
        let mut rx_a = harness.connect("a").await;

        // when (操作):
        let (tx, _rx) = mpsc::unbounded_channel();
        harness.connect_usecase().execute(session_id("a"), tx).await;

        // then (期待する結果):
        assert_eq!(harness.sessions.count().await, 1);
        assert!(drain(&mut rx_a).is_empty());
    }
}
