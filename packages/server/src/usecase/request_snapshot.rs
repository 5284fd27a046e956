//! UseCase: スナップショット再要求

use std::sync::Arc;

use crate::domain::{SessionId, SharedStateRepository};

use super::{EventGate, PresenceBroadcaster};

/// 共有状態とプレゼンスを要求元のセッションにだけ再送するユースケース
pub struct RequestSnapshotUseCase {
    shared_state: Arc<dyn SharedStateRepository>,
    broadcaster: Arc<PresenceBroadcaster>,
    gate: Arc<EventGate>,
}

impl RequestSnapshotUseCase {
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

    pub async fn execute(&self, session_id: &SessionId) {
        let _gate = self.gate.enter().await;

        let state = self.shared_state.snapshot().await;
        self.broadcaster.push_snapshots(session_id, state).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::EffectName,
        infrastructure::dto::websocket::ServerMessage,
        usecase::test_support::{Harness, drain, session_id},
    };

    #[tokio::test]
    async fn test_snapshot_goes_only_to_requester() {
        // テスト項目: 要求元にだけ状態とプレゼンスのスナップショットが届く
        // given (前提条件):
        let harness = Harness::new();
        let mut rx_a = harness.connect("a").await;
        let mut rx_b = harness.connect("b").await;
        drain(&mut rx_a);
        harness.state.set_effect(EffectName::Glitch, true).await;
        let usecase = RequestSnapshotUseCase::new(
            harness.state.clone(),
            harness.broadcaster.clone(),
            harness.gate.clone(),
        );

        // when (操作):
        usecase.execute(&session_id("b")).await;

        // then (期待する結果):
        assert!(drain(&mut rx_a).is_empty());
        let frames = drain(&mut rx_b);
        assert_eq!(frames.len(), 2);
        let ServerMessage::StateSnapshot(state) = &frames[0] else {
            panic!("expected state snapshot");
        };
        assert!(state.effects.glitch);
        assert!(matches!(
            &frames[1],
            ServerMessage::PresenceSnapshot { sessions } if sessions.len() == 2
        ));
    }
}
