//! UseCase: コマンドルーティング（Command Router）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteCommandUseCase::route() / execute() メソッド
//! - 永続エフェクトの共有状態への反映と、配送先の解決
//!
//! ### なぜこのテストが必要か
//! - 永続化の有無は配送先ではなくコマンドの種類だけで決まる
//!   （宛先指定の `matrix` でも共有フラグは変わる）
//! - 不在の宛先・未知の種類は黙って破棄されなければならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：全体配信、宛先指定配信、reset
//! - エッジケース：不在の宛先、接続ゼロでの全体配信、unfreeze、未知の種類

use std::sync::Arc;

use crate::{
    domain::{
        Command, CommandPayload, MessagePusher, RoutedCommand, SessionId, SessionRepository,
        SharedStateRepository, TargetSelector,
    },
    infrastructure::dto::websocket::ServerMessage,
};

use super::{EventGate, PresenceBroadcaster, error::RouteError};

/// コマンドルーティングのユースケース
pub struct RouteCommandUseCase {
    sessions: Arc<dyn SessionRepository>,
    shared_state: Arc<dyn SharedStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    broadcaster: Arc<PresenceBroadcaster>,
    gate: Arc<EventGate>,
}

impl RouteCommandUseCase {
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

    /// Check a raw `{target, kind, payload}` triple and route it
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - the sessions the command was handed to
    /// * `Err(RouteError)` - the command was dropped without any state change
    pub async fn execute(
        &self,
        target: String,
        kind: &str,
        payload: CommandPayload,
    ) -> Result<Vec<SessionId>, RouteError> {
        let command = Command::from_parts(kind, payload)?;
        let target = TargetSelector::try_from(target)?;
        Ok(self.route(RoutedCommand { target, command }).await)
    }

    /// Persist (if the kind is persistent), resolve targets and deliver
    pub async fn route(&self, routed: RoutedCommand) -> Vec<SessionId> {
        let _gate = self.gate.enter().await;
        let RoutedCommand { target, command } = routed;
        tracing::info!(
            "Routing {} {} -> {}",
            command.kind(),
            command.payload(),
            target
        );

        // Persistence is keyed on the kind only. A targeted toggle still
        // flips the shared flag while only its target is told to animate.
        if let Some((effect, enabled)) = command.persistent_effect() {
            let state = self.shared_state.set_effect(effect, enabled).await;
            self.broadcaster.broadcast_state(state).await;
        } else if command == Command::Reset {
            let state = self.shared_state.reset_effects().await;
            self.broadcaster.broadcast_state(state).await;
        }

        let message = ServerMessage::from(&command);
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize command: {}", e);
                return Vec::new();
            }
        };

        match target {
            TargetSelector::All => {
                let targets: Vec<SessionId> = self
                    .sessions
                    .snapshot()
                    .await
                    .into_iter()
                    .map(|s| s.id)
                    .collect();
                if !targets.is_empty()
                    && let Err(e) = self.message_pusher.broadcast(targets.clone(), &json).await
                {
                    tracing::warn!("Command broadcast failed: {}", e);
                }
                targets
            }
            TargetSelector::Session(id) => {
                if !self.sessions.contains(&id).await {
                    tracing::debug!("Target '{}' is not connected, dropping {}", id, command.kind());
                    return Vec::new();
                }
                match self.message_pusher.push_to(&id, &json).await {
                    Ok(()) => vec![id],
                    Err(e) => {
                        tracing::debug!("Dropped command for '{}': {}", id, e);
                        Vec::new()
                    }
                }
            }
        }
    }
}
