//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）のインターフェース。
//! UseCase 層はこの trait に依存し、WebSocket などの具体的な実装には依存しない。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, SessionId};

/// Outbound channel of one connection (serialized JSON frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Attach the outbound channel of a session
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel);

    /// Detach the outbound channel of a session
    async fn unregister_client(&self, session_id: &SessionId);

    /// Push to exactly one session
    async fn push_to(&self, session_id: &SessionId, content: &str)
    -> Result<(), MessagePushError>;

    /// Push to each target; unreachable targets are skipped, never fatal
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
