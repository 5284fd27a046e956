//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! Registry and shared-state operations never fail: an absent session is
//! always "nothing to do", so the traits return plain values instead of
//! `Result`.

use async_trait::async_trait;

use super::{EffectName, Session, SessionId, SessionPatch, SharedState};

/// Connection Registry
///
/// 接続中のセッションとプレゼンス情報の唯一の情報源。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a session with default presence
    ///
    /// Returns the record and whether it was newly created; re-registering
    /// an existing id returns the existing record untouched.
    async fn register(&self, id: SessionId) -> (Session, bool);

    /// Merge `patch` into the session; `None` if the id is unknown
    async fn update(&self, id: &SessionId, patch: SessionPatch) -> Option<Session>;

    /// Remove the session; `None` if the id is unknown
    async fn remove(&self, id: &SessionId) -> Option<Session>;

    /// All sessions in original connection order
    async fn snapshot(&self) -> Vec<Session>;

    async fn contains(&self, id: &SessionId) -> bool;

    async fn count(&self) -> usize;
}

/// Shared State Store
///
/// プロセス内に 1 つだけ存在するチャット・エフェクト状態。
/// Every mutator returns the full snapshot taken right after the write.
#[async_trait]
pub trait SharedStateRepository: Send + Sync {
    async fn set_chat_enabled(&self, enabled: bool) -> SharedState;

    async fn set_effect(&self, name: EffectName, enabled: bool) -> SharedState;

    /// Set all five effects to `false` in a single write
    async fn reset_effects(&self) -> SharedState;

    async fn snapshot(&self) -> SharedState;
}
