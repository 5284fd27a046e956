//! InMemory SharedState Repository 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{EffectName, Effects, SharedState, SharedStateRepository};

/// インメモリ SharedState Repository 実装
///
/// 各書き込みは単一フィールド（またはエフェクト全体のリセット）で、
/// 書き込み直後のスナップショットを同じロックの中で取得して返す。
#[derive(Default)]
pub struct InMemorySharedStateRepository {
    state: Mutex<SharedState>,
}

impl InMemorySharedStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SharedStateRepository for InMemorySharedStateRepository {
    async fn set_chat_enabled(&self, enabled: bool) -> SharedState {
        let mut state = self.state.lock().await;
        state.chat_enabled = enabled;
        *state
    }

    async fn set_effect(&self, name: EffectName, enabled: bool) -> SharedState {
        let mut state = self.state.lock().await;
        state.effects.set(name, enabled);
        *state
    }

    async fn reset_effects(&self) -> SharedState {
        let mut state = self.state.lock().await;
        state.effects = Effects::default();
        *state
    }

    async fn snapshot(&self) -> SharedState {
        *self.state.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_state_is_all_off() {
        // テスト項目: 初期状態はチャット無効・全エフェクト無効
        // given (前提条件):
        let repo = InMemorySharedStateRepository::new();

        // when (操作):
        let state = repo.snapshot().await;

        // then (期待する結果):
        assert_eq!(state, SharedState::default());
        assert!(!state.chat_enabled);
        assert!(!state.effects.any_active());
    }

    #[tokio::test]
    async fn test_set_effect_twice_equals_once() {
        // テスト項目: 同じ setEffect を 2 回適用しても 1 回と同じスナップショットになる
        // given (前提条件):
        let once = InMemorySharedStateRepository::new();
        let twice = InMemorySharedStateRepository::new();

        // when (操作):
        once.set_effect(EffectName::Invert, true).await;
        twice.set_effect(EffectName::Invert, true).await;
        twice.set_effect(EffectName::Invert, true).await;

        // then (期待する結果):
        assert_eq!(once.snapshot().await, twice.snapshot().await);
    }

    #[tokio::test]
    async fn test_reset_effects_always_yields_all_false() {
        // テスト項目: resetEffects は直前の状態に関わらず全エフェクトを false にする
        // given (前提条件):
        let repo = InMemorySharedStateRepository::new();
        for name in EffectName::ALL {
            repo.set_effect(name, true).await;
        }
        repo.set_chat_enabled(true).await;

        // when (操作):
        let state = repo.reset_effects().await;

        // then (期待する結果):
        assert_eq!(state.effects, Effects::default());
        assert!(state.chat_enabled, "reset must not touch the chat flag");
    }

    #[tokio::test]
    async fn test_mutators_return_post_write_snapshot() {
        // テスト項目: 書き込み系メソッドは書き込み直後のスナップショットを返す
        // given (前提条件):
        let repo = InMemorySharedStateRepository::new();

        // when (操作):
        let after_chat = repo.set_chat_enabled(true).await;
        let after_effect = repo.set_effect(EffectName::Rotate, true).await;

        // then (期待する結果):
        assert!(after_chat.chat_enabled);
        assert!(after_effect.chat_enabled);
        assert!(after_effect.effects.rotate);
        assert_eq!(after_effect, repo.snapshot().await);
    }
}
