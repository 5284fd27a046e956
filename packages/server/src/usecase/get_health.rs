//! UseCase: ヘルスチェック・プレゼンス参照（読み取り専用）

use std::sync::Arc;

use crate::domain::{Session, SessionRepository, SharedState, SharedStateRepository};

/// Liveness summary of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub users: usize,
    pub state: SharedState,
}

/// ヘルスチェックのユースケース
pub struct GetHealthUseCase {
    sessions: Arc<dyn SessionRepository>,
    shared_state: Arc<dyn SharedStateRepository>,
}

impl GetHealthUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        shared_state: Arc<dyn SharedStateRepository>,
    ) -> Self {
        Self {
            sessions,
            shared_state,
        }
    }

    pub async fn execute(&self) -> Health {
        Health {
            users: self.sessions.count().await,
            state: self.shared_state.snapshot().await,
        }
    }
}

/// プレゼンス一覧参照のユースケース
pub struct ListSessionsUseCase {
    sessions: Arc<dyn SessionRepository>,
}

impl ListSessionsUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn execute(&self) -> Vec<Session> {
        self.sessions.snapshot().await
    }
}
