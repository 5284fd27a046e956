//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! 接続順を保つため `Vec` をインメモリ DB として使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Session, SessionId, SessionPatch, SessionRepository};

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    /// 接続順に並んだセッション
    sessions: Mutex<Vec<Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(&self, id: SessionId) -> (Session, bool) {
        let mut sessions = self.sessions.lock().await;
        if let Some(existing) = sessions.iter().find(|s| s.id == id) {
            return (existing.clone(), false);
        }

        let session = Session::new(id);
        sessions.push(session.clone());
        (session, true)
    }

    async fn update(&self, id: &SessionId, patch: SessionPatch) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.iter_mut().find(|s| &s.id == id)?;
        session.apply(patch);
        Some(session.clone())
    }

    async fn remove(&self, id: &SessionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let index = sessions.iter().position(|s| &s.id == id)?;
        Some(sessions.remove(index))
    }

    async fn snapshot(&self) -> Vec<Session> {
        self.sessions.lock().await.clone()
    }

    async fn contains(&self, id: &SessionId) -> bool {
        self.sessions.lock().await.iter().any(|s| &s.id == id)
    }

    async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
