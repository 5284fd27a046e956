//! Serialization of inbound events.

use tokio::sync::{Mutex, MutexGuard};

/// Process-wide gate that lets exactly one mutating event run at a time
///
/// Every use case that writes the registry or the shared state holds the
/// gate for its whole execution, including the resulting broadcasts, so
/// snapshots go out in the same order as the writes that produced them.
#[derive(Default)]
pub struct EventGate {
    lock: Mutex<()>,
}

impl EventGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
