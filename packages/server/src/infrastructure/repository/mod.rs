//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリを使った実装（状態は再起動で失われる）

pub mod inmemory;

pub use inmemory::{InMemorySessionRepository, InMemorySharedStateRepository};
