//! UI layer: Axum routes, WebSocket connection handling and server lifecycle.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
