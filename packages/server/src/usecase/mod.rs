//! UseCase layer: one struct per inbound event, each depending only on the
//! domain ports.

mod broadcaster;
mod connect_session;
mod disconnect_session;
mod error;
mod gate;
mod get_health;
mod relay_chat;
mod request_snapshot;
mod route_command;
mod toggle_chat;
mod update_presence;

#[cfg(test)]
mod test_support;

pub use broadcaster::PresenceBroadcaster;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::RouteError;
pub use gate::EventGate;
pub use get_health::{GetHealthUseCase, Health, ListSessionsUseCase};
pub use relay_chat::{ChatDraft, RelayChatUseCase};
pub use request_snapshot::RequestSnapshotUseCase;
pub use route_command::RouteCommandUseCase;
pub use toggle_chat::ToggleChatUseCase;
pub use update_presence::UpdatePresenceUseCase;
