//! Domain layer: entities, value objects, commands and the ports the
//! use cases depend on.

pub mod command;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use command::{Command, CommandKind, CommandPayload, PayloadShape, RoutedCommand};
pub use entity::{ChatMessage, Effects, Session, SessionPatch, SharedState};
pub use error::{CommandError, DomainError, MessagePushError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{SessionRepository, SharedStateRepository};
pub use value_object::{
    ANONYMOUS_NAME, DisplayName, EffectName, SessionId, SessionIdFactory, TargetSelector,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
