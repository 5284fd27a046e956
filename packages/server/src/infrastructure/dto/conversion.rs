//! Conversion logic between DTOs and domain entities.

use serde_json::Value;

use crate::domain::{ChatMessage, Command, CommandPayload, Effects, Session, SharedState};
use crate::infrastructure::dto::websocket::{
    ChatMessageDto, EffectsDto, ServerMessage, SessionDto, SharedStateDto,
};

// ========================================
// Command payload ⇔ JSON
// ========================================

/// Scalar JSON payloads map onto [`CommandPayload`]; numbers, arrays and
/// objects are treated as absent and rejected by kinds that need a value.
pub fn payload_from_json(value: Value) -> CommandPayload {
    match value {
        Value::Bool(b) => CommandPayload::Bool(b),
        Value::String(s) => CommandPayload::Text(s),
        _ => CommandPayload::None,
    }
}

pub fn payload_to_json(payload: CommandPayload) -> Value {
    match payload {
        CommandPayload::Bool(b) => Value::Bool(b),
        CommandPayload::Text(s) => Value::String(s),
        CommandPayload::None => Value::Null,
    }
}

impl From<&Command> for ServerMessage {
    fn from(command: &Command) -> Self {
        ServerMessage::ExecuteCommand {
            kind: command.kind().as_str().to_string(),
            payload: payload_to_json(command.payload()),
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            id: session.id.into_string(),
            name: session.display_name.into_string(),
            page: session.current_page,
            activity: session.activity_label,
            device: session.device_label,
            poster: session.poster_image,
        }
    }
}

impl From<Effects> for EffectsDto {
    fn from(effects: Effects) -> Self {
        Self {
            matrix: effects.matrix,
            invert: effects.invert,
            glitch: effects.glitch,
            rotate: effects.rotate,
            freeze: effects.freeze,
        }
    }
}

impl From<SharedState> for SharedStateDto {
    fn from(state: SharedState) -> Self {
        Self {
            chat: state.chat_enabled,
            effects: state.effects.into(),
        }
    }
}

impl From<ChatMessage> for ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender_name: message.sender_name.into_string(),
            sender_id: message.sender_id.into_string(),
            text: message.text,
            is_admin: message.is_admin,
            sent_at: message.sent_at,
        }
    }
}

// ========================================
// DTO → Domain Entity
// ========================================

impl From<EffectsDto> for Effects {
    fn from(dto: EffectsDto) -> Self {
        Self {
            matrix: dto.matrix,
            invert: dto.invert,
            glitch: dto.glitch,
            rotate: dto.rotate,
            freeze: dto.freeze,
        }
    }
}

impl From<SharedStateDto> for SharedState {
    fn from(dto: SharedStateDto) -> Self {
        Self {
            chat_enabled: dto.chat,
            effects: dto.effects.into(),
        }
    }
}
