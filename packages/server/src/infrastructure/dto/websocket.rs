//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object whose `type` field names the event in
//! kebab-case; the remaining fields are camelCase.

use serde::{Deserialize, Serialize};

/// Frames sent by viewers and the operator console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Identity report
    SetIdentity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Activity report; absent fields keep their current value
    UpdateActivity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        activity: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        poster: Option<String>,
    },
    /// Re-request the full shared state and presence snapshot
    RequestSnapshot,
    ChatSend {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        text: String,
        #[serde(default)]
        is_admin: bool,
    },
    /// Operator: enable or disable chat
    ToggleChat { enabled: bool },
    /// Operator: route one command
    IssueCommand {
        target: String,
        kind: String,
        #[serde(default)]
        payload: serde_json::Value,
    },
}

/// Frames pushed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// First frame on every connection
    Connected { session_id: String },
    PresenceSnapshot { sessions: Vec<SessionDto> },
    StateSnapshot(SharedStateDto),
    ChatStatus { enabled: bool },
    ExecuteCommand {
        kind: String,
        #[serde(default)]
        payload: serde_json::Value,
    },
    ChatMessage(ChatMessageDto),
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ClientMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Presence entry of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: String,
    pub name: String,
    pub page: String,
    pub activity: String,
    pub device: String,
    pub poster: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectsDto {
    pub matrix: bool,
    pub invert: bool,
    pub glitch: bool,
    pub rotate: bool,
    pub freeze: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedStateDto {
    pub chat: bool,
    pub effects: EffectsDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub sender_name: String,
    pub sender_id: String,
    pub text: String,
    pub is_admin: bool,
    pub sent_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_issue_command_frame() {
        // テスト項目: issue-command フレームをパースできる
        // given (前提条件):
        let text = r#"{"type":"issue-command","target":"all","kind":"matrix","payload":true}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            msg,
            ClientMessage::IssueCommand {
                target: "all".to_string(),
                kind: "matrix".to_string(),
                payload: json!(true),
            }
        );
    }

    #[test]
    fn test_parse_frames_with_missing_optional_fields() {
        // テスト項目: 省略可能なフィールドが無いフレームもパースできる
        // given (前提条件):
        let identity = r#"{"type":"set-identity"}"#;
        let command = r#"{"type":"issue-command","target":"all","kind":"reset"}"#;
        let chat = r#"{"type":"chat-send","text":"hi"}"#;
        let snapshot = r#"{"type":"request-snapshot"}"#;

        // when (操作):
        let identity: ClientMessage = serde_json::from_str(identity).unwrap();
        let command: ClientMessage = serde_json::from_str(command).unwrap();
        let chat: ClientMessage = serde_json::from_str(chat).unwrap();
        let snapshot: ClientMessage = serde_json::from_str(snapshot).unwrap();

        // then (期待する結果):
        assert_eq!(identity, ClientMessage::SetIdentity { name: None });
        assert!(matches!(
            command,
            ClientMessage::IssueCommand { payload: serde_json::Value::Null, .. }
        ));
        assert_eq!(
            chat,
            ClientMessage::ChatSend {
                from: None,
                text: "hi".to_string(),
                is_admin: false
            }
        );
        assert_eq!(snapshot, ClientMessage::RequestSnapshot);
    }

    #[test]
    fn test_server_frames_use_kebab_type_and_camel_fields() {
        // テスト項目: サーバーフレームは kebab-case の type と camelCase のフィールドを持つ
        // given (前提条件):
        let state = ServerMessage::StateSnapshot(SharedStateDto {
            chat: true,
            effects: EffectsDto {
                matrix: true,
                ..EffectsDto::default()
            },
        });
        let connected = ServerMessage::Connected {
            session_id: "abc".to_string(),
        };

        // when (操作):
        let state_json: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
        let connected_json: serde_json::Value =
            serde_json::from_str(&connected.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(
            state_json,
            json!({
                "type": "state-snapshot",
                "chat": true,
                "effects": {"matrix": true, "invert": false, "glitch": false, "rotate": false, "freeze": false}
            })
        );
        assert_eq!(connected_json, json!({"type": "connected", "sessionId": "abc"}));
    }

    #[test]
    fn test_unknown_frame_type_is_rejected() {
        // テスト項目: 未知の type を持つフレームはパースエラーになる
        // given (前提条件):
        let text = r#"{"type":"self-destruct"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientMessage>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
