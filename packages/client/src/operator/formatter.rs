//! Message formatting utilities for the operator console.

use marionette_server::{
    domain::{Command, CommandPayload},
    infrastructure::dto::websocket::{ChatMessageDto, SessionDto, SharedStateDto},
};
use marionette_shared::time::format_clock_time;

use super::console::Target;

const PREVIEW_CHARS: usize = 20;

pub const HELP: &str = "\nCommands:\n  users                     list connected sessions\n  state                     show chat flag and effects\n  refresh                   re-request the shared state\n  chat on|off               enable or disable chat\n  say <text>                admin chat line (opens chat everywhere)\n  [@target,...] <kind> [arg] issue a command (target: all, id prefix or name)\n  help                      show this help\n  quit                      exit\nKinds: matrix invert glitch rotate freeze [on|off], unfreeze, reset, kick, reload, open_chat,\n       sound|image|video|redirect <url>, tts|alert <text>\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl LogLevel {
    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => ">",
            LogLevel::Success => "✓",
            LogLevel::Error => "✗",
        }
    }
}

/// Message formatter for operator display
pub struct OperatorFormatter;

impl OperatorFormatter {
    /// Format one console log line, stamped with local clock time
    pub fn format_log(level: LogLevel, message: &str, at_millis: i64) -> String {
        format!(
            "[{}] {} {}",
            format_clock_time(at_millis),
            level.prefix(),
            message
        )
    }

    /// Summary of an issued command, e.g. `MATRIX [ENABLED] → ALL USERS`
    pub fn format_issue(command: &Command, targets: &[Target]) -> String {
        let detail = match command.payload() {
            CommandPayload::Bool(true) => " [ENABLED]".to_string(),
            CommandPayload::Bool(false) => " [DISABLED]".to_string(),
            CommandPayload::Text(text) if !text.is_empty() => {
                let preview: String = text.chars().take(PREVIEW_CHARS).collect();
                let ellipsis = if text.chars().count() > PREVIEW_CHARS {
                    "..."
                } else {
                    ""
                };
                format!(" \"{}{}\"", preview, ellipsis)
            }
            _ => String::new(),
        };
        format!(
            "{}{} → {}",
            command.kind().as_str().to_uppercase(),
            detail,
            targets
                .iter()
                .map(Target::label)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }

    /// Presence table, marking the console's own session with "(me)"
    pub fn format_users(sessions: &[SessionDto], current_session_id: &str) -> String {
        if sessions.is_empty() {
            return "(No sessions)\n".to_string();
        }
        let mut output = format!("{} session(s):\n", sessions.len());
        for session in sessions {
            let short_id: String = session.id.chars().take(8).collect();
            let me_suffix = if session.id == current_session_id {
                " (me)"
            } else {
                ""
            };
            output.push_str(&format!(
                "  {}  {}{}  {} [{}] {}{}\n",
                short_id,
                session.name,
                me_suffix,
                session.page,
                session.activity,
                session.device,
                session
                    .poster
                    .as_deref()
                    .map(|p| format!(" poster={}", p))
                    .unwrap_or_default()
            ));
        }
        output
    }

    pub fn format_state(state: &SharedStateDto) -> String {
        let flag = |on: bool| if on { "ON" } else { "off" };
        format!(
            "Chat: {}\nEffects: matrix={} invert={} glitch={} rotate={} freeze={}\n",
            flag(state.chat),
            flag(state.effects.matrix),
            flag(state.effects.invert),
            flag(state.effects.glitch),
            flag(state.effects.rotate),
            flag(state.effects.freeze)
        )
    }

    pub fn format_chat_message(message: &ChatMessageDto) -> String {
        format!(
            "[{}] {}{}: {}",
            format_clock_time(message.sent_at),
            if message.is_admin { "★ " } else { "" },
            message.sender_name,
            message.text
        )
    }
}
