//! Operator session: keeps the latest presence and state, turns console
//! lines into frames.

use marionette_server::{
    domain::Effects,
    infrastructure::dto::{
        conversion::payload_to_json,
        websocket::{ClientMessage, ServerMessage, SessionDto, SharedStateDto},
    },
};
use marionette_shared::time::now_millis;
use serde_json::Value;

use crate::{
    connection,
    error::ClientError,
    ui::{self, redisplay_prompt},
};

use super::{
    OperatorConfig,
    console::{ConsoleAction, parse_line},
    formatter::{HELP, LogLevel, OperatorFormatter},
};

/// Display name the console reports and signs admin chat with
pub const OPERATOR_NAME: &str = "ADMIN";

const PROMPT: &str = "operator";

/// Result of one console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleOutcome {
    Send {
        frames: Vec<ClientMessage>,
        log: String,
    },
    Print(String),
    Quit,
}

#[derive(Debug, Default)]
pub struct OperatorConsole {
    session_id: String,
    sessions: Vec<SessionDto>,
    state: SharedStateDto,
}

impl OperatorConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[SessionDto] {
        &self.sessions
    }

    pub fn state(&self) -> &SharedStateDto {
        &self.state
    }

    fn log(level: LogLevel, message: &str) -> String {
        OperatorFormatter::format_log(level, message, now_millis())
    }

    /// Record one server frame; returns a log line to show, if any
    pub fn handle_frame(&mut self, frame: ServerMessage) -> Option<String> {
        match frame {
            ServerMessage::Connected { session_id } => {
                let line = Self::log(
                    LogLevel::Info,
                    &format!("Connected as session {}", session_id),
                );
                self.session_id = session_id;
                Some(line)
            }
            ServerMessage::PresenceSnapshot { sessions } => {
                let line = Self::log(
                    LogLevel::Info,
                    &format!("{} session(s) online", sessions.len()),
                );
                self.sessions = sessions;
                Some(line)
            }
            ServerMessage::StateSnapshot(state) => {
                tracing::debug!("State snapshot: {:?}", state);
                self.state = state;
                None
            }
            ServerMessage::ChatStatus { enabled } => {
                self.state.chat = enabled;
                Some(Self::log(
                    LogLevel::Info,
                    &format!(
                        "Chat system {}",
                        if enabled { "enabled" } else { "disabled" }
                    ),
                ))
            }
            ServerMessage::ExecuteCommand { kind, .. } => {
                tracing::debug!("Own session received '{}'", kind);
                None
            }
            ServerMessage::ChatMessage(message) => {
                Some(OperatorFormatter::format_chat_message(&message))
            }
        }
    }

    /// Handle one console line
    pub fn handle_line(&mut self, line: &str) -> ConsoleOutcome {
        let effects = Effects::from(self.state.effects);
        let action = match parse_line(line, &self.sessions, &effects) {
            Ok(action) => action,
            Err(e) => return ConsoleOutcome::Print(Self::log(LogLevel::Error, &e.to_string())),
        };

        match action {
            ConsoleAction::Help => ConsoleOutcome::Print(HELP.to_string()),
            ConsoleAction::Quit => ConsoleOutcome::Quit,
            ConsoleAction::Users => ConsoleOutcome::Print(OperatorFormatter::format_users(
                &self.sessions,
                &self.session_id,
            )),
            ConsoleAction::State => {
                ConsoleOutcome::Print(OperatorFormatter::format_state(&self.state))
            }
            ConsoleAction::Refresh => ConsoleOutcome::Send {
                frames: vec![ClientMessage::RequestSnapshot],
                log: Self::log(LogLevel::Info, "Requested state snapshot"),
            },
            ConsoleAction::Chat(enabled) => ConsoleOutcome::Send {
                frames: vec![ClientMessage::ToggleChat { enabled }],
                log: Self::log(
                    LogLevel::Success,
                    &format!(
                        "Chat system {}",
                        if enabled { "enabled" } else { "disabled" }
                    ),
                ),
            },
            ConsoleAction::Say(text) => ConsoleOutcome::Send {
                log: Self::log(LogLevel::Info, &format!("Broadcast: \"{}\"", text)),
                frames: vec![
                    ClientMessage::ChatSend {
                        from: Some(OPERATOR_NAME.to_string()),
                        text,
                        is_admin: true,
                    },
                    ClientMessage::IssueCommand {
                        target: "all".to_string(),
                        kind: "open_chat".to_string(),
                        payload: Value::Bool(true),
                    },
                ],
            },
            ConsoleAction::Issue { targets, command } => ConsoleOutcome::Send {
                log: Self::log(
                    LogLevel::Success,
                    &OperatorFormatter::format_issue(&command, &targets),
                ),
                frames: targets
                    .iter()
                    .map(|target| ClientMessage::IssueCommand {
                        target: target.selector().to_string(),
                        kind: command.kind().as_str().to_string(),
                        payload: payload_to_json(command.payload()),
                    })
                    .collect(),
            },
        }
    }
}

/// Client-side passphrase gate; an unset passphrase never matches
pub fn authorize(expected: &str, entered: &str) -> Result<(), ClientError> {
    if expected.is_empty() || entered != expected {
        return Err(ClientError::AccessDenied);
    }
    Ok(())
}

/// Authenticate, connect and run the console until the operator quits
pub async fn run_operator(config: OperatorConfig) -> Result<(), ClientError> {
    let entered = ui::read_secret("Passphrase: ")?;
    authorize(&config.passphrase, &entered)?;

    let (mut write, mut read) = connection::connect(&config.url).await?;
    tracing::info!("Connected to marionette server at {}", config.url);

    connection::send_frame(
        &mut write,
        &ClientMessage::SetIdentity {
            name: Some(OPERATOR_NAME.to_string()),
        },
    )
    .await?;
    connection::send_frame(
        &mut write,
        &ClientMessage::UpdateActivity {
            page: Some("/admin".to_string()),
            activity: Some("Operating".to_string()),
            device: Some("Terminal".to_string()),
            poster: None,
        },
    )
    .await?;

    println!("{}", HELP);
    let mut console = OperatorConsole::new();
    let mut input_rx = ui::spawn_line_reader(PROMPT.to_string());

    loop {
        tokio::select! {
            frame = connection::next_frame(&mut read) => {
                if let Some(line) = console.handle_frame(frame?) {
                    println!("\n{}", line);
                    redisplay_prompt(PROMPT);
                }
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    return Ok(());
                };
                match console.handle_line(&line) {
                    ConsoleOutcome::Send { frames, log } => {
                        for frame in &frames {
                            connection::send_frame(&mut write, frame).await?;
                        }
                        println!("{}", log);
                    }
                    ConsoleOutcome::Print(text) => println!("{}", text),
                    ConsoleOutcome::Quit => return Ok(()),
                }
            }
        }
    }
}
