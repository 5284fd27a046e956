//! Viewer session: applies server frames to the reconciler and turns local
//! input into outbound frames.

use marionette_server::{
    domain::{Command, SharedState},
    infrastructure::dto::{
        conversion::payload_from_json,
        websocket::{ClientMessage, ServerMessage},
    },
};
use tokio::sync::mpsc;

use crate::{
    animation::Viewport,
    chat::ChatLog,
    connection::{self, FrameWriter},
    error::ClientError,
    identity::{Identity, IdentityStore},
    reconciler::Reconciler,
    ui::redisplay_prompt,
};

use super::{ViewerConfig, formatter::ViewerFormatter};

const HELP: &str = "\nCommands:\n  /dismiss        close the alert\n  /close          close the chat window\n  /sync           re-request the shared state\n  /name <name>    change display name\n  /page <path>    report the page being viewed\n  /size <w>x<h>   resize the viewport\n  /status         show the running animations\n  /help           show this help\n  /quit           exit\nAnything else is sent as a chat line.\n";

/// Parsed viewer input line
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerInput {
    Chat(String),
    DismissAlert,
    CloseChat,
    Sync,
    Rename(String),
    Goto(String),
    Resize(Viewport),
    Status,
    Help,
    Quit,
    Invalid(String),
}

impl ViewerInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return ViewerInput::Chat(line.to_string());
        };
        let (command, arg) = match rest.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (rest, ""),
        };
        match (command, arg) {
            ("dismiss", _) => ViewerInput::DismissAlert,
            ("close", _) => ViewerInput::CloseChat,
            ("sync", _) => ViewerInput::Sync,
            ("status", _) => ViewerInput::Status,
            ("help", _) => ViewerInput::Help,
            ("quit", _) => ViewerInput::Quit,
            ("name", name) if !name.is_empty() => ViewerInput::Rename(name.to_string()),
            ("page", page) if !page.is_empty() => ViewerInput::Goto(page.to_string()),
            ("size", size) => match parse_size(size) {
                Some(viewport) => ViewerInput::Resize(viewport),
                None => ViewerInput::Invalid("Usage: /size <width>x<height>".to_string()),
            },
            _ => ViewerInput::Invalid(format!("Unknown command '/{}' (type /help)", command)),
        }
    }
}

fn parse_size(size: &str) -> Option<Viewport> {
    let (width, height) = size.split_once('x')?;
    let width: f64 = width.trim().parse().ok()?;
    let height: f64 = height.trim().parse().ok()?;
    Viewport::checked(width, height)
}

/// Result of one input line
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    Send(Vec<ClientMessage>),
    Notice(String),
    Quit,
}

/// Per-connection viewer state
pub struct ViewerSession {
    session_id: String,
    reconciler: Reconciler,
    chat: ChatLog,
    chat_enabled: bool,
    identity: IdentityStore,
}

impl ViewerSession {
    pub fn new(reconciler: Reconciler, identity: IdentityStore) -> Self {
        Self {
            session_id: String::new(),
            reconciler,
            chat: ChatLog::default(),
            chat_enabled: false,
            identity,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn chat_enabled(&self) -> bool {
        self.chat_enabled
    }

    /// Apply one server frame; returns text to show, if any
    pub fn handle_frame(&mut self, frame: ServerMessage) -> Option<String> {
        match frame {
            ServerMessage::Connected { session_id } => {
                let name = self.identity.load().ok().flatten().map(|i| i.name);
                let notice = ViewerFormatter::format_connected(&session_id, name.as_deref());
                self.session_id = session_id;
                self.reconciler.expect_sync();
                Some(notice)
            }
            ServerMessage::ChatStatus { enabled } => {
                self.chat_enabled = enabled;
                Some(ViewerFormatter::format_chat_status(enabled))
            }
            ServerMessage::StateSnapshot(snapshot) => {
                let shared: SharedState = snapshot.into();
                self.chat_enabled = shared.chat_enabled;
                if self.reconciler.offer_snapshot(&shared) {
                    tracing::info!("Synchronized with shared state: {:?}", shared.effects);
                } else {
                    tracing::debug!("Recorded shared state: {:?}", shared.effects);
                }
                None
            }
            ServerMessage::PresenceSnapshot { sessions } => Some(
                ViewerFormatter::format_presence(&sessions, &self.session_id),
            ),
            ServerMessage::ExecuteCommand { kind, payload } => {
                match Command::from_parts(&kind, payload_from_json(payload)) {
                    Ok(command) => {
                        let notice = ViewerFormatter::format_command(&command);
                        self.reconciler.apply(command);
                        Some(notice)
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring command: {}", e);
                        None
                    }
                }
            }
            ServerMessage::ChatMessage(message) => {
                let notice = ViewerFormatter::format_chat_message(&message);
                self.chat.push(message);
                Some(notice)
            }
        }
    }

    /// Handle one local input line
    pub fn handle_input(&mut self, input: ViewerInput) -> InputOutcome {
        match input {
            ViewerInput::Chat(text) => {
                if text.is_empty() {
                    return InputOutcome::Send(Vec::new());
                }
                if !self.chat_enabled {
                    return InputOutcome::Notice("Chat is disabled".to_string());
                }
                InputOutcome::Send(vec![ClientMessage::ChatSend {
                    from: None,
                    text,
                    is_admin: false,
                }])
            }
            ViewerInput::DismissAlert => {
                self.reconciler.dismiss_alert();
                InputOutcome::Notice("Alert dismissed".to_string())
            }
            ViewerInput::CloseChat => {
                self.reconciler.close_chat();
                InputOutcome::Notice("Chat window closed".to_string())
            }
            ViewerInput::Sync => {
                self.reconciler.expect_sync();
                InputOutcome::Send(vec![ClientMessage::RequestSnapshot])
            }
            ViewerInput::Rename(name) => {
                if let Err(e) = self.identity.save(&Identity { name: name.clone() }) {
                    tracing::warn!("Failed to persist identity: {}", e);
                }
                InputOutcome::Send(vec![ClientMessage::SetIdentity { name: Some(name) }])
            }
            ViewerInput::Goto(page) => InputOutcome::Send(vec![ClientMessage::UpdateActivity {
                page: Some(page),
                activity: None,
                device: None,
                poster: None,
            }]),
            ViewerInput::Resize(viewport) => {
                self.reconciler.resize(viewport);
                InputOutcome::Notice(format!(
                    "Viewport resized to {}x{}",
                    viewport.width, viewport.height
                ))
            }
            ViewerInput::Status => {
                InputOutcome::Notice(ViewerFormatter::format_status(self.reconciler.scheduler()))
            }
            ViewerInput::Help => InputOutcome::Notice(HELP.to_string()),
            ViewerInput::Quit => InputOutcome::Quit,
            ViewerInput::Invalid(message) => InputOutcome::Notice(message),
        }
    }

    pub fn teardown(&mut self) {
        self.reconciler.teardown();
    }
}

/// Run one viewer connection until the user quits or the connection drops
pub async fn run_viewer_session(
    config: &ViewerConfig,
    session: &mut ViewerSession,
    name: Option<String>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (mut write, mut read) = connection::connect(&config.url).await?;
    tracing::info!("Connected to marionette server!");

    let prompt = name.clone().unwrap_or_else(|| "viewer".to_string());

    connection::send_frame(&mut write, &ClientMessage::SetIdentity { name }).await?;
    connection::send_frame(
        &mut write,
        &ClientMessage::UpdateActivity {
            page: Some(config.page.clone()),
            activity: Some("Watching".to_string()),
            device: Some(config.device.clone()),
            poster: None,
        },
    )
    .await?;

    loop {
        tokio::select! {
            frame = connection::next_frame(&mut read) => {
                if let Some(text) = session.handle_frame(frame?) {
                    print!("{}", text);
                    redisplay_prompt(&prompt);
                }
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Input closed (Ctrl+C / Ctrl+D)
                    return Ok(());
                };
                match session.handle_input(ViewerInput::parse(&line)) {
                    InputOutcome::Send(frames) => send_all(&mut write, &frames).await?,
                    InputOutcome::Notice(text) => {
                        println!("{}", text);
                        redisplay_prompt(&prompt);
                    }
                    InputOutcome::Quit => return Ok(()),
                }
            }
        }
    }
}

async fn send_all(write: &mut FrameWriter, frames: &[ClientMessage]) -> Result<(), ClientError> {
    for frame in frames {
        connection::send_frame(write, frame).await?;
    }
    Ok(())
}
