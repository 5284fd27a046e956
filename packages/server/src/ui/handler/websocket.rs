//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{SessionId, SessionIdFactory, SessionPatch},
    infrastructure::dto::{conversion::payload_from_json, websocket::ClientMessage},
    ui::state::AppState,
    usecase::ChatDraft,
};

/// Upgrade every request on `/ws`; the server assigns the session id
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for frames addressed to this session
/// * `sender` - WebSocket sink to send frames to this session
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = SessionIdFactory::generate();
    let (sender, mut receiver) = socket.split();

    // Create a channel for this session to receive frames
    let (tx, rx) = mpsc::unbounded_channel();

    // Spawn the outbound task first so the greeting frames are flushed in order
    let mut send_task = pusher_loop(rx, sender);

    state
        .connect_session_usecase
        .execute(session_id.clone(), tx)
        .await;

    let state_clone = state.clone();
    let session_id_clone = session_id.clone();

    // Spawn a task to receive frames from this session
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", session_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", session_id_clone, text);
                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(frame) => dispatch(&state_clone, &session_id_clone, frame).await,
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring malformed frame from '{}': {}",
                                session_id_clone,
                                e
                            );
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_session_usecase.execute(&session_id).await;
    tracing::debug!("Connection handler for '{}' finished", session_id);
}

/// Route one inbound frame to its use case
async fn dispatch(state: &AppState, session_id: &SessionId, frame: ClientMessage) {
    match frame {
        ClientMessage::SetIdentity { name } => {
            state
                .update_presence_usecase
                .execute(session_id, SessionPatch::identity(name))
                .await;
        }
        ClientMessage::UpdateActivity {
            page,
            activity,
            device,
            poster,
        } => {
            let patch = SessionPatch {
                display_name: None,
                current_page: page,
                activity_label: activity,
                device_label: device,
                poster_image: poster,
            };
            if !patch.is_empty() {
                state
                    .update_presence_usecase
                    .execute(session_id, patch)
                    .await;
            }
        }
        ClientMessage::RequestSnapshot => {
            state.request_snapshot_usecase.execute(session_id).await;
        }
        ClientMessage::ChatSend {
            from,
            text,
            is_admin,
        } => {
            state
                .relay_chat_usecase
                .execute(session_id, ChatDraft { from, text, is_admin })
                .await;
        }
        ClientMessage::ToggleChat { enabled } => {
            state.toggle_chat_usecase.execute(enabled).await;
        }
        ClientMessage::IssueCommand {
            target,
            kind,
            payload,
        } => {
            let result = state
                .route_command_usecase
                .execute(target, &kind, payload_from_json(payload))
                .await;
            match result {
                Ok(delivered) => {
                    tracing::info!("Command '{}' delivered to {} session(s)", kind, delivered.len())
                }
                Err(e) => tracing::warn!("Ignoring command from '{}': {}", session_id, e),
            }
        }
    }
}
