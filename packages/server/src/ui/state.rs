//! Server state: the use cases shared by every handler.

use std::sync::Arc;

use marionette_shared::time::{Clock, SystemClock};

use crate::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemorySessionRepository, InMemorySharedStateRepository},
    },
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, EventGate, GetHealthUseCase,
        ListSessionsUseCase, PresenceBroadcaster, RelayChatUseCase, RequestSnapshotUseCase,
        RouteCommandUseCase, ToggleChatUseCase, UpdatePresenceUseCase,
    },
};

/// Shared application state
pub struct AppState {
    pub connect_session_usecase: ConnectSessionUseCase,
    pub disconnect_session_usecase: DisconnectSessionUseCase,
    pub update_presence_usecase: UpdatePresenceUseCase,
    pub request_snapshot_usecase: RequestSnapshotUseCase,
    pub toggle_chat_usecase: ToggleChatUseCase,
    pub route_command_usecase: RouteCommandUseCase,
    pub relay_chat_usecase: RelayChatUseCase,
    pub get_health_usecase: GetHealthUseCase,
    pub list_sessions_usecase: ListSessionsUseCase,
}

impl AppState {
    /// Wire every use case against one in-memory registry and one shared state
    ///
    /// Initialize dependencies in order:
    /// 1. Repositories
    /// 2. MessagePusher
    /// 3. Broadcaster and event gate
    /// 4. UseCases
    pub fn in_memory() -> Self {
        Self::in_memory_with_clock(Arc::new(SystemClock))
    }

    pub fn in_memory_with_clock(clock: Arc<dyn Clock>) -> Self {
        // 1. Repositories (exactly one instance of each per process)
        let sessions = Arc::new(InMemorySessionRepository::new());
        let shared_state = Arc::new(InMemorySharedStateRepository::new());

        // 2. MessagePusher (WebSocket implementation)
        let message_pusher = Arc::new(WebSocketMessagePusher::new());

        // 3. Broadcaster and event gate
        let broadcaster = Arc::new(PresenceBroadcaster::new(
            sessions.clone(),
            message_pusher.clone(),
        ));
        let gate = Arc::new(EventGate::new());

        // 4. UseCases
        Self {
            connect_session_usecase: ConnectSessionUseCase::new(
                sessions.clone(),
                shared_state.clone(),
                message_pusher.clone(),
                broadcaster.clone(),
                gate.clone(),
            ),
            disconnect_session_usecase: DisconnectSessionUseCase::new(
                sessions.clone(),
                message_pusher.clone(),
                broadcaster.clone(),
                gate.clone(),
            ),
            update_presence_usecase: UpdatePresenceUseCase::new(
                sessions.clone(),
                broadcaster.clone(),
                gate.clone(),
            ),
            request_snapshot_usecase: RequestSnapshotUseCase::new(
                shared_state.clone(),
                broadcaster.clone(),
                gate.clone(),
            ),
            toggle_chat_usecase: ToggleChatUseCase::new(
                shared_state.clone(),
                broadcaster.clone(),
                gate.clone(),
            ),
            route_command_usecase: RouteCommandUseCase::new(
                sessions.clone(),
                shared_state.clone(),
                message_pusher,
                broadcaster.clone(),
                gate.clone(),
            ),
            relay_chat_usecase: RelayChatUseCase::new(
                sessions.clone(),
                shared_state.clone(),
                broadcaster,
                gate,
                clock,
            ),
            get_health_usecase: GetHealthUseCase::new(sessions.clone(), shared_state),
            list_sessions_usecase: ListSessionsUseCase::new(sessions),
        }
    }
}
