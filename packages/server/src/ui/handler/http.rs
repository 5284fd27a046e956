//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{http::HealthDto, websocket::SessionDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let health = state.get_health_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(HealthDto {
        status: "ok".to_string(),
        users: health.users,
        chat_enabled: health.state.chat_enabled,
        effects: health.state.effects.into(),
    })
}

/// Current presence registry, in connection order
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionDto>> {
    let sessions = state.list_sessions_usecase.execute().await;
    Json(sessions.into_iter().map(SessionDto::from).collect())
}
