//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::EffectsDto;

/// Liveness / introspection response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: String,
    pub users: usize,
    pub chat_enabled: bool,
    pub effects: EffectsDto,
}
