//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, LobbyDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Waiting participants and active games
pub async fn get_lobby(State(state): State<Arc<AppState>>) -> Json<LobbyDto> {
    let lobby = state.get_lobby_state_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(LobbyDto::from(&lobby))
}
