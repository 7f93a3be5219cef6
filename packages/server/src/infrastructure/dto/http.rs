//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::PhaseDto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Participant waiting for an opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingParticipantDto {
    pub connection_id: String,
    /// RFC 3339
    pub connected_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryDto {
    pub id: u64,
    pub players: Vec<String>,
    pub phase: PhaseDto,
    pub current_turn: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyDto {
    pub waiting: Vec<WaitingParticipantDto>,
    pub sessions: Vec<SessionSummaryDto>,
}
