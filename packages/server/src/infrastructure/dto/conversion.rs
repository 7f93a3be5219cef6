//! Conversion logic between domain models and DTOs.

use broadside_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    CellView, GameStateSnapshot, LobbySnapshot, Participant, Phase, ServerEvent, SessionSummary,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → DTO (WebSocket)
// ========================================

impl From<Phase> for dto::PhaseDto {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::InProgress => Self::InProgress,
            Phase::Over { .. } => Self::Over,
        }
    }
}

impl From<CellView> for dto::CellStateDto {
    fn from(cell: CellView) -> Self {
        match cell {
            CellView::Empty => Self::Empty,
            CellView::Ship => Self::Ship,
            CellView::Miss => Self::Miss,
            CellView::Hit => Self::Hit,
            CellView::Sunk => Self::Sunk,
        }
    }
}

impl From<&GameStateSnapshot> for dto::StateUpdateMessage {
    fn from(snapshot: &GameStateSnapshot) -> Self {
        Self {
            r#type: dto::MessageType::StateUpdate,
            current_turn: snapshot.current_turn.index(),
            phase: snapshot.phase.into(),
            grid: snapshot.grid.iter().copied().map(Into::into).collect(),
            viewer_is_owner: snapshot.viewer_is_owner,
        }
    }
}

impl From<&ServerEvent> for dto::ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::Matched { session_id, seat } => Self::Matched(dto::MatchedMessage {
                r#type: dto::MessageType::Matched,
                session_id: session_id.value(),
                seat: seat.index(),
            }),
            ServerEvent::StateUpdate(snapshot) => Self::StateUpdate(snapshot.into()),
            ServerEvent::GameOver { is_winner } => Self::GameOver(dto::GameOverMessage {
                r#type: dto::MessageType::GameOver,
                is_winner: *is_winner,
            }),
            ServerEvent::OpponentLeft { message } => {
                Self::OpponentLeft(dto::OpponentLeftMessage {
                    r#type: dto::MessageType::OpponentLeft,
                    message: message.clone(),
                })
            }
            ServerEvent::LeftAcknowledged => {
                Self::LeftAcknowledged(dto::LeftAcknowledgedMessage {
                    r#type: dto::MessageType::LeftAcknowledged,
                })
            }
        }
    }
}

/// Serialize a domain event into a WebSocket text frame.
pub fn encode_server_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::ServerMessage::from(event))
}

// ========================================
// Domain → DTO (HTTP)
// ========================================

impl From<&Participant> for http::WaitingParticipantDto {
    fn from(participant: &Participant) -> Self {
        Self {
            connection_id: participant.id.as_str().to_string(),
            connected_at: timestamp_to_rfc3339(participant.connected_at.value()),
        }
    }
}

impl From<&SessionSummary> for http::SessionSummaryDto {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            id: summary.id.value(),
            players: summary
                .players
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            phase: summary.phase.into(),
            current_turn: summary.current_turn.index(),
        }
    }
}

impl From<&LobbySnapshot> for http::LobbyDto {
    fn from(lobby: &LobbySnapshot) -> Self {
        Self {
            waiting: lobby.waiting.iter().map(Into::into).collect(),
            sessions: lobby.sessions.iter().map(Into::into).collect(),
        }
    }
}
