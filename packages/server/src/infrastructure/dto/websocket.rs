//! WebSocket message DTOs.
//!
//! Every frame is a JSON object with a `type` discriminator and camelCase
//! fields.

use serde::{Deserialize, Serialize};

/// Outbound message discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    Matched,
    StateUpdate,
    GameOver,
    OpponentLeft,
    LeftAcknowledged,
}

/// Inbound message (client → server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Shoot { cell_index: usize },
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseDto {
    InProgress,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellStateDto {
    Empty,
    Ship,
    Miss,
    Hit,
    Sunk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedMessage {
    pub r#type: MessageType,
    pub session_id: u64,
    pub seat: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdateMessage {
    pub r#type: MessageType,
    pub current_turn: usize,
    pub phase: PhaseDto,
    pub grid: Vec<CellStateDto>,
    pub viewer_is_owner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverMessage {
    pub r#type: MessageType,
    pub is_winner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentLeftMessage {
    pub r#type: MessageType,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftAcknowledgedMessage {
    pub r#type: MessageType,
}

/// Any outbound message (server → client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Matched(MatchedMessage),
    StateUpdate(StateUpdateMessage),
    GameOver(GameOverMessage),
    OpponentLeft(OpponentLeftMessage),
    LeftAcknowledged(LeftAcknowledgedMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shoot_message() {
        // テスト項目: shoot メッセージが cellIndex 付きで解釈される
        // given (前提条件):
        let json = r#"{"type":"shoot","cellIndex":42}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(msg, ClientMessage::Shoot { cell_index: 42 });
    }

    #[test]
    fn test_parse_leave_message() {
        // テスト項目: leave メッセージが解釈される
        // given (前提条件):
        let json = r#"{"type":"leave"}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(msg, ClientMessage::Leave);
    }

    #[test]
    fn test_reject_malformed_messages() {
        // テスト項目: 負の座標・未知の type・欠けたフィールドは解釈エラーになる
        // given (前提条件):
        let inputs = [
            r#"{"type":"shoot","cellIndex":-1}"#,
            r#"{"type":"shoot"}"#,
            r#"{"type":"chat","content":"hi"}"#,
            "not json",
        ];

        // when (操作) / then (期待する結果):
        for input in inputs {
            assert!(serde_json::from_str::<ClientMessage>(input).is_err(), "{}", input);
        }
    }

    #[test]
    fn test_serialize_state_update_uses_camel_case() {
        // テスト項目: stateUpdate が camelCase のフィールド名で出力される
        // given (前提条件):
        let msg = ServerMessage::StateUpdate(StateUpdateMessage {
            r#type: MessageType::StateUpdate,
            current_turn: 1,
            phase: PhaseDto::InProgress,
            grid: vec![CellStateDto::Empty, CellStateDto::Hit],
            viewer_is_owner: false,
        });

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"type":"stateUpdate","currentTurn":1,"phase":"inProgress","grid":["empty","hit"],"viewerIsOwner":false}"#
        );
    }
}
