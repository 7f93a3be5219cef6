//! 送信イベント（ドメインから各接続への通知）
//!
//! Registry は状態変更のたびに `Outbound` の列を返し、UseCase 層が
//! `MessagePusher` を通じて順番どおりに配送する。

use super::{
    entity::GameStateSnapshot,
    value_object::{ConnectionId, Seat, SessionId},
};

/// 相手退出時の通知文
pub const OPPONENT_LEFT_MESSAGE: &str = "Opponent has left the game";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// 対戦成立
    Matched { session_id: SessionId, seat: Seat },
    /// 盤面の更新（閲覧者ごと）
    StateUpdate(GameStateSnapshot),
    /// 対戦終了
    GameOver { is_winner: bool },
    /// 相手が退出した
    OpponentLeft { message: String },
    /// 退出の受理
    LeftAcknowledged,
}

/// 宛先付きのイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

impl Outbound {
    pub fn new(to: ConnectionId, event: ServerEvent) -> Self {
        Self { to, event }
    }
}
