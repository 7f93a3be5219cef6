//! Participant entity

use crate::domain::value_object::{ConnectionId, Seat, SessionId, Timestamp};

/// 接続中のクライアント
///
/// `session` はセッションを所有せず、Registry 経由で引く ID のみを持つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
    pub seat: Option<Seat>,
    pub session: Option<SessionId>,
}

impl Participant {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            connected_at,
            seat: None,
            session: None,
        }
    }

    /// 着席中なら (セッション ID, 席)
    pub fn assignment(&self) -> Option<(SessionId, Seat)> {
        self.session.zip(self.seat)
    }

    pub fn assign(&mut self, session: SessionId, seat: Seat) {
        self.session = Some(session);
        self.seat = Some(seat);
    }

    pub fn detach(&mut self) {
        self.session = None;
        self.seat = None;
    }
}
