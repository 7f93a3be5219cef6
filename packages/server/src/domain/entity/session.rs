//! GameSession entity（2 枚の盤面、手番、InProgress → Over の状態遷移）

use crate::domain::{
    entity::{CellView, Perspective, PlayerBoard, ShotReport},
    error::ShotRejected,
    value_object::{ConnectionId, Seat, SessionId},
};

/// 対戦のフェーズ（`Over` は終端）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Over { winner: Seat },
}

/// 閲覧者ごとの盤面スナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStateSnapshot {
    pub current_turn: Seat,
    pub phase: Phase,
    pub grid: Vec<CellView>,
    pub viewer_is_owner: bool,
}

/// 受理された射撃の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotOutcome {
    pub shooter: Seat,
    pub report: ShotReport,
    /// 相手の最後の艦を沈めた
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    players: [ConnectionId; 2],
    boards: [PlayerBoard; 2],
    current_turn: Seat,
    phase: Phase,
}

impl GameSession {
    /// `players[i]` は席 `i` に座り、`boards[i]` を持つ
    pub fn new(id: SessionId, players: [ConnectionId; 2], boards: [PlayerBoard; 2]) -> Self {
        Self {
            id,
            players,
            boards,
            current_turn: Seat::First,
            phase: Phase::InProgress,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn player(&self, seat: Seat) -> &ConnectionId {
        &self.players[seat.index()]
    }

    pub fn board(&self, seat: Seat) -> &PlayerBoard {
        &self.boards[seat.index()]
    }

    pub fn current_turn(&self) -> Seat {
        self.current_turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over { .. })
    }

    pub fn winner(&self) -> Option<Seat> {
        match self.phase {
            Phase::InProgress => None,
            Phase::Over { winner } => Some(winner),
        }
    }

    /// `seat` の相手の盤面を撃つ
    ///
    /// 決着後、手番違い、盤面外のセルは副作用なしで拒否する。
    /// 受理された射撃は、決着しない限り必ず手番を渡す。
    pub fn shoot(&mut self, seat: Seat, cell_index: usize) -> Result<ShotOutcome, ShotRejected> {
        if self.is_over() {
            return Err(ShotRejected::SessionOver);
        }
        if seat != self.current_turn {
            return Err(ShotRejected::NotYourTurn(seat));
        }

        let target = &mut self.boards[seat.opponent().index()];
        let report = target.receive_shot(cell_index)?;

        let game_over = target.all_sunk();
        if game_over {
            self.phase = Phase::Over { winner: seat };
        } else {
            self.current_turn = seat.opponent();
        }

        Ok(ShotOutcome {
            shooter: seat,
            report,
            game_over,
        })
    }

    /// `aborting` の退出で対戦を打ち切る
    ///
    /// すでに決着していれば何もせず `false` を返す。
    pub fn abort(&mut self, aborting: Seat) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = Phase::Over {
            winner: aborting.opponent(),
        };
        true
    }

    /// `viewer` から見た `owner` の盤面
    pub fn view_for(&self, viewer: Seat, owner: Seat) -> GameStateSnapshot {
        let perspective = if viewer == owner {
            Perspective::Owner
        } else {
            Perspective::Opponent
        };
        GameStateSnapshot {
            current_turn: self.current_turn,
            phase: self.phase,
            grid: self.board(owner).render(perspective),
            viewer_is_owner: viewer == owner,
        }
    }

    /// 決着後、勝者なら `Some(true)`
    pub fn result_for(&self, seat: Seat) -> Option<bool> {
        self.winner().map(|winner| winner == seat)
    }
}
