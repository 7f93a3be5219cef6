//! MatchRegistry（接続中の参加者、FIFO の待機列、対戦セッション）
//!
//! 状態変更は最後まで実行され、配送すべきイベントを順番どおりに返す。
//! 参加者はセッション ID だけを持ち、セッション本体はここが所有する。

use std::collections::{HashMap, VecDeque};

use rand::rngs::SmallRng;

use super::{
    entity::{GameSession, Participant, Phase, PlayerBoard},
    error::RegistryError,
    event::{OPPONENT_LEFT_MESSAGE, Outbound, ServerEvent},
    service::FleetPlacer,
    value_object::{ConnectionId, Seat, SessionId, Timestamp},
};

/// 参加者がセッションを離れる理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Departure {
    /// 待機列に戻る
    Leave,
    /// 接続が切れた（参加者ごと削除）
    Disconnect,
}

/// 進行中セッションの要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: SessionId,
    pub players: [ConnectionId; 2],
    pub phase: Phase,
    pub current_turn: Seat,
}

/// ロビー情報（待機列は古い順、セッションは ID 順）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LobbySnapshot {
    pub waiting: Vec<Participant>,
    pub sessions: Vec<SessionSummary>,
}

pub struct MatchRegistry {
    placer: FleetPlacer,
    rng: SmallRng,
    participants: HashMap<ConnectionId, Participant>,
    waiting: VecDeque<ConnectionId>,
    sessions: HashMap<SessionId, GameSession>,
    next_session_id: SessionId,
}

impl MatchRegistry {
    pub fn new(placer: FleetPlacer, rng: SmallRng) -> Self {
        Self {
            placer,
            rng,
            participants: HashMap::new(),
            waiting: VecDeque::new(),
            sessions: HashMap::new(),
            next_session_id: SessionId::FIRST,
        }
    }

    pub fn placer(&self) -> &FleetPlacer {
        &self.placer
    }

    pub fn participant(&self, id: &ConnectionId) -> Option<&Participant> {
        self.participants.get(id)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn session(&self, id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// 参加者が着席しているセッション
    pub fn session_of(&self, id: &ConnectionId) -> Option<&GameSession> {
        let (session_id, _) = self.participants.get(id)?.assignment()?;
        self.sessions.get(&session_id)
    }

    /// 待機列（待ち時間の長い順）
    pub fn waiting(&self) -> impl Iterator<Item = &ConnectionId> {
        self.waiting.iter()
    }

    pub fn lobby(&self) -> LobbySnapshot {
        let waiting = self
            .waiting
            .iter()
            .filter_map(|id| self.participants.get(id).cloned())
            .collect();
        let mut sessions: Vec<SessionSummary> = self
            .sessions
            .values()
            .map(|session| SessionSummary {
                id: session.id(),
                players: [
                    session.player(Seat::First).clone(),
                    session.player(Seat::Second).clone(),
                ],
                phase: session.phase(),
                current_turn: session.current_turn(),
            })
            .collect();
        sessions.sort_by_key(|summary| summary.id);
        LobbySnapshot { waiting, sessions }
    }

    /// 新しい参加者を待機列に入れ、マッチングを試みる
    pub fn connect(
        &mut self,
        id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<Vec<Outbound>, RegistryError> {
        if self.participants.contains_key(&id) {
            return Err(RegistryError::DuplicateConnection(id));
        }
        tracing::info!("Participant '{}' connected", id);
        self.participants
            .insert(id.clone(), Participant::new(id.clone(), connected_at));
        self.enqueue(id);
        Ok(self.try_pair())
    }

    /// 2 人以上待っている間、待ち時間の長い 2 人を組ませる
    pub fn try_pair(&mut self) -> Vec<Outbound> {
        let mut outbox = Vec::new();
        while self.waiting.len() >= 2 {
            let (Some(first), Some(second)) = (self.waiting.pop_front(), self.waiting.pop_front())
            else {
                break;
            };
            self.open_session([first, second], &mut outbox);
        }
        outbox
    }

    /// 射撃を参加者のセッションに渡す
    ///
    /// 未対戦の参加者、決着済みのセッション、拒否された射撃ではイベントを一切返さない。
    pub fn shot(&mut self, id: &ConnectionId, cell_index: usize) -> Vec<Outbound> {
        let Some((session_id, seat)) = self.participants.get(id).and_then(Participant::assignment)
        else {
            tracing::debug!("Ignoring shot from unmatched participant '{}'", id);
            return Vec::new();
        };
        let Some(session) = self.sessions.get_mut(&session_id) else {
            return Vec::new();
        };

        let outcome = match session.shoot(seat, cell_index) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!("Ignoring shot from '{}' in game {}: {}", id, session_id, e);
                return Vec::new();
            }
        };

        let opponent = seat.opponent();
        let target = session.board(opponent).coordinate(cell_index);
        tracing::debug!(
            "Game {}: seat {} fired at ({}, {}) -> {}",
            session_id,
            seat.index(),
            target.col,
            target.row,
            if outcome.report.hit { "hit" } else { "miss" }
        );

        let mut outbox = vec![
            Outbound::new(
                id.clone(),
                ServerEvent::StateUpdate(session.view_for(seat, opponent)),
            ),
            Outbound::new(
                session.player(opponent).clone(),
                ServerEvent::StateUpdate(session.view_for(opponent, opponent)),
            ),
        ];

        if outcome.game_over {
            tracing::info!("Game {} ended, seat {} won", session_id, seat.index());
            for seat in Seat::BOTH {
                outbox.push(game_over_event(session, seat));
            }
        }

        outbox
    }

    /// 対戦から退出して待機列に戻る（未着席なら何もしない）
    pub fn leave(&mut self, id: &ConnectionId) -> Vec<Outbound> {
        self.depart(id, Departure::Leave)
    }

    /// 切断: 対戦を放棄し、参加者を削除する
    pub fn disconnect(&mut self, id: &ConnectionId) -> Vec<Outbound> {
        self.depart(id, Departure::Disconnect)
    }

    /// 全参加者と全セッションを破棄する
    pub fn shutdown(&mut self) {
        tracing::info!(
            "Tearing down registry ({} participants, {} sessions)",
            self.participants.len(),
            self.sessions.len()
        );
        self.waiting.clear();
        self.sessions.clear();
        self.participants.clear();
    }

    fn enqueue(&mut self, id: ConnectionId) {
        if !self.waiting.contains(&id) {
            self.waiting.push_back(id);
        }
    }

    fn open_session(&mut self, players: [ConnectionId; 2], outbox: &mut Vec<Outbound>) {
        let id = self.next_session_id;
        self.next_session_id = id.next();

        let boards = [
            PlayerBoard::new(self.placer.place(&mut self.rng)),
            PlayerBoard::new(self.placer.place(&mut self.rng)),
        ];
        let session = GameSession::new(id, players.clone(), boards);

        for seat in Seat::BOTH {
            let player = &players[seat.index()];
            if let Some(participant) = self.participants.get_mut(player) {
                participant.assign(id, seat);
            }
            outbox.push(Outbound::new(
                player.clone(),
                ServerEvent::Matched {
                    session_id: id,
                    seat,
                },
            ));
        }
        for seat in Seat::BOTH {
            outbox.push(Outbound::new(
                players[seat.index()].clone(),
                ServerEvent::StateUpdate(session.view_for(seat, seat)),
            ));
        }

        tracing::info!(
            "'{}' and '{}' have joined game {}",
            players[0],
            players[1],
            id
        );
        self.sessions.insert(id, session);
    }

    fn depart(&mut self, id: &ConnectionId, departure: Departure) -> Vec<Outbound> {
        let mut outbox = Vec::new();
        let Some(participant) = self.participants.get(id) else {
            return outbox;
        };

        let Some((session_id, seat)) = participant.assignment() else {
            if departure == Departure::Disconnect {
                self.waiting.retain(|waiting| waiting != id);
                self.participants.remove(id);
                tracing::info!("Participant '{}' disconnected from the waiting pool", id);
            }
            return outbox;
        };

        let mut requeue = None;
        if let Some(session) = self.sessions.get_mut(&session_id) {
            let opponent_seat = seat.opponent();
            let opponent = session.player(opponent_seat).clone();
            let opponent_seated = self
                .participants
                .get(&opponent)
                .is_some_and(|p| p.session == Some(session_id));

            if session.abort(seat) {
                tracing::info!("Game {} aborted by '{}'", session_id, id);
                if departure == Departure::Leave {
                    outbox.push(game_over_event(session, seat));
                }
                if opponent_seated {
                    outbox.push(game_over_event(session, opponent_seat));
                    requeue = Some(opponent.clone());
                }
            }
            if opponent_seated {
                outbox.push(Outbound::new(
                    opponent,
                    ServerEvent::OpponentLeft {
                        message: OPPONENT_LEFT_MESSAGE.to_string(),
                    },
                ));
            }
        }

        if let Some(participant) = self.participants.get_mut(id) {
            participant.detach();
        }
        tracing::info!("'{}' left game {}", id, session_id);

        if let Some(opponent) = requeue {
            if let Some(participant) = self.participants.get_mut(&opponent) {
                participant.detach();
            }
            self.enqueue(opponent);
        }

        match departure {
            Departure::Leave => {
                outbox.push(Outbound::new(id.clone(), ServerEvent::LeftAcknowledged));
                self.enqueue(id.clone());
            }
            Departure::Disconnect => {
                self.waiting.retain(|waiting| waiting != id);
                self.participants.remove(id);
                tracing::info!("Participant '{}' disconnected", id);
            }
        }

        self.release_if_abandoned(session_id);
        outbox.extend(self.try_pair());
        outbox
    }

    fn release_if_abandoned(&mut self, session_id: SessionId) {
        let still_seated = self
            .participants
            .values()
            .any(|participant| participant.session == Some(session_id));
        if !still_seated && self.sessions.remove(&session_id).is_some() {
            tracing::debug!("Game {} released", session_id);
        }
    }
}

fn game_over_event(session: &GameSession, seat: Seat) -> Outbound {
    Outbound::new(
        session.player(seat).clone(),
        ServerEvent::GameOver {
            is_winner: session.result_for(seat) == Some(true),
        },
    )
}
