//! UseCase: ロビー情報の取得

use crate::domain::LobbySnapshot;

use super::SharedRegistry;

/// 待機中の参加者と進行中の対戦を取得するユースケース
pub struct GetLobbyStateUseCase {
    registry: SharedRegistry,
}

impl GetLobbyStateUseCase {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> LobbySnapshot {
        self.registry.lock().await.lobby()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, Phase, Seat, SessionId, Timestamp},
        usecase::test_support::{create_test_message_pusher, create_test_registry, setup_match},
    };

    #[tokio::test]
    async fn test_empty_lobby() {
        // テスト項目: 誰も接続していなければ空のロビーが返る
        // given (前提条件):
        let usecase = GetLobbyStateUseCase::new(create_test_registry());

        // when (操作):
        let lobby = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(lobby, LobbySnapshot::default());
    }

    #[tokio::test]
    async fn test_lobby_lists_waiting_and_sessions() {
        // テスト項目: 待機中の参加者と進行中の対戦が一覧される
        // given (前提条件):
        let registry = create_test_registry();
        let (alice, bob, _rx_a, _rx_b) =
            setup_match(&registry, create_test_message_pusher()).await;
        let charlie = ConnectionId::new("charlie".to_string()).unwrap();
        registry
            .lock()
            .await
            .connect(charlie.clone(), Timestamp::new(42))
            .unwrap();
        let usecase = GetLobbyStateUseCase::new(registry);

        // when (操作):
        let lobby = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(lobby.waiting.len(), 1);
        assert_eq!(lobby.waiting[0].id, charlie);
        assert_eq!(lobby.waiting[0].connected_at, Timestamp::new(42));
        assert_eq!(lobby.sessions.len(), 1);
        assert_eq!(lobby.sessions[0].id, SessionId::FIRST);
        assert_eq!(lobby.sessions[0].players, [alice, bob]);
        assert_eq!(lobby.sessions[0].phase, Phase::InProgress);
        assert_eq!(lobby.sessions[0].current_turn, Seat::First);
    }
}
