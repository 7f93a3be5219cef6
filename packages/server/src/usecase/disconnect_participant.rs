//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時の決着処理と登録解除
//!
//! ### どのような状況を想定しているか
//! - 正常系：対戦中の切断（相手の勝ち、相手は待機列へ）
//! - 正常系：待機中の切断（待機列から除去）
//! - エッジケース：未登録の ID の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

use super::{SharedRegistry, deliver::deliver};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: SharedRegistry,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: SharedRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// 切断した本人には何も送らない。送信チャンネルは最後に登録解除する。
    pub async fn execute(&self, client_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        let outbox = registry.disconnect(client_id);
        deliver(self.message_pusher.as_ref(), outbox).await;
        self.message_pusher.unregister_client(client_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessagePusher, Seat},
        infrastructure::dto::websocket::ServerMessage,
        usecase::test_support::{
            create_test_message_pusher, create_test_registry, drain, setup_match,
        },
    };

    #[tokio::test]
    async fn test_disconnect_mid_game() {
        // テスト項目: 対戦中に切断すると相手が勝ち、切断者は Registry から消える
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_message_pusher();
        let (alice, bob, _rx_a, mut rx_b) = setup_match(&registry, pusher.clone()).await;
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), pusher.clone());

        // when (操作):
        usecase.execute(&alice).await;

        // then (期待する結果):
        let to_bob = drain(&mut rx_b);
        assert_eq!(to_bob.len(), 2);
        assert!(matches!(&to_bob[0], ServerMessage::GameOver(g) if g.is_winner));
        assert!(matches!(&to_bob[1], ServerMessage::OpponentLeft(_)));

        let registry = registry.lock().await;
        assert!(registry.participant(&alice).is_none());
        assert_eq!(registry.waiting().collect::<Vec<_>>(), vec![&bob]);
        assert_eq!(registry.session_count(), 0);
        assert_eq!(pusher.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_reports_winner_before_release() {
        // テスト項目: 切断時の勝敗は切断者の相手（席 1）になる
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_message_pusher();
        let (alice, bob, _rx_a, _rx_b) = setup_match(&registry, pusher.clone()).await;
        let mut mock = MockMessagePusher::new();
        mock.expect_push_to()
            .withf(|to, event| {
                to.as_str() == "bob"
                    && matches!(event, crate::domain::ServerEvent::GameOver { is_winner: true })
            })
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_push_to()
            .withf(|to, event| {
                to.as_str() == "bob"
                    && matches!(event, crate::domain::ServerEvent::OpponentLeft { .. })
            })
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_unregister_client()
            .withf(|id| id.as_str() == "alice")
            .times(1)
            .return_const(());
        assert_eq!(
            registry.lock().await.session_of(&bob).unwrap().player(Seat::First),
            &alice
        );
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), Arc::new(mock));

        // when (操作):
        usecase.execute(&alice).await;

        // then (期待する結果): モックの期待回数で検証される
        assert_eq!(registry.lock().await.participant_count(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_while_waiting() {
        // テスト項目: 待機中の切断は待機列から取り除くだけで誰にも通知しない
        // given (前提条件):
        let registry = create_test_registry();
        let alice = ConnectionId::new("alice".to_string()).unwrap();
        registry
            .lock()
            .await
            .connect(alice.clone(), crate::domain::Timestamp::new(0))
            .unwrap();
        let mut mock = MockMessagePusher::new();
        mock.expect_push_to().never();
        mock.expect_unregister_client().times(1).return_const(());
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), Arc::new(mock));

        // when (操作):
        usecase.execute(&alice).await;

        // then (期待する結果):
        let registry = registry.lock().await;
        assert_eq!(registry.participant_count(), 0);
        assert_eq!(registry.waiting().count(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_unknown_participant() {
        // テスト項目: 未登録の ID の切断でもエラーにならない
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_message_pusher();
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), pusher);
        let ghost = ConnectionId::new("ghost".to_string()).unwrap();

        // when (操作):
        usecase.execute(&ghost).await;

        // then (期待する結果):
        assert_eq!(registry.lock().await.participant_count(), 0);
    }
}
