//! 送信イベントの配送

use crate::domain::{MessagePusher, Outbound};

/// Registry が返したイベントを順番どおりに配送する
///
/// 配送は at-most-once。送信に失敗した宛先はログに残して読み飛ばす。
pub async fn deliver(message_pusher: &dyn MessagePusher, outbox: Vec<Outbound>) {
    for Outbound { to, event } in outbox {
        if let Err(e) = message_pusher.push_to(&to, &event).await {
            tracing::warn!("Failed to deliver event to '{}': {}", to, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, MessagePushError, MockMessagePusher, ServerEvent};

    #[tokio::test]
    async fn test_deliver_keeps_order_and_skips_failures() {
        // テスト項目: 失敗した宛先があっても残りのイベントを順番どおり配送する
        // given (前提条件):
        let alice = ConnectionId::new("alice".to_string()).unwrap();
        let ghost = ConnectionId::new("ghost".to_string()).unwrap();
        let mut seq = mockall::Sequence::new();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(|to, _| to.as_str() == "alice")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        pusher
            .expect_push_to()
            .withf(|to, _| to.as_str() == "ghost")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|to, _| Err(MessagePushError::ClientNotFound(to.to_string())));
        pusher
            .expect_push_to()
            .withf(|to, event| {
                to.as_str() == "alice" && matches!(event, ServerEvent::LeftAcknowledged)
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        // when (操作):
        let outbox = vec![
            Outbound::new(alice.clone(), ServerEvent::GameOver { is_winner: true }),
            Outbound::new(ghost, ServerEvent::GameOver { is_winner: false }),
            Outbound::new(alice, ServerEvent::LeftAcknowledged),
        ];
        deliver(&pusher, outbox).await;

        // then (期待する結果): モックの期待回数と順序で検証される
    }
}
