//! UseCase: 対戦からの退出
//!
//! 対戦中の退出は相手の勝ちで決着させ、相手に `opponentLeft` を通知する。
//! 退出者には `leftAcknowledged` を返し、両者とも待機列に戻る。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

use super::{SharedRegistry, deliver::deliver};

/// 退出のユースケース
pub struct LeaveGameUseCase {
    registry: SharedRegistry,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveGameUseCase {
    pub fn new(registry: SharedRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 退出を実行する。未対戦の参加者では何もしない
    pub async fn execute(&self, client_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        let outbox = registry.leave(client_id);
        deliver(self.message_pusher.as_ref(), outbox).await;
    }
}
