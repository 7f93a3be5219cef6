//! UseCase: 射撃処理
//!
//! 受理された射撃は両プレイヤーの盤面更新を、決着した場合は続けて
//! 両者への勝敗通知を配送する。手番違い・決着後・範囲外の射撃は
//! 何も配送しない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

use super::{SharedRegistry, deliver::deliver};

/// 射撃のユースケース
pub struct ShootUseCase {
    registry: SharedRegistry,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ShootUseCase {
    pub fn new(registry: SharedRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 射撃を実行し、配送したイベント数を返す
    pub async fn execute(&self, client_id: &ConnectionId, cell_index: usize) -> usize {
        let mut registry = self.registry.lock().await;
        let outbox = registry.shot(client_id, cell_index);
        let delivered = outbox.len();
        deliver(self.message_pusher.as_ref(), outbox).await;
        delivered
    }
}
