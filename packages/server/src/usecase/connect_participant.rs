//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続時のマッチング（待機列への追加と対戦成立の通知）
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 人目は待機、2 人目の接続で対戦成立
//! - 異常系：同じ connection id での二重接続
//! - エッジケース：3 人目は待機列に残る

use std::sync::Arc;

use broadside_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, RegistryError, Timestamp};

use super::{SharedRegistry, deliver::deliver, error::ConnectError};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: SharedRegistry,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        registry: SharedRegistry,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// 参加者接続を実行
    ///
    /// 送信チャンネルを登録してから待機列に入れるので、この呼び出し中に
    /// 対戦が成立した場合も `matched` と初期盤面が届く。
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 接続時刻
    /// * `Err(ConnectError)` - 同じ ID がすでに接続中
    pub async fn execute(
        &self,
        client_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Timestamp, ConnectError> {
        let mut registry = self.registry.lock().await;

        if registry.participant(&client_id).is_some() {
            return Err(ConnectError::DuplicateConnection(client_id.into_string()));
        }

        self.message_pusher
            .register_client(client_id.clone(), sender)
            .await;

        let connected_at = Timestamp::new(self.clock.now_millis());
        let outbox = registry
            .connect(client_id, connected_at)
            .map_err(|RegistryError::DuplicateConnection(id)| {
                ConnectError::DuplicateConnection(id.into_string())
            })?;

        deliver(self.message_pusher.as_ref(), outbox).await;
        Ok(connected_at)
    }
}
