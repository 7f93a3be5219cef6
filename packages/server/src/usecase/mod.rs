//! UseCase 層
//!
//! 受信アクションごとに 1 つのユースケース。どのユースケースも
//! Registry のロックを取って 1 回の状態変更を完了させ、返ってきたイベントを
//! ロックを保持したまま `MessagePusher` で配送する。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::MatchRegistry;

pub mod connect_participant;
pub mod deliver;
pub mod disconnect_participant;
pub mod error;
pub mod get_lobby_state;
pub mod leave_game;
pub mod shoot;
pub mod shutdown;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::ConnectError;
pub use get_lobby_state::GetLobbyStateUseCase;
pub use leave_game::LeaveGameUseCase;
pub use shoot::ShootUseCase;
pub use shutdown::ShutdownUseCase;

/// 全ユースケースで共有する Registry
pub type SharedRegistry = Arc<Mutex<MatchRegistry>>;
