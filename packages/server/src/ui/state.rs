//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLobbyStateUseCase,
    LeaveGameUseCase, ShootUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// ShootUseCase（射撃のユースケース）
    pub shoot_usecase: Arc<ShootUseCase>,
    /// LeaveGameUseCase（退出のユースケース）
    pub leave_game_usecase: Arc<LeaveGameUseCase>,
    /// GetLobbyStateUseCase（ロビー情報取得のユースケース）
    pub get_lobby_state_usecase: Arc<GetLobbyStateUseCase>,
}
