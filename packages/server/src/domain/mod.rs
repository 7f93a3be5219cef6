//! ドメイン層
//!
//! 艦隊配置・盤面・対戦セッション・マッチングといったゲームの中核ロジック。
//! Infrastructure 層や UI 層には依存しない。

pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod registry;
pub mod service;
pub mod value_object;

pub use config::GameConfig;
pub use entity::{
    CellView, GameSession, GameStateSnapshot, Orientation, Participant, Phase, PlayerBoard, Ship,
    ShotOutcome,
};
pub use error::{
    BoardError, ConfigError, LayoutError, MessagePushError, PlacementError, RegistryError,
    ShotRejected, ValueObjectError,
};
pub use event::{OPPONENT_LEFT_MESSAGE, Outbound, ServerEvent};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::{LobbySnapshot, MatchRegistry, SessionSummary};
pub use service::{FleetLayout, FleetPlacer};
pub use value_object::{
    ConnectionId, ConnectionIdFactory, Coordinate, Seat, SessionId, Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
